//! Home page for the signed-in user.

use leptos::prelude::*;

use crate::app::AppSession;
use crate::state::session::SessionState;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let store = expect_context::<StoredValue<AppSession, LocalStorage>>();

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                store.sign_out().await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = store;
        }
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <img
                    class="home-page__avatar"
                    src=move || {
                        let url = session.get().user.image_url;
                        if url.is_empty() { "/assets/icons/profile-placeholder.svg".to_owned() } else { url }
                    }
                    alt="profile"
                />
                <div>
                    <p class="home-page__name">{move || session.get().user.name}</p>
                    <p class="home-page__username">{move || format!("@{}", session.get().user.username)}</p>
                </div>
                <button class="btn" on:click=on_sign_out>"Sign out"</button>
            </header>
            <Show when=move || !session.get().user.bio.is_empty()>
                <p class="home-page__bio">{move || session.get().user.bio}</p>
            </Show>
        </div>
    }
}
