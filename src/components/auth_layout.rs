//! Layout for guest-only routes such as sign in.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::session::SessionState;
use crate::util::guard::{GuardDecision, guest_only_to};
use crate::util::router::{Navigator, RouterNavigator};

/// Sends signed-in users home; everyone else sees the form plus the side banner.
#[component]
pub fn AuthLayout() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let home_path = expect_context::<ClientConfig>().home_path;
    let navigator = RouterNavigator(use_navigate());

    let decision = Memo::new(move |_| guest_only_to(session.get().is_authenticated, &home_path));

    Effect::new(move || {
        if let GuardDecision::Redirect(path) = decision.get() {
            navigator.navigate(&path);
        }
    });

    view! {
        <Show when=move || decision.get() == GuardDecision::PassThrough>
            <section class="auth-layout__content">
                <Outlet/>
            </section>
            <img src="/assets/images/side-img.svg" alt="snapgram banner" class="auth-layout__banner"/>
        </Show>
    }
}
