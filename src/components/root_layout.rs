//! Layout for routes that need a signed-in user.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::session::SessionState;
use crate::util::guard::{GuardDecision, require_session_to};
use crate::util::router::{Navigator, RouterNavigator};

#[component]
pub fn RootLayout() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let sign_in_path = expect_context::<ClientConfig>().sign_in_path;
    let navigator = RouterNavigator(use_navigate());

    let decision = Memo::new(move |_| session.with(|state| require_session_to(state, &sign_in_path)));

    // Only redirect once the session has settled; Pending renders a loader.
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = decision.get() {
            navigator.navigate(&path);
        }
    });

    view! {
        {move || match decision.get() {
            GuardDecision::PassThrough => view! {
                <main class="root-layout">
                    <Outlet/>
                </main>
            }
            .into_any(),
            GuardDecision::Pending | GuardDecision::Redirect(_) => view! {
                <div class="root-layout__loader">"Loading..."</div>
            }
            .into_any(),
        }}
    }
}
