//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::{auth_layout::AuthLayout, root_layout::RootLayout, toasts::Toasts};
use crate::config::ClientConfig;
use crate::net::api::HttpBackend;
use crate::pages::{home::HomePage, sign_in::SignInPage};
use crate::session::store::SessionStore;
use crate::state::toast::ToastState;

/// The session handle every component shares.
pub type AppSession = SessionStore<HttpBackend>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the one `SessionStore` for the app, mirrors it into a signal, and
/// provides both to the route tree.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let backend = HttpBackend::new(config.api_base.clone());
    let store: AppSession = SessionStore::new(backend.clone());

    let session = RwSignal::new(store.state());
    store.subscribe(move |state| session.set(state.clone()));
    let toasts = RwSignal::new(ToastState::default());
    let handle = StoredValue::new_local(store);

    provide_context(config);
    provide_context(backend);
    provide_context(session);
    provide_context(toasts);
    provide_context(handle);

    on_cleanup(move || {
        let _ = handle.try_with_value(SessionStore::close);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/snapgram.css"/>
        <Title text="Snapgram"/>

        <Router>
            <SessionBootstrap/>
            <Toasts/>
            <Routes fallback=|| "Page not found.".into_view()>
                <ParentRoute path=StaticSegment("") view=AuthLayout>
                    <Route path=StaticSegment("sign-in") view=SignInPage/>
                </ParentRoute>
                <ParentRoute path=StaticSegment("") view=RootLayout>
                    <Route path=StaticSegment("") view=HomePage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}

/// Runs the mount-time session check once the router is available.
#[component]
fn SessionBootstrap() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use crate::session::{bootstrap::bootstrap, marker::LocalStorageMarkers};
        use crate::util::router::RouterNavigator;

        let store = expect_context::<StoredValue<AppSession, LocalStorage>>().get_value();
        let config = expect_context::<ClientConfig>();
        let navigator = RouterNavigator(leptos_router::hooks::use_navigate());
        leptos::task::spawn_local(async move {
            let outcome = bootstrap(&store, &LocalStorageMarkers, &navigator, &config).await;
            log::debug!("session bootstrap finished: {outcome:?}");
        });
    }
}

