//! Sign-in page: email + password against the hosted backend.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppSession;
use crate::config::ClientConfig;
use crate::net::api::{AccountService, HttpBackend, SignInService};
use crate::session::store::SessionStore;
use crate::state::session::SessionState;
use crate::state::toast::ToastState;
use crate::util::notify::Notifier;
use crate::util::router::Navigator;

pub const SIGN_IN_REJECTED: &str = "sign-in failed. please try again.";
pub const SESSION_CHECK_FAILED: &str = "Login failed, please try again.";

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Session created and confirmed; the form should reset.
    SignedIn,
    /// The backend refused the credentials or could not be reached.
    Rejected,
    /// A session was created but the follow-up account lookup failed.
    CheckFailed,
}

/// Trim and check the form fields before anything is sent.
pub fn validate_sign_in(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

/// Create a session, re-check the account, then go home or say why not.
pub async fn submit_sign_in<S, A, N, T>(
    credentials: &Credentials,
    sign_in: &S,
    store: &SessionStore<A>,
    navigator: &N,
    notifier: &T,
    home_path: &str,
) -> SignInOutcome
where
    S: SignInService,
    A: AccountService,
    N: Navigator,
    T: Notifier,
{
    match sign_in.sign_in(&credentials.email, &credentials.password).await {
        Ok(Some(_session)) => {}
        Ok(None) => {
            notifier.notify(SIGN_IN_REJECTED);
            return SignInOutcome::Rejected;
        }
        Err(e) => {
            log::warn!("sign-in request failed: {e}");
            notifier.notify(SIGN_IN_REJECTED);
            return SignInOutcome::Rejected;
        }
    }

    // `refresh` reports its own finding; a sign-out may have overtaken it.
    if store.refresh().await && store.is_authenticated() {
        navigator.navigate(home_path);
        SignInOutcome::SignedIn
    } else {
        notifier.notify(SESSION_CHECK_FAILED);
        SignInOutcome::CheckFailed
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let store = expect_context::<StoredValue<AppSession, LocalStorage>>();
    let backend = expect_context::<HttpBackend>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        let credentials = match validate_sign_in(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        error.set(None);
        submitting.set(true);

        #[cfg(feature = "hydrate")]
        {
            let store = store.get_value();
            let backend = backend.clone();
            let navigator = crate::util::router::RouterNavigator(navigate.clone());
            let home_path = config.home_path.clone();
            leptos::task::spawn_local(async move {
                let outcome = submit_sign_in(&credentials, &backend, &store, &navigator, &toasts, &home_path).await;
                if outcome == SignInOutcome::SignedIn {
                    email.set(String::new());
                    password.set(String::new());
                }
                submitting.set(false);
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credentials, &backend, &navigate, &config, store, toasts);
            submitting.set(false);
        }
    };

    let busy = move || submitting.get() || session.get().is_loading;

    view! {
        <div class="sign-in">
            <img src="/assets/images/logo.svg" alt="logo"/>
            <h2 class="sign-in__title">"Log in to your account"</h2>
            <p class="sign-in__subtitle">"Welcome back!"</p>
            <form class="sign-in__form" on:submit=on_submit>
                <label class="sign-in__label">
                    "Email"
                    <input
                        class="sign-in__input"
                        type="email"
                        placeholder="enter email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="sign-in__label">
                    "Password"
                    <input
                        class="sign-in__input"
                        type="password"
                        placeholder="enter password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="sign-in__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="sign-in__submit" type="submit" disabled=busy>
                    {move || if busy() { "Loading..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
