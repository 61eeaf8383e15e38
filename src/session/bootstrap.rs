//! Mount-time session bootstrap.
//!
//! The presence marker is read first and synchronously: a missing or empty
//! marker sends the user to sign in before any network call, so protected
//! pages never flash for someone who is plainly logged out. The refresh
//! always runs afterwards, and a marker that promised a session which the
//! backend then denies produces the same redirect once the answer arrives.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use super::marker::{MarkerStore, PresenceMarker};
use super::store::SessionStore;
use crate::config::ClientConfig;
use crate::net::api::AccountService;
use crate::util::router::Navigator;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub marker: PresenceMarker,
    /// Sign-in redirect issued before the refresh started.
    pub early_redirect: bool,
    /// Sign-in redirect issued after the refresh found no account.
    pub late_redirect: bool,
    pub authenticated: bool,
}

pub async fn bootstrap<A, M, N>(
    store: &SessionStore<A>,
    markers: &M,
    navigator: &N,
    config: &ClientConfig,
) -> BootstrapOutcome
where
    A: AccountService,
    M: MarkerStore,
    N: Navigator,
{
    let marker = markers.marker(&config.marker_key);
    let early_redirect = !marker.hints_session();
    if early_redirect {
        log::debug!("presence marker {marker:?}; redirecting before refresh");
        navigator.navigate(&config.sign_in_path);
    }

    store.refresh().await;
    // A newer refresh may have overtaken this one; trust the settled state.
    let authenticated = store.is_authenticated();

    let late_redirect = !early_redirect && !authenticated && !store.is_loading() && !store.is_closed();
    if late_redirect {
        log::info!("presence marker was stale; redirecting to sign in");
        navigator.navigate(&config.sign_in_path);
    }

    BootstrapOutcome { marker, early_redirect, late_redirect, authenticated }
}
