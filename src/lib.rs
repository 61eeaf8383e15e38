//! # snapgram
//!
//! Leptos + WASM client for a social feed backed by a hosted
//! backend-as-a-service.
//!
//! The crate's core is session management: `session::store::SessionStore`
//! answers "who is logged in", `session::bootstrap` runs the first check on
//! mount, and the layouts in `components` gate routes on that one shared
//! state. Pages, toasts, and the HTTP backend sit around it.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
