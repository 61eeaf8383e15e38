//! Imperative navigation seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session code decides *where* to go; `leptos_router` decides *how*. Tests
//! substitute a recording navigator.

use leptos_router::NavigateOptions;

pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Adapter over the closure returned by `leptos_router::hooks::use_navigate`.
#[derive(Clone)]
pub struct RouterNavigator<F>(pub F);

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, path: &str) {
        log::debug!("navigate -> {path}");
        (self.0)(path, NavigateOptions::default());
    }
}
