//! Fire-and-forget user notices.

use leptos::prelude::*;

use crate::state::toast::ToastState;

pub trait Notifier {
    fn notify(&self, message: &str);
}

impl Notifier for RwSignal<ToastState> {
    fn notify(&self, message: &str) {
        self.update(|toasts| {
            toasts.push(message);
        });
    }
}
