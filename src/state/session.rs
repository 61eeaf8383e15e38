//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by `session::store::SessionStore`; read by route guards and
//! user-aware components through a context-provided signal.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

/// Where the session sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been checked yet.
    Unknown,
    /// A refresh is in flight.
    Checking,
    Authenticated,
    Anonymous,
}

/// Who is logged in right now.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: User,
    pub is_loading: bool,
    pub is_authenticated: bool,
    /// Set once any refresh has resolved; separates `Unknown` from `Anonymous`.
    pub checked: bool,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Checking
        } else if self.is_authenticated {
            Phase::Authenticated
        } else if self.checked {
            Phase::Anonymous
        } else {
            Phase::Unknown
        }
    }

    /// Record a resolved lookup: an account signs the user in, anything else
    /// leaves the empty sentinel.
    pub(crate) fn resolve(&mut self, user: Option<User>) {
        self.checked = true;
        match user {
            Some(user) => {
                self.user = user;
                self.is_authenticated = true;
            }
            None => {
                self.user = User::default();
                self.is_authenticated = false;
            }
        }
    }

    /// Forget the user without a backend round trip.
    pub(crate) fn clear(&mut self) {
        self.user = User::default();
        self.is_authenticated = false;
        self.is_loading = false;
        self.checked = true;
    }
}
