//! Route gating decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Layouts call these on every render with the shared session state and
//! act on the result; the functions themselves have no side effects.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::{DEFAULT_HOME_PATH, DEFAULT_SIGN_IN_PATH};
use crate::state::session::{Phase, SessionState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the guarded subtree.
    PassThrough,
    /// Session not settled yet; render a placeholder, do not navigate.
    Pending,
    Redirect(String),
}

/// Gate for sign-in/sign-up pages: signed-in users are sent home.
pub fn guest_only(is_authenticated: bool) -> GuardDecision {
    guest_only_to(is_authenticated, DEFAULT_HOME_PATH)
}

pub fn guest_only_to(is_authenticated: bool, home_path: &str) -> GuardDecision {
    if is_authenticated { GuardDecision::Redirect(home_path.to_owned()) } else { GuardDecision::PassThrough }
}

/// Gate for protected pages: anonymous users are sent to sign in.
pub fn require_session(state: &SessionState) -> GuardDecision {
    require_session_to(state, DEFAULT_SIGN_IN_PATH)
}

pub fn require_session_to(state: &SessionState, sign_in_path: &str) -> GuardDecision {
    match state.phase() {
        Phase::Authenticated => GuardDecision::PassThrough,
        Phase::Anonymous => GuardDecision::Redirect(sign_in_path.to_owned()),
        Phase::Unknown | Phase::Checking => GuardDecision::Pending,
    }
}
