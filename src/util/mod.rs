//! Seams between session logic and the browser.
//!
//! `guard` turns session state into route decisions, `router` wraps
//! `use_navigate` behind a `Navigator` trait, and `notify` routes notices into
//! the toast signal. Session code depends only on the traits, so tests swap in
//! recorders.

pub mod guard;
pub mod notify;
pub mod router;
