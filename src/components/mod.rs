//! Reusable UI components.
//!
//! DESIGN
//! ======
//! Layouts gate whole route subtrees on the shared session; they never hold
//! an authenticated flag of their own.

pub mod auth_layout;
pub mod root_layout;
pub mod toasts;
