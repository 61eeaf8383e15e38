//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates gating to the
//! layouts in `components`.

pub mod home;
pub mod sign_in;
