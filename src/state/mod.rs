//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so components depend on small focused models.
//! `session` is the only cross-cutting one; `toast` holds transient notices.

pub mod session;
pub mod toast;
