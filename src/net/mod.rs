//! Networking modules for the hosted backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the collaborator traits and their HTTP implementation,
//! and `types` defines the wire schema.

pub mod api;
pub mod types;
