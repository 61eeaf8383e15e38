//! Session lifecycle: the shared store, the presence-marker hint, and the
//! mount-time bootstrap that ties them together.

pub mod bootstrap;
pub mod marker;
pub mod store;
