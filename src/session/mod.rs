//! The authoring session: the sole mutable store of field descriptors.

mod core;

pub use core::{FormSession, SessionConfig};
