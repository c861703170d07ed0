//! Dotted-path resolution over JSON data.
//!
//! Absence is a value here, not an error: `get` answers `None` the moment an
//! intermediate is missing or not an object, and callers are expected to
//! treat that as a valid outcome.

mod core;

pub use core::{get, set};
