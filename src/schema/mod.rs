//! Schema compilation: field descriptors in, coupled documents out.

mod compile;

pub use compile::{CompiledSchemas, compile};
