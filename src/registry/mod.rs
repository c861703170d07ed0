//! Named render-extension registry.

mod core;

pub use core::{ExtensionContext, ExtensionRegistry, RenderExtension};
