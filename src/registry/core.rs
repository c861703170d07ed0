use std::collections::HashMap;

use serde_json::Value;

use crate::error::{FormError, Result};
use crate::layout::{LAYOUT_FIELD, LAYOUT_GRID_KEY, LayoutDocument};
use crate::render::{ControlRenderer, LayoutInterpreter, RenderNode};

/// Read-only slice of render inputs handed to an extension.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    pub data_schema: &'a Value,
    pub presentation: &'a Value,
    pub data: &'a Value,
}

/// A rendering extension the engine resolves by name.
pub trait RenderExtension: Send + Sync {
    fn render(&self, ctx: ExtensionContext<'_>, renderer: &dyn ControlRenderer) -> RenderNode;
}

impl std::fmt::Debug for dyn RenderExtension + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RenderExtension")
    }
}

impl RenderExtension for LayoutInterpreter {
    /// Pull the layout document out of the presentation root and interpret
    /// it. A missing or unparsable document degrades to a single
    /// placeholder instead of failing the render.
    fn render(&self, ctx: ExtensionContext<'_>, renderer: &dyn ControlRenderer) -> RenderNode {
        let document = ctx
            .presentation
            .get(LAYOUT_GRID_KEY)
            .and_then(LayoutDocument::from_value);
        match document {
            Some(document) => self.render(
                &document,
                ctx.data_schema,
                ctx.presentation,
                ctx.data,
                renderer,
            ),
            None => renderer.placeholder(LAYOUT_GRID_KEY),
        }
    }
}

/// Registry mapping extension names to their implementations.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: HashMap<String, Box<dyn RenderExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with the layout interpreter under
    /// [`LAYOUT_FIELD`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(LAYOUT_FIELD, Box::new(LayoutInterpreter::new()));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, extension: Box<dyn RenderExtension>) {
        self.entries.insert(name.into(), extension);
    }

    pub fn resolve(&self, name: &str) -> Result<&dyn RenderExtension> {
        self.entries
            .get(name)
            .map(Box::as_ref)
            .ok_or_else(|| FormError::ExtensionNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
