use thiserror::Error;

/// Unified result type for the formgrid crate.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors surfaced at the crate boundary.
///
/// Compilation, packing, interpretation, and path resolution are total:
/// malformed input degrades locally instead of producing an error. Only
/// registry lookup, session indexing, and export can fail.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("render extension `{0}` is not registered")]
    ExtensionNotFound(String),
    #[error("field index {0} is out of bounds")]
    FieldIndex(usize),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
