//! Error types for pipeline rendering

use crate::markdown::ConversionError;

/// Error types for a render call
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document-level Markdown pass failed; no partial output exists
    #[error("Document conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    TaskFailed(String),
}
