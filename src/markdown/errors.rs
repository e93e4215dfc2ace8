//! Error types for Markdown conversion

/// Failure of the Markdown-to-HTML converter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Input exceeded the configured size limit
    #[error("Markdown input of {len} bytes exceeds the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },

    /// The underlying converter panicked
    #[error("Markdown converter panicked: {0}")]
    ConverterPanicked(String),

    /// Converter-specific failure
    #[error("Markdown conversion failed: {0}")]
    Failed(String),
}
