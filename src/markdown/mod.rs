//! Markdown-to-HTML conversion: the converter seam and the table-cell renderer

pub mod cell;
pub mod converter;
pub mod errors;

pub use cell::CellMarkdownRenderer;
pub use converter::{ComrakConverter, MarkdownConverter};
pub use errors::ConversionError;
