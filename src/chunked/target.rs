//! Render targets: where chunk HTML ends up

use super::errors::AppendError;
use crate::surface_pool::Reusable;

/// Destination for rendered chunk HTML
///
/// `append` returning `Ok` is the acknowledgement that lets the next chunk
/// start.
pub trait RenderTarget: Send {
    fn append(&mut self, html: &str) -> Result<(), AppendError>;
}

/// In-memory target accumulating appended HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlBuffer {
    html: String,
    appends: usize,
}

impl HtmlBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Number of successful appends
    #[must_use]
    pub fn appends(&self) -> usize {
        self.appends
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.html
    }
}

impl RenderTarget for HtmlBuffer {
    fn append(&mut self, html: &str) -> Result<(), AppendError> {
        self.html.push_str(html);
        self.appends += 1;
        Ok(())
    }
}

impl Reusable for HtmlBuffer {
    fn reset(&mut self) {
        // Keep the allocation for the next document
        self.html.clear();
        self.appends = 0;
    }
}
