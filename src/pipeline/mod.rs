//! Markdown + math rendering pipeline - the one path for documents and chunks
//!
//! Stages, in order:
//! 1. Extract math literals into placeholders
//! 2. Convert pipe tables to HTML (cells rendered one by one)
//! 3. Convert the whole block to HTML (raw HTML passthrough on)
//! 4. Restore math literals
//!
//! The order is load-bearing. Tables must be HTML before the document pass so
//! pipe rows are never reinterpreted by the generic converter. Math is lifted
//! out before either Markdown pass and put back once, after both, so no
//! literal is parsed as Markdown twice (once per cell, once per document).
//!
//! # Usage
//!
//! ```rust
//! # use mathdown::pipeline::RenderPipeline;
//! let pipeline = RenderPipeline::with_defaults();
//! let html = pipeline.render(r"Area: \(\pi r^2\)");
//! assert_eq!(html, "<p>Area: \\(\\pi r^2\\)</p>\n");
//! ```

pub mod chunking;
pub mod errors;

pub use chunking::split_into_chunks;
pub use errors::RenderError;

use std::sync::Arc;

use crate::config::RenderConfig;
use crate::markdown::{ComrakConverter, MarkdownConverter};
use crate::math::{extract_segments, restore_segments};
use crate::table::PipeTableConverter;

/// Stateless renderer: `Send + Sync`, safe to share and call concurrently
#[derive(Debug, Clone)]
pub struct RenderPipeline<C = ComrakConverter> {
    converter: C,
}

impl Default for RenderPipeline<ComrakConverter> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RenderPipeline<ComrakConverter> {
    /// Pipeline over comrak with the default extension set
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ComrakConverter::default())
    }

    /// Pipeline over comrak, configured from `config`
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(ComrakConverter::from_config(config))
    }
}

impl<C: MarkdownConverter> RenderPipeline<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Render a document or one chunk of it.
    ///
    /// On a document-level conversion failure the result is an empty string:
    /// no partial output is produced. The failure is logged at error level;
    /// use [`Self::try_render`] to observe it.
    pub fn render(&self, text: &str) -> String {
        match self.try_render(text) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("{}; rendering nothing for {} input bytes", e, text.len());
                String::new()
            }
        }
    }

    /// Render, surfacing a document-level conversion failure.
    ///
    /// Cell-level failures never reach here: they fall back to raw cell text.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Conversion` if the whole-block Markdown pass
    /// fails.
    pub fn try_render(&self, text: &str) -> Result<String, RenderError> {
        // Stage 1: lift math out of reach of both Markdown passes
        let extraction = extract_segments(text);

        // Stage 2: pipe tables to HTML; placeholders have no pipe or newline
        let lines: Vec<&str> = extraction.stripped.split('\n').collect();
        let tables = PipeTableConverter::new(&self.converter);
        let expanded = tables.preprocess(&lines).join("\n");

        // Stage 3: whole-block Markdown pass
        let html = self.converter.to_html(&expanded)?;

        // Stage 4: restore once, globally
        Ok(restore_segments(&html, &extraction.segments))
    }
}

impl<C: MarkdownConverter + 'static> RenderPipeline<C> {
    /// Render on the blocking pool.
    ///
    /// Thin async wrapper for callers on a tokio runtime; conversion is
    /// CPU-bound, so it runs under `spawn_blocking`.
    ///
    /// # Errors
    ///
    /// As [`Self::try_render`], plus `RenderError::TaskFailed` if the blocking
    /// task panics.
    pub async fn render_async(self: Arc<Self>, text: impl Into<Arc<str>>) -> Result<String, RenderError> {
        let text: Arc<str> = text.into();

        tokio::task::spawn_blocking(move || self.try_render(&text))
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))?
    }
}
