//! Markdown-to-HTML converter seam
//!
//! The pipeline never parses Markdown itself. It talks to a
//! [`MarkdownConverter`], which must pass raw HTML through untouched: the table
//! preprocessor injects literal `<table>` markup before the document pass.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::errors::ConversionError;
use crate::config::RenderConfig;
use crate::utils::constants::DEFAULT_MAX_INPUT_BYTES;

/// Opaque `markdown_to_html` with raw-HTML passthrough enabled
pub trait MarkdownConverter: Send + Sync {
    fn to_html(&self, markdown: &str) -> Result<String, ConversionError>;
}

impl<T: MarkdownConverter + ?Sized> MarkdownConverter for Arc<T> {
    fn to_html(&self, markdown: &str) -> Result<String, ConversionError> {
        (**self).to_html(markdown)
    }
}

impl<T: MarkdownConverter + ?Sized> MarkdownConverter for &T {
    fn to_html(&self, markdown: &str) -> Result<String, ConversionError> {
        (**self).to_html(markdown)
    }
}

/// CommonMark converter backed by comrak
///
/// Raw HTML passthrough (`render.unsafe_`) is always on. comrak's own GFM
/// table extension stays off: pipe tables are handled by
/// [`crate::table`] before the document reaches the converter.
#[derive(Debug, Clone)]
pub struct ComrakConverter {
    strikethrough: bool,
    autolink: bool,
    tasklist: bool,
    superscript: bool,
    hard_breaks: bool,
    max_input_bytes: Option<usize>,
}

impl Default for ComrakConverter {
    fn default() -> Self {
        Self {
            strikethrough: true,
            autolink: true,
            tasklist: true,
            superscript: false,
            hard_breaks: false,
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }
}

impl ComrakConverter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter with the extension set and input limit of `config`
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            strikethrough: config.strikethrough(),
            autolink: config.autolink(),
            tasklist: config.tasklist(),
            superscript: config.superscript(),
            hard_breaks: config.hard_breaks(),
            max_input_bytes: config.max_input_bytes(),
        }
    }

    #[must_use]
    pub fn with_strikethrough(mut self, enabled: bool) -> Self {
        self.strikethrough = enabled;
        self
    }

    #[must_use]
    pub fn with_autolink(mut self, enabled: bool) -> Self {
        self.autolink = enabled;
        self
    }

    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.hard_breaks = enabled;
        self
    }

    #[must_use]
    pub fn with_max_input_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_input_bytes = limit;
        self
    }

    fn comrak_options(&self) -> comrak::Options<'static> {
        let mut options = comrak::Options::default();
        options.extension.strikethrough = self.strikethrough;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.superscript = self.superscript;
        options.render.hardbreaks = self.hard_breaks;
        // Table markup from the preprocessor must survive
        options.render.unsafe_ = true;
        options
    }
}

impl MarkdownConverter for ComrakConverter {
    fn to_html(&self, markdown: &str) -> Result<String, ConversionError> {
        if let Some(limit) = self.max_input_bytes {
            if markdown.len() > limit {
                return Err(ConversionError::InputTooLarge {
                    len: markdown.len(),
                    limit,
                });
            }
        }

        let options = self.comrak_options();
        panic::catch_unwind(AssertUnwindSafe(|| {
            comrak::markdown_to_html(markdown, &options)
        }))
        .map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            ConversionError::ConverterPanicked(message)
        })
    }
}
