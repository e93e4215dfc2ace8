//! Per-cell Markdown rendering for table cells
//!
//! Each cell is converted on its own and loses the `<p>` wrapper the converter
//! puts around a lone paragraph, so the result can sit inside `<td>`/`<th>`.

use super::converter::MarkdownConverter;
use crate::utils::string_utils::strip_wrapping_tag;

/// Renders one table cell's raw text as inline-safe HTML
#[derive(Debug, Clone)]
pub struct CellMarkdownRenderer<C> {
    converter: C,
}

impl<C: MarkdownConverter> CellMarkdownRenderer<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Render `cell` through the converter.
    ///
    /// - Blank input is returned unchanged; the converter is not called.
    /// - Otherwise the trimmed text is converted and exactly one leading `<p>`
    ///   and one trailing `</p>` are removed.
    /// - A converter failure is not propagated: the raw cell text comes back
    ///   unchanged and a warning is logged.
    pub fn render(&self, cell: &str) -> String {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return cell.to_string();
        }

        match self.converter.to_html(trimmed) {
            Ok(html) => strip_wrapping_tag(&html, "<p>", "</p>").to_string(),
            Err(e) => {
                tracing::warn!("Cell conversion failed: {}, using raw cell text", e);
                cell.to_string()
            }
        }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{ComrakConverter, ConversionError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFailure {
        calls: AtomicUsize,
    }

    impl MarkdownConverter for CountingFailure {
        fn to_html(&self, _markdown: &str) -> Result<String, ConversionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ConversionError::Failed("boom".to_string()))
        }
    }

    #[test]
    fn test_strips_paragraph_wrapper() {
        let renderer = CellMarkdownRenderer::new(ComrakConverter::new());
        assert_eq!(renderer.render("  **bold** text "), "<strong>bold</strong> text");
    }

    #[test]
    fn test_blank_cell_skips_converter() {
        let failing = CountingFailure {
            calls: AtomicUsize::new(0),
        };
        let renderer = CellMarkdownRenderer::new(&failing);
        assert_eq!(renderer.render("   "), "   ");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_falls_back_to_raw_text() {
        let failing = CountingFailure {
            calls: AtomicUsize::new(0),
        };
        let renderer = CellMarkdownRenderer::new(&failing);
        assert_eq!(renderer.render(" *x* "), " *x* ");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_placeholder_survives_cell_render() {
        let renderer = CellMarkdownRenderer::new(ComrakConverter::new());
        let html = renderer.render("<<<LATEX_3>>>");
        assert_eq!(html, "&lt;&lt;&lt;LATEX_3&gt;&gt;&gt;");
    }
}
