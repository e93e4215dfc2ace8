//! Pipe-table preprocessing
//!
//! Converts `|`-delimited table blocks to HTML before the document-level
//! Markdown pass, rendering every cell independently. Lines outside tables are
//! passed through untouched and in order.
//!
//! # Grammar
//!
//! ```text
//! header     := non-blank line containing '|'
//! delimiter  := line containing '|' and '-'      (discarded)
//! data row   := non-blank line containing '|'    (zero or more, maximal run)
//! ```

mod conversion;
mod detection;

pub use conversion::TableBlock;
pub use detection::{detect_table, is_row, split_row};

use crate::markdown::{CellMarkdownRenderer, MarkdownConverter};
use crate::utils::string_utils::is_blank;

/// Line-based pipe-table to HTML converter
#[derive(Debug, Clone)]
pub struct PipeTableConverter<C> {
    cells: CellMarkdownRenderer<C>,
}

impl<C: MarkdownConverter> PipeTableConverter<C> {
    pub fn new(converter: C) -> Self {
        Self {
            cells: CellMarkdownRenderer::new(converter),
        }
    }

    /// See [`detect_table`]
    #[must_use]
    pub fn detect<S: AsRef<str>>(&self, lines: &[S], i: usize) -> bool {
        detect_table(lines, i)
    }

    /// Convert the table starting at line `i`.
    ///
    /// Returns the HTML and the number of source lines consumed
    /// (`2 + data rows`). If no table starts at `i` the result is
    /// `(String::new(), 0)`; callers are expected to check [`Self::detect`]
    /// first.
    pub fn convert<S: AsRef<str>>(&self, lines: &[S], i: usize) -> (String, usize) {
        match TableBlock::parse(lines, i) {
            Some(block) => (block.to_html(&self.cells), block.consumed),
            None => (String::new(), 0),
        }
    }

    /// Replace every table block in `lines` with its HTML.
    ///
    /// Single forward scan: where a table is detected its HTML is emitted as
    /// one entry in place of the consumed lines; every other line is emitted
    /// unchanged.
    ///
    /// A raw HTML block only ends at a blank line, so an empty entry follows
    /// the table HTML whenever the next line is not already blank. Otherwise
    /// the line that ended the table would be swallowed into the HTML block
    /// and never rendered as Markdown.
    pub fn preprocess<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut expanded = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            if let Some(block) = TableBlock::parse(lines, i) {
                tracing::debug!(
                    "Converted pipe table at line {} ({} lines, {} columns)",
                    i,
                    block.consumed,
                    block.header.len()
                );
                expanded.push(block.to_html(&self.cells));
                i += block.consumed;
                if lines.get(i).is_some_and(|next| !is_blank(next.as_ref())) {
                    expanded.push(String::new());
                }
            } else {
                expanded.push(lines[i].as_ref().to_string());
                i += 1;
            }
        }

        expanded
    }

    pub fn cell_renderer(&self) -> &CellMarkdownRenderer<C> {
        &self.cells
    }
}
