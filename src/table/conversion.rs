//! Pipe-table block parsing and HTML emission

use super::detection::{detect_table, is_row, split_row};
use crate::markdown::{CellMarkdownRenderer, MarkdownConverter};

/// One parsed pipe-table block over `[start, start + consumed)`
///
/// Cells are raw trimmed text; they have not been through the cell renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub start: usize,
    pub consumed: usize,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Parse the block starting at line `i`, or `None` if no table starts there.
    ///
    /// Header is line `i`, line `i + 1` is the delimiter (consumed, never
    /// inspected beyond detection), and data rows are the maximal run of
    /// non-blank, pipe-containing lines from `i + 2`. The first line that
    /// ends the run is not part of the block.
    #[must_use]
    pub fn parse<S: AsRef<str>>(lines: &[S], i: usize) -> Option<Self> {
        if !detect_table(lines, i) {
            return None;
        }

        let header = owned_cells(lines[i].as_ref());

        let rows: Vec<Vec<String>> = lines[i + 2..]
            .iter()
            .map(|line| line.as_ref())
            .take_while(|line| is_row(line))
            .map(owned_cells)
            .collect();

        Some(Self {
            start: i,
            consumed: 2 + rows.len(),
            header,
            rows,
        })
    }

    /// Emit `table/thead/tbody` HTML, rendering every cell through `cells`.
    ///
    /// Each tag group sits on its own line and no blank line is emitted, so a
    /// CommonMark parser treats the whole table as one raw HTML block.
    pub fn to_html<C: MarkdownConverter>(&self, cells: &CellMarkdownRenderer<C>) -> String {
        let mut html = String::with_capacity(64 * (self.rows.len() + 1));

        html.push_str("<table>\n<thead>\n");
        push_row(&mut html, &self.header, "th", cells);
        html.push_str("</thead>\n<tbody>\n");
        for row in &self.rows {
            push_row(&mut html, row, "td", cells);
        }
        html.push_str("</tbody>\n</table>");

        html
    }
}

fn owned_cells(line: &str) -> Vec<String> {
    split_row(line).into_iter().map(str::to_string).collect()
}

fn push_row<C: MarkdownConverter>(
    html: &mut String,
    row: &[String],
    tag: &str,
    cells: &CellMarkdownRenderer<C>,
) {
    html.push_str("<tr>");
    for cell in row {
        html.push('<');
        html.push_str(tag);
        html.push('>');
        html.push_str(&cells.render(cell));
        html.push_str("</");
        html.push_str(tag);
        html.push('>');
    }
    html.push_str("</tr>\n");
}
