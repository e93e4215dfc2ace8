//! Pipe-table detection and row splitting
//!
//! The grammar is strictly line based: one physical line is one row. No
//! column-count, alignment or header/delimiter consistency checks are made.

use crate::utils::string_utils::is_blank;

/// True iff a table block starts at line `i`.
///
/// Line `i` must be non-blank and contain `|`; line `i + 1` must exist and
/// contain both `|` and `-`.
///
/// # Examples
///
/// ```
/// # use mathdown::table::detect_table;
/// assert!(detect_table(&["a | b", "--|--"], 0));
/// assert!(!detect_table(&["a | b"], 0));
/// assert!(!detect_table(&["a | b", "| x |"], 0));
/// ```
#[must_use]
pub fn detect_table<S: AsRef<str>>(lines: &[S], i: usize) -> bool {
    let (Some(header), Some(delimiter)) = (lines.get(i), lines.get(i + 1)) else {
        return false;
    };
    let header = header.as_ref();
    let delimiter = delimiter.as_ref();

    is_row(header) && delimiter.contains('|') && delimiter.contains('-')
}

/// A line that can be a header or data row: non-blank and contains `|`
#[inline]
#[must_use]
pub fn is_row(line: &str) -> bool {
    !is_blank(line) && line.contains('|')
}

/// Split a row into its cells.
///
/// Pieces are trimmed and empty pieces dropped, so `| a | b |` and `a | b`
/// both yield `["a", "b"]`. An intentionally empty cell (`a | | b`) is
/// dropped as well.
#[must_use]
pub fn split_row(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}
