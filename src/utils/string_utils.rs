//! Small string helpers shared by the table converter and the cell renderer
//!
//! These operate on `&str` slices and never allocate unless they have to.

/// Check whether a line is blank (empty or whitespace only).
///
/// The table grammar treats a blank line as a hard block boundary, so this
/// is the single definition used by detection and by data-row scanning.
///
/// # Examples
/// ```
/// # use mathdown::utils::string_utils::is_blank;
/// assert!(is_blank(""));
/// assert!(is_blank("  \t "));
/// assert!(!is_blank(" | "));
/// ```
#[inline]
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Strip exactly one leading `open` tag and one trailing `close` tag.
///
/// Surrounding whitespace is trimmed first. Each tag is removed only if it is
/// present; a string that starts with `open` but does not end with `close`
/// loses only the opening tag.
///
/// # Arguments
/// * `html` - HTML fragment, typically a converter's output for one line
/// * `open` - Opening tag to remove, e.g. `<p>`
/// * `close` - Closing tag to remove, e.g. `</p>`
///
/// # Returns
/// * Slice of `html` without the wrapper. Zero allocation.
///
/// # Examples
/// ```
/// # use mathdown::utils::string_utils::strip_wrapping_tag;
/// assert_eq!(strip_wrapping_tag("<p>a <em>b</em></p>\n", "<p>", "</p>"), "a <em>b</em>");
/// assert_eq!(strip_wrapping_tag("<p><p>x</p></p>", "<p>", "</p>"), "<p>x</p>");
/// assert_eq!(strip_wrapping_tag("<ul><li>x</li></ul>", "<p>", "</p>"), "<ul><li>x</li></ul>");
/// ```
#[must_use]
pub fn strip_wrapping_tag<'a>(html: &'a str, open: &str, close: &str) -> &'a str {
    let trimmed = html.trim();
    let trimmed = trimmed.strip_prefix(open).unwrap_or(trimmed);
    trimmed.strip_suffix(close).unwrap_or(trimmed)
}
