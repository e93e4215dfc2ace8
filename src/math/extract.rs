//! Math extraction: lift `\( \)` and `\[ \]` literals out of a document
//!
//! Every complete literal is replaced in place by `<<<LATEX_n>>>` where `n` is
//! its appearance order. The placeholder contains no Markdown syntax, no pipe
//! and no newline, so it survives both the table preprocessor and the
//! Markdown converter as plain text (at worst with its brackets escaped).

use super::segment::{MathDelimiter, MathExtraction, MathSegment};
use crate::utils::constants::placeholder;

/// Extract every complete math literal from `text`.
///
/// Scans left to right. On an opener the FIRST closer of the same kind ends
/// the segment; same-kind nesting is not recognised. An opener with no closer
/// before end of input is ordinary text: no segment is produced and scanning
/// resumes right after the opener.
///
/// # Arguments
///
/// * `text` - Markdown source, possibly containing math
///
/// # Returns
///
/// The stripped text and the ordered segment list. For N segments the
/// stripped text contains placeholders `0..N` in increasing order.
///
/// # Examples
///
/// ```
/// # use mathdown::math::extract_segments;
/// let extraction = extract_segments(r"Let \(x\) be \[x^2\]");
/// assert_eq!(extraction.stripped, "Let <<<LATEX_0>>> be <<<LATEX_1>>>");
/// assert_eq!(extraction.segments[1].literal, r"\[x^2\]");
/// ```
#[must_use]
pub fn extract_segments(text: &str) -> MathExtraction {
    let mut stripped = String::with_capacity(text.len());
    let mut segments = Vec::new();

    // `copied` trails `scan`: everything before it is already in `stripped`
    let mut copied = 0;
    let mut scan = 0;

    while let Some(offset) = text[scan..].find('\\') {
        let start = scan + offset;
        let Some(kind) = MathDelimiter::opening(&text[start..]) else {
            scan = start + 1;
            continue;
        };

        let body_start = start + kind.open().len();
        match text[body_start..].find(kind.close()) {
            Some(close_offset) => {
                let end = body_start + close_offset + kind.close().len();
                let index = segments.len();

                stripped.push_str(&text[copied..start]);
                stripped.push_str(&placeholder(index));
                segments.push(MathSegment {
                    index,
                    kind,
                    literal: text[start..end].to_string(),
                });

                copied = end;
                scan = end;
            }
            None => {
                tracing::debug!(
                    "Unterminated {:?} math delimiter at byte {}, leaving as text",
                    kind,
                    start
                );
                scan = body_start;
            }
        }
    }

    stripped.push_str(&text[copied..]);

    MathExtraction { stripped, segments }
}
