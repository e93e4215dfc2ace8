//! Math restoration: put extracted literals back after HTML conversion
//!
//! The Markdown converter is free to escape any of the six bracket characters
//! of a placeholder (`<` as `&lt;`, `&#60;`, `&#x3c;`; `>` likewise), each one
//! independently. It never touches the digits or `LATEX_`. A single regex scan
//! recognises every such spelling, reads the exact decimal index and swaps in
//! the literal, so there is no ordering between successive blind substitutions
//! to get wrong.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

use super::segment::MathSegment;

/// Matches a placeholder with any mix of raw and entity-escaped brackets.
///
/// Pattern breakdown:
/// - `(?:<|&(?i:lt|#0*60|#x0*3c);){3}` - three opening brackets, each raw or
///   one of the recognised entities (entity names case-insensitive)
/// - `LATEX_` - literal token, case-sensitive
/// - `([0-9]+)` - capture: decimal index
/// - `(?:>|&(?i:gt|#0*62|#x0*3e);){3}` - three closing brackets
///
/// The closing run directly after the digits makes the index exact:
/// `LATEX_12>>>` can only ever be read as 12.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:<|&(?i:lt|#0*60|#x0*3c);){3}LATEX_([0-9]+)(?:>|&(?i:gt|#0*62|#x0*3e);){3}")
        .expect("PLACEHOLDER_PATTERN: hardcoded regex is valid")
});

/// Outcome of a restoration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restoration {
    /// Text with every located placeholder replaced by its literal
    pub text: String,
    /// Indices of segments whose placeholder was not found (content lost)
    pub missing: Vec<usize>,
}

/// Restore math literals into `text`.
///
/// See [`restore_segments_reporting`]; this variant discards the report.
///
/// # Examples
///
/// ```
/// # use mathdown::math::{extract_segments, restore_segments};
/// let extraction = extract_segments(r"\(a_1\)");
/// let escaped = extraction.stripped.replace('<', "&lt;").replace('>', "&gt;");
/// assert_eq!(restore_segments(&escaped, &extraction.segments), r"\(a_1\)");
/// ```
#[must_use]
pub fn restore_segments(text: &str, segments: &[MathSegment]) -> String {
    restore_segments_reporting(text, segments).text
}

/// Restore math literals into `text`, reporting segments that were lost.
///
/// Every occurrence of a segment's placeholder is replaced, raw or escaped.
/// Placeholders whose index is not in `segments` are left untouched. Restored
/// literals are not rescanned, so a literal that happens to contain
/// placeholder text is inserted verbatim.
///
/// A segment whose placeholder appears nowhere is dropped from the output and
/// logged at warn level; this is content loss, not an error.
pub fn restore_segments_reporting(text: &str, segments: &[MathSegment]) -> Restoration {
    if segments.is_empty() {
        return Restoration {
            text: text.to_string(),
            missing: Vec::new(),
        };
    }

    let mut by_index: HashMap<usize, &MathSegment> = HashMap::with_capacity(segments.len());
    for segment in segments {
        by_index.entry(segment.index).or_insert(segment);
    }

    let mut restored: HashMap<usize, usize> = HashMap::with_capacity(segments.len());

    let text = PLACEHOLDER_PATTERN
        .replace_all(text, |caps: &Captures| {
            let lookup = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| by_index.get(&index).map(|segment| (index, *segment)));

            match lookup {
                Some((index, segment)) => {
                    *restored.entry(index).or_default() += 1;
                    segment.literal.clone()
                }
                // Foreign placeholder: not ours to touch
                None => caps[0].to_string(),
            }
        })
        .into_owned();

    let mut missing: Vec<usize> = by_index
        .keys()
        .copied()
        .filter(|index| !restored.contains_key(index))
        .collect();
    missing.sort_unstable();

    for index in &missing {
        tracing::warn!(
            "Math placeholder {} not found after conversion, segment dropped",
            index
        );
    }

    Restoration { text, missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::segment::MathDelimiter;

    fn inline(index: usize, literal: &str) -> MathSegment {
        MathSegment {
            index,
            kind: MathDelimiter::Inline,
            literal: literal.to_string(),
        }
    }

    #[test]
    fn test_restore_raw_placeholder() {
        let result = restore_segments("x <<<LATEX_0>>> y", &[inline(0, r"\(a\)")]);
        assert_eq!(result, r"x \(a\) y");
    }

    #[test]
    fn test_restore_fully_escaped_placeholder() {
        let result = restore_segments(
            "&lt;&lt;&lt;LATEX_0&gt;&gt;&gt;",
            &[inline(0, r"\(a\)")],
        );
        assert_eq!(result, r"\(a\)");
        assert!(!result.contains("LATEX_"));
    }

    #[test]
    fn test_restore_mixed_and_numeric_entities() {
        let segments = [inline(0, r"\(a\)")];
        for escaped in [
            "&lt;<&LT;LATEX_0>&gt;>",
            "&#60;&#060;<LATEX_0&#62;>&#x3E;",
            "<&#x3c;&#X3C;LATEX_0&Gt;&#x003e;>",
        ] {
            assert_eq!(restore_segments(escaped, &segments), r"\(a\)", "input: {escaped}");
        }
    }

    #[test]
    fn test_index_is_exact() {
        let segments = [inline(1, "ONE"), inline(12, "TWELVE")];
        let result = restore_segments("<<<LATEX_12>>> <<<LATEX_1>>>", &segments);
        assert_eq!(result, "TWELVE ONE");
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let result = restore_segments(
            "<<<LATEX_0>>> and &lt;&lt;&lt;LATEX_0&gt;&gt;&gt;",
            &[inline(0, "M")],
        );
        assert_eq!(result, "M and M");
    }

    #[test]
    fn test_missing_placeholder_is_reported_not_fatal() {
        let segments = [inline(0, "A"), inline(1, "B")];
        let restoration = restore_segments_reporting("only <<<LATEX_1>>>", &segments);
        assert_eq!(restoration.text, "only B");
        assert_eq!(restoration.missing, vec![0]);
    }

    #[test]
    fn test_foreign_index_left_untouched() {
        let result = restore_segments("<<<LATEX_7>>>", &[inline(0, "A")]);
        assert_eq!(result, "<<<LATEX_7>>>");
    }

    #[test]
    fn test_unrecognised_entity_is_not_matched() {
        // &lt without semicolon is not an entity we accept
        let result = restore_segments("&lt&lt&ltLATEX_0>>>", &[inline(0, "A")]);
        assert_eq!(result, "&lt&lt&ltLATEX_0>>>");
    }

    #[test]
    fn test_literal_is_not_rescanned() {
        let segments = [inline(0, "<<<LATEX_1>>>"), inline(1, "B")];
        let result = restore_segments("<<<LATEX_0>>> <<<LATEX_1>>>", &segments);
        assert_eq!(result, "<<<LATEX_1>>> B");
    }
}
