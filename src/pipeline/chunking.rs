//! Chunk splitting for incremental rendering

use crate::utils::constants::CHUNK_SEPARATOR;

/// Split a document into chunks on blank-line boundaries (`"\n\n"`).
///
/// Plain string splitting with no other semantics: runs of three or more
/// newlines yield empty chunks, and a math literal or table containing a blank
/// line is cut in two.
///
/// # Examples
///
/// ```
/// # use mathdown::pipeline::split_into_chunks;
/// assert_eq!(split_into_chunks("a\n\nb\nc"), vec!["a", "b\nc"]);
/// assert_eq!(split_into_chunks("a\n\n\n\nb"), vec!["a", "", "b"]);
/// assert_eq!(split_into_chunks(""), vec![""]);
/// ```
#[must_use]
pub fn split_into_chunks(text: &str) -> Vec<String> {
    text.split(CHUNK_SEPARATOR).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_newlines_do_not_split() {
        assert_eq!(split_into_chunks("a\nb\nc"), vec!["a\nb\nc"]);
    }

    #[test]
    fn test_three_newlines() {
        assert_eq!(split_into_chunks("a\n\n\nb"), vec!["a", "\nb"]);
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(split_into_chunks("a\n\n"), vec!["a", ""]);
    }
}
