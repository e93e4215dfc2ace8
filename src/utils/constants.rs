//! Shared constants for mathdown
//!
//! Placeholder spelling and configuration defaults live here so the codec,
//! the table converter and the config builder agree on them.

/// Opening bracket run of a math placeholder
pub const PLACEHOLDER_OPEN: &str = "<<<";

/// Token between the brackets and the decimal index
///
/// Never escaped by a Markdown converter: it contains only ASCII letters and
/// an underscore that sits inside a word, so it cannot open emphasis.
pub const PLACEHOLDER_TAG: &str = "LATEX_";

/// Closing bracket run of a math placeholder
pub const PLACEHOLDER_CLOSE: &str = ">>>";

/// Default pacing delay between chunk appends: 30ms
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 30;

/// Default converter input limit: 8 MiB
///
/// Documents larger than this are rejected with a conversion error instead of
/// being handed to the Markdown parser.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 8 * 1024 * 1024;

/// Default number of idle render surfaces kept by a `SurfacePool`
pub const DEFAULT_SURFACE_POOL_SIZE: usize = 4;

/// Chunk boundary used by `split_into_chunks`
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Build the raw placeholder for a segment index
///
/// ```
/// # use mathdown::utils::constants::placeholder;
/// assert_eq!(placeholder(3), "<<<LATEX_3>>>");
/// ```
#[inline]
#[must_use]
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_OPEN}{PLACEHOLDER_TAG}{index}{PLACEHOLDER_CLOSE}")
}
