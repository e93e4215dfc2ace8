//! Math segment codec
//!
//! Protects TeX-style math literals from the Markdown converter. Extraction
//! swaps each `\( \)` / `\[ \]` literal for an index-encoding placeholder;
//! restoration swaps the placeholders back once all HTML exists.
//!
//! ```
//! # use mathdown::math::{extract_segments, restore_segments};
//! let source = r"Energy: \(E = mc^2\)";
//! let extraction = extract_segments(source);
//! // ... any transformation that may escape `<` / `>` ...
//! let html = format!("<p>{}</p>", extraction.stripped.replace('<', "&lt;"));
//! assert_eq!(
//!     restore_segments(&html, &extraction.segments),
//!     r"<p>Energy: \(E = mc^2\)</p>"
//! );
//! ```

mod extract;
mod restore;
mod segment;

pub use extract::extract_segments;
pub use restore::{Restoration, restore_segments, restore_segments_reporting};
pub use segment::{MathDelimiter, MathExtraction, MathSegment};
