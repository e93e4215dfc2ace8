//! Math segment data model

use crate::utils::constants::placeholder;

/// Delimiter pair that introduced a math segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathDelimiter {
    /// `\(` ... `\)`
    Inline,
    /// `\[` ... `\]`
    Display,
}

impl MathDelimiter {
    pub const ALL: [MathDelimiter; 2] = [MathDelimiter::Inline, MathDelimiter::Display];

    #[must_use]
    pub const fn open(self) -> &'static str {
        match self {
            MathDelimiter::Inline => r"\(",
            MathDelimiter::Display => r"\[",
        }
    }

    #[must_use]
    pub const fn close(self) -> &'static str {
        match self {
            MathDelimiter::Inline => r"\)",
            MathDelimiter::Display => r"\]",
        }
    }

    /// Delimiter whose opener starts `rest`, if any
    #[must_use]
    pub fn opening(rest: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| rest.starts_with(kind.open()))
    }
}

/// One math literal lifted out of a document
///
/// `literal` is the exact source substring, delimiters included, and may span
/// several lines. `index` is its 0-based position in appearance order within
/// the extraction pass that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSegment {
    pub index: usize,
    pub kind: MathDelimiter,
    pub literal: String,
}

impl MathSegment {
    /// The raw placeholder standing in for this segment
    #[must_use]
    pub fn placeholder(&self) -> String {
        placeholder(self.index)
    }

    /// Literal without its delimiters
    #[must_use]
    pub fn body(&self) -> &str {
        let open = self.kind.open().len();
        let close = self.kind.close().len();
        self.literal
            .get(open..self.literal.len().saturating_sub(close))
            .unwrap_or("")
    }
}

/// Result of one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MathExtraction {
    /// Input with every segment replaced by its placeholder
    pub stripped: String,
    /// Segments in appearance order; `segments[i].index == i`
    pub segments: Vec<MathSegment>,
}
