/// A byte range `[start, end)` into the parsed source.
///
/// Tokens and nodes store spans rather than copied text until the
/// materializer resolves them, so slicing the source with any span
/// reproduces the exact input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The source text covered by this span.
    ///
    /// Spans produced by the scanner always fall on char boundaries since
    /// they are cut at ASCII brackets.
    pub fn slice(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}
