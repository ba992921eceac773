// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Byte-offset spans for script source locations.

use std::ops::Range;

/// A half-open byte range into a script source line or file.
///
/// Spans are attached to tokens and runtime errors so diagnostics can
/// point at the offending text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Converts to a `Range<usize>` for slicing source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<usize>> for Span {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "script sources over 4GB are not supported"
    )]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, (span.end - span.start) as usize).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_accessors() {
        let span = Span::new(2, 6);
        assert_eq!(span.start(), 2);
        assert_eq!(span.end(), 6);
        assert_eq!(span.as_range(), 2..6);
    }

    #[test]
    fn span_from_usize_range() {
        let span: Span = (3usize..9usize).into();
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 9);
    }
}
