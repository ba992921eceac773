// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Identifier tokens produced by the backward scanner.

use std::fmt;

use ecow::EcoString;

/// One token of a dotted/bracketed access chain.
///
/// `start`/`end` are byte offsets into the scanned buffer. For plain
/// identifiers the name equals `buffer[start..end]`; for quoted bracket
/// indexes (`obj["prop"]`) the offsets cover the whole `["prop"]` region
/// while the name is the inner string. `start` is where a replacement for
/// this token must begin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    name: EcoString,
    start: usize,
    end: usize,
    keyword_new: bool,
}

impl Identifier {
    /// Creates a plain identifier covering `start..end`.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, start: usize, end: usize) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            keyword_new: false,
        }
    }

    /// Creates the empty "nothing typed yet" identifier at `position`.
    #[must_use]
    pub fn empty(position: usize) -> Self {
        Self::new("", position, position)
    }

    /// Creates the synthetic `new` keyword token covering `start..end`.
    #[must_use]
    pub fn keyword_new(start: usize, end: usize) -> Self {
        Self {
            name: EcoString::from("new"),
            start,
            end,
            keyword_new: true,
        }
    }

    /// The token text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start byte offset (the replacement anchor).
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether the token has empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Whether this is the synthetic `new` keyword.
    ///
    /// Only set by the tokenizer's keyword detection; a property that
    /// happens to be called `new` stays a plain identifier.
    #[must_use]
    pub fn is_keyword_new(&self) -> bool {
        self.keyword_new
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
