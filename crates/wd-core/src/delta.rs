//! Edit-script primitives: chunks of a token sequence and the deltas that
//! reference them.
//!
//! Chunks borrow their tokens from the sequence they index into, so an edit
//! script never copies tokens.

use std::ops::Range;

use crate::token::Token;

// ---------------------------------------------------------------------------
// Chunk
// ---------------------------------------------------------------------------

/// A contiguous range of a token sequence.
///
/// An empty chunk still records the position it sits at, e.g. the point in
/// the original sequence where an insertion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    first: usize,
    tokens: &'a [Token],
}

impl<'a> Chunk<'a> {
    /// Borrow `range` out of `sequence`, or `None` if it is out of bounds.
    pub fn within(sequence: &'a [Token], range: Range<usize>) -> Option<Self> {
        let first = range.start;
        sequence.get(range).map(|tokens| Self { first, tokens })
    }

    /// Index of the first token.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Index of the last token (inclusive), or `None` when empty.
    pub fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end() - 1)
        }
    }

    /// Index one past the last token.
    pub fn end(&self) -> usize {
        self.first + self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }
}

// ---------------------------------------------------------------------------
// Delta
// ---------------------------------------------------------------------------

/// One elementary edit between an original and a revised token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta<'a> {
    /// Tokens added to the revision. `original` is empty and marks the
    /// insertion point.
    Insert {
        original: Chunk<'a>,
        revised: Chunk<'a>,
    },
    /// Tokens removed from the original. `revised` is empty.
    Delete {
        original: Chunk<'a>,
        revised: Chunk<'a>,
    },
    /// Tokens in `original` replaced by the tokens in `revised`.
    Replace {
        original: Chunk<'a>,
        revised: Chunk<'a>,
    },
}

impl<'a> Delta<'a> {
    pub fn original(&self) -> Chunk<'a> {
        match self {
            Delta::Insert { original, .. }
            | Delta::Delete { original, .. }
            | Delta::Replace { original, .. } => *original,
        }
    }

    pub fn revised(&self) -> Chunk<'a> {
        match self {
            Delta::Insert { revised, .. }
            | Delta::Delete { revised, .. }
            | Delta::Replace { revised, .. } => *revised,
        }
    }
}
