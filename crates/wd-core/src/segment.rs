use serde::{Deserialize, Serialize};

use crate::token::Token;

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One unit of the rendered diff, in original-sequence order.
///
/// Renderers map each variant to presentation. `anchor` numbers change
/// groups from 1 so renderers can link between consecutive changes; the
/// `Deleted` and `Inserted` halves of one group share an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Unchanged { tokens: Vec<Token> },
    Inserted { tokens: Vec<Token>, anchor: usize },
    Deleted { tokens: Vec<Token>, anchor: usize },
    /// A stretch of unchanged tokens left out of the output.
    Elided { skipped: usize },
}

impl Segment {
    /// Tokens carried by this segment; empty for `Elided`.
    pub fn tokens(&self) -> &[Token] {
        match self {
            Segment::Unchanged { tokens }
            | Segment::Inserted { tokens, .. }
            | Segment::Deleted { tokens, .. } => tokens,
            Segment::Elided { .. } => &[],
        }
    }

    pub fn anchor(&self) -> Option<usize> {
        match self {
            Segment::Inserted { anchor, .. } | Segment::Deleted { anchor, .. } => Some(*anchor),
            Segment::Unchanged { .. } | Segment::Elided { .. } => None,
        }
    }

    /// `true` for `Inserted` and `Deleted` segments.
    pub fn is_change(&self) -> bool {
        self.anchor().is_some()
    }
}

/// Whether `segments` contains any inserted or deleted tokens.
///
/// An `Unchanged`/`Elided`-only stream is still a valid rendering, so callers
/// must not test for emptiness instead.
pub fn has_changes(segments: &[Segment]) -> bool {
    segments.iter().any(Segment::is_change)
}

/// Number of change groups in `segments` (the highest anchor).
pub fn change_count(segments: &[Segment]) -> usize {
    segments
        .iter()
        .filter_map(Segment::anchor)
        .max()
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Previous/next change anchors around one change group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl Navigation {
    /// Neighbours of `anchor` in a stream of `change_count` groups.
    ///
    /// Anchors are 1-based; `0` or an anchor past `change_count` names no
    /// group and has no neighbours.
    pub fn for_anchor(anchor: usize, change_count: usize) -> Self {
        if anchor == 0 || anchor > change_count {
            return Self::default();
        }
        Self {
            previous: (anchor > 1).then(|| anchor - 1),
            next: (anchor < change_count).then(|| anchor + 1),
        }
    }
}
