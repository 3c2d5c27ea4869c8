//! Diff result types: the structured output of the diff engine.

use serde::{Deserialize, Serialize};

use wd_core::{change_count, has_changes, Segment};

// ---------------------------------------------------------------------------
// DiffStats
// ---------------------------------------------------------------------------

/// Aggregate token counts summarising one rendered diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Tokens in the old revision.
    pub old_tokens: usize,
    /// Tokens in the new revision.
    pub new_tokens: usize,
    /// Unchanged tokens emitted as context.
    pub unchanged: usize,
    pub inserted: usize,
    pub deleted: usize,
    /// Unchanged tokens left out by elision.
    pub elided: usize,
    /// Number of flushed change groups.
    pub change_groups: usize,
}

impl DiffStats {
    /// Tally `segments` rendered from revisions of the given token lengths.
    pub fn from_segments(segments: &[Segment], old_tokens: usize, new_tokens: usize) -> Self {
        let mut stats = Self {
            old_tokens,
            new_tokens,
            change_groups: change_count(segments),
            ..Self::default()
        };
        for segment in segments {
            match segment {
                Segment::Unchanged { tokens } => stats.unchanged += tokens.len(),
                Segment::Inserted { tokens, .. } => stats.inserted += tokens.len(),
                Segment::Deleted { tokens, .. } => stats.deleted += tokens.len(),
                Segment::Elided { skipped } => stats.elided += skipped,
            }
        }
        stats
    }
}

// ---------------------------------------------------------------------------
// DiffResult
// ---------------------------------------------------------------------------

/// The top-level output of a single diff run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffResult {
    /// Ordered segment stream for the renderer.
    pub segments: Vec<Segment>,
    pub stats: DiffStats,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        has_changes(&self.segments)
    }

    pub fn change_count(&self) -> usize {
        self.stats.change_groups
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
