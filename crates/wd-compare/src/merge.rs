//! Change merger: turns an edit script into the segment stream.
//!
//! The merger walks deltas in original-sequence order. Deltas that touch
//! each other are accumulated into one change group; any unchanged gap flushes
//! the open group and is emitted as `Unchanged` context, eliding the middle of
//! runs longer than twice the context limit.
//!
//! State machine:
//!
//! | state                    | Insert       | Delete       | Replace   |
//! |--------------------------|--------------|--------------|-----------|
//! | `Idle`                   | → Insert     | → Delete     | → Replace |
//! | `Accumulating(Insert)`   | stay         | flush→Delete | → Replace |
//! | `Accumulating(Delete)`   | flush→Insert | stay         | → Replace |
//! | `Accumulating(Replace)`  | stay         | stay         | stay      |

use wd_core::{Delta, Segment, Token};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Merge `deltas` against the original sequence `alpha` into segments.
///
/// `context_limit` bounds the unchanged context kept around each change;
/// `usize::MAX` disables elision.
///
/// # Panics
///
/// If the deltas are out of order, overlap, or reach past the end of `alpha`.
pub fn merge(alpha: &[Token], deltas: &[Delta<'_>], context_limit: usize) -> Vec<Segment> {
    let mut merger = ChangeMerger::new(alpha, context_limit);
    for delta in deltas {
        merger.push(delta);
    }
    merger.finish()
}

/// Kind of change a group is currently accumulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMode {
    Insert,
    Delete,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    Idle,
    Accumulating(GroupMode),
}

/// Push-style change merger over one original token sequence.
pub struct ChangeMerger<'a> {
    original: &'a [Token],
    context_limit: usize,
    /// Index of the first original token not yet emitted or consumed.
    consumed: usize,
    state: MergeState,
    removed: Vec<Token>,
    inserted: Vec<Token>,
    next_anchor: usize,
    segments: Vec<Segment>,
}

impl<'a> ChangeMerger<'a> {
    pub fn new(original: &'a [Token], context_limit: usize) -> Self {
        Self {
            original,
            context_limit,
            consumed: 0,
            state: MergeState::Idle,
            removed: Vec::new(),
            inserted: Vec::new(),
            next_anchor: 1,
            segments: Vec::new(),
        }
    }

    pub fn state(&self) -> MergeState {
        self.state
    }

    /// Feed the next delta of the script.
    pub fn push(&mut self, delta: &Delta<'_>) {
        let original = delta.original();
        assert!(
            original.first() >= self.consumed,
            "delta at original index {} overlaps or precedes consumed index {}",
            original.first(),
            self.consumed
        );
        assert!(
            original.end() <= self.original.len(),
            "delta ends at {} past the original's {} tokens",
            original.end(),
            self.original.len()
        );

        if original.first() > self.consumed {
            self.flush();
            self.emit_unchanged(self.consumed, original.first());
        }
        self.consumed = original.end();

        match delta {
            Delta::Insert { revised, .. } => {
                if self.state == MergeState::Accumulating(GroupMode::Delete) {
                    self.flush();
                }
                self.inserted.extend_from_slice(revised.tokens());
                self.enter(GroupMode::Insert);
            }
            Delta::Delete { original, .. } => {
                if self.state == MergeState::Accumulating(GroupMode::Insert) {
                    self.flush();
                }
                self.removed.extend_from_slice(original.tokens());
                self.enter(GroupMode::Delete);
            }
            Delta::Replace { original, revised } => {
                self.removed.extend_from_slice(original.tokens());
                self.inserted.extend_from_slice(revised.tokens());
                self.state = MergeState::Accumulating(GroupMode::Replace);
            }
        }
    }

    /// Flush the open group and emit the trailing unchanged run.
    pub fn finish(mut self) -> Vec<Segment> {
        self.flush();
        self.emit_unchanged(self.consumed, self.original.len());
        self.segments
    }

    /// A replace group absorbs inserts and deletes without changing mode.
    fn enter(&mut self, mode: GroupMode) {
        if self.state != MergeState::Accumulating(GroupMode::Replace) {
            self.state = MergeState::Accumulating(mode);
        }
    }

    fn flush(&mut self) {
        self.state = MergeState::Idle;
        if self.removed.is_empty() && self.inserted.is_empty() {
            return;
        }

        let anchor = self.next_anchor;
        self.next_anchor += 1;

        if !self.removed.is_empty() {
            self.segments.push(Segment::Deleted {
                tokens: std::mem::take(&mut self.removed),
                anchor,
            });
        }
        if !self.inserted.is_empty() {
            self.segments.push(Segment::Inserted {
                tokens: std::mem::take(&mut self.inserted),
                anchor,
            });
        }
    }

    /// Emit `original[start..end]` as context, eliding its middle when the
    /// run is longer than twice the context limit.
    fn emit_unchanged(&mut self, start: usize, end: usize) {
        let original = self.original;
        let run = &original[start..end];
        if run.is_empty() {
            return;
        }

        let limit = self.context_limit;
        if run.len() <= limit.saturating_mul(2) {
            self.segments.push(Segment::Unchanged {
                tokens: run.to_vec(),
            });
            return;
        }

        let (head, rest) = run.split_at(limit);
        let (middle, tail) = rest.split_at(rest.len() - limit);
        if !head.is_empty() {
            self.segments.push(Segment::Unchanged {
                tokens: head.to_vec(),
            });
        }
        self.segments.push(Segment::Elided {
            skipped: middle.len(),
        });
        if !tail.is_empty() {
            self.segments.push(Segment::Unchanged {
                tokens: tail.to_vec(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
