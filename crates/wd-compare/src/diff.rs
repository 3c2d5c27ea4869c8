//! Token-level edit script using the Myers algorithm via the `similar` crate.
//!
//! Equal runs are dropped; every remaining operation becomes a [`Delta`]
//! whose chunks borrow the two token sequences. Operations that touch each
//! other in both sequences are coalesced into one delta so a contiguous edit
//! is never split.

use similar::{Algorithm, DiffOp};

use wd_core::{Chunk, Delta, Result, Token, WdError};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the edit script turning `alpha` into `beta`.
///
/// Deltas are returned in increasing `original.first()` order and never
/// overlap. Identical sequences yield an empty script.
///
/// Fails with [`WdError::DiffFailed`] only if the backend's operations do not
/// walk both sequences end to end or pair unequal tokens, which is an
/// internal invariant violation.
pub fn diff<'a>(alpha: &'a [Token], beta: &'a [Token]) -> Result<Vec<Delta<'a>>> {
    let ops = similar::capture_diff_slices(Algorithm::Myers, alpha, beta);
    script_from_ops(alpha, beta, &ops)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Validate `ops` against both sequences and convert them into deltas.
///
/// Positions come from running cursors advanced by each op's lengths. The
/// backend's `old_index` is checked against the old cursor for ops that
/// consume original tokens; its `new_index` on a `Delete` (and `old_index` on
/// an `Insert`) is not reliable and is ignored.
fn script_from_ops<'a>(
    alpha: &'a [Token],
    beta: &'a [Token],
    ops: &[DiffOp],
) -> Result<Vec<Delta<'a>>> {
    let mut deltas: Vec<Delta<'a>> = Vec::new();
    let mut old_cursor = 0usize;
    let mut new_cursor = 0usize;

    for op in ops {
        let old_range = op.old_range();
        let old_len = old_range.len();
        let new_len = op.new_range().len();

        if old_len > 0 && old_range.start != old_cursor {
            return Err(diff_failed(format!(
                "operation starts at original index {} but previous one ended at {}",
                old_range.start, old_cursor
            )));
        }

        let old_span = old_cursor..old_cursor + old_len;
        let new_span = new_cursor..new_cursor + new_len;
        old_cursor = old_span.end;
        new_cursor = new_span.end;

        let original = Chunk::within(alpha, old_span.clone()).ok_or_else(|| {
            diff_failed(format!(
                "original range {:?} exceeds {} tokens",
                old_span,
                alpha.len()
            ))
        })?;
        let revised = Chunk::within(beta, new_span.clone()).ok_or_else(|| {
            diff_failed(format!(
                "revised range {:?} exceeds {} tokens",
                new_span,
                beta.len()
            ))
        })?;

        if let DiffOp::Equal { .. } = op {
            if original.tokens() != revised.tokens() {
                return Err(diff_failed(format!(
                    "equal run {:?} / {:?} holds different tokens",
                    old_span, new_span
                )));
            }
            continue;
        }

        push_coalesced(&mut deltas, original, revised, alpha, beta);
    }

    if old_cursor != alpha.len() || new_cursor != beta.len() {
        return Err(diff_failed(format!(
            "script ended at ({}, {}) instead of ({}, {})",
            old_cursor,
            new_cursor,
            alpha.len(),
            beta.len()
        )));
    }

    Ok(deltas)
}

/// Append a delta, merging it into the previous one when the two touch in
/// both sequences.
fn push_coalesced<'a>(
    deltas: &mut Vec<Delta<'a>>,
    original: Chunk<'a>,
    revised: Chunk<'a>,
    alpha: &'a [Token],
    beta: &'a [Token],
) {
    if let Some(last) = deltas.last_mut() {
        let (prev_original, prev_revised) = (last.original(), last.revised());
        if prev_original.end() == original.first() && prev_revised.end() == revised.first() {
            // Both ranges were already bounds-checked, so the union is too.
            if let (Some(original), Some(revised)) = (
                Chunk::within(alpha, prev_original.first()..original.end()),
                Chunk::within(beta, prev_revised.first()..revised.end()),
            ) {
                *last = classify(original, revised);
                return;
            }
        }
    }
    deltas.push(classify(original, revised));
}

fn classify<'a>(original: Chunk<'a>, revised: Chunk<'a>) -> Delta<'a> {
    match (original.is_empty(), revised.is_empty()) {
        (true, _) => Delta::Insert { original, revised },
        (false, true) => Delta::Delete { original, revised },
        (false, false) => Delta::Replace { original, revised },
    }
}

fn diff_failed(message: String) -> WdError {
    tracing::error!(%message, "edit script failed validation");
    WdError::DiffFailed(message)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
