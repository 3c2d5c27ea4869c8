//! Diff engine: tokenize, diff and merge two revisions into a segment stream.
//!
//! [`render_diff`] is the single-call entry point. [`DiffEngine`] carries a
//! [`DiffConfig`] and adds stats and parallel batch rendering with rayon.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use wd_core::{Result, Segment};

use crate::diff::diff;
use crate::merge::merge;
use crate::result::{DiffResult, DiffStats};
use crate::tokenize::tokenize;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the word-level difference between `old_text` and `new_text`.
///
/// Unchanged runs longer than `2 * context_limit` tokens are elided down to
/// `context_limit` tokens on each side; pass `usize::MAX` to keep everything.
/// Identical inputs yield a stream without `Inserted`/`Deleted` segments.
pub fn render_diff(old_text: &str, new_text: &str, context_limit: usize) -> Result<Vec<Segment>> {
    let engine = DiffEngine::new(DiffConfig {
        context_limit,
        ..DiffConfig::default()
    });
    Ok(engine.render(old_text, new_text)?.segments)
}

// ---------------------------------------------------------------------------
// DiffConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for the diff engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Unchanged tokens kept on each side of a change before the rest of the
    /// run is elided.
    /// Default: `usize::MAX` (no elision).
    pub context_limit: usize,
    /// Return an empty stream for byte-identical inputs instead of rendering
    /// them as unchanged context.
    /// Default: false.
    pub skip_identical: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_limit: usize::MAX,
            skip_identical: false,
        }
    }
}

impl DiffConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// DiffEngine
// ---------------------------------------------------------------------------

/// Stateless diff engine; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Render one pair of revisions into a [`DiffResult`].
    pub fn render(&self, old_text: &str, new_text: &str) -> Result<DiffResult> {
        let start = Instant::now();

        if self.config.skip_identical && old_text == new_text {
            tracing::debug!(bytes = old_text.len(), "Skipped identical revisions");
            return Ok(DiffResult {
                segments: Vec::new(),
                stats: DiffStats::default(),
                elapsed_ms: start.elapsed().as_millis() as u64,
            });
        }

        let alpha = tokenize(old_text);
        let beta = tokenize(new_text);
        let deltas = diff(&alpha, &beta)?;
        let segments = merge(&alpha, &deltas, self.config.context_limit);
        let stats = DiffStats::from_segments(&segments, alpha.len(), beta.len());

        tracing::debug!(
            old_tokens = stats.old_tokens,
            new_tokens = stats.new_tokens,
            deltas = deltas.len(),
            change_groups = stats.change_groups,
            elided = stats.elided,
            "Rendered word diff"
        );

        Ok(DiffResult {
            segments,
            stats,
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Render independent revision pairs in parallel.
    ///
    /// Results come back in the order of `pairs`; a failure in one pair does
    /// not affect the others.
    pub fn render_batch(&self, pairs: &[(&str, &str)]) -> Vec<Result<DiffResult>> {
        pairs
            .par_iter()
            .map(|(old_text, new_text)| self.render(old_text, new_text))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
