//! The verdict value handed back to callers.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An affinity verdict: a percentage-like score plus a short commentary.
///
/// Pure value type. Constructed once per invocation (either by the extractor
/// or by the fallback generator) and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AffinityResult {
    /// Percentage-like score. No bounds are enforced on the extraction path;
    /// the fallback path always produces a value in `[60, 99]`.
    pub score: i64,

    /// Short human-readable commentary.
    pub commentary: String,

    /// When this result was created. Informational only.
    pub produced_at: DateTime<Utc>,
}

impl AffinityResult {
    /// Build a result stamped with the current time.
    pub fn new(score: i64, commentary: impl Into<String>) -> Self {
        Self {
            score,
            commentary: commentary.into(),
            produced_at: Utc::now(),
        }
    }
}
