//! Part types for the timeline.

use reelcut_core::{hsv_to_rgb, part_hue, SourceId};
use serde::{Deserialize, Serialize};

/// A contiguous slice of one source placed on the timeline.
///
/// Field names serialize in camelCase to match the project document.
/// Invariant: `duration == to - from` and `0 <= from < to <= source duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Source this part is cut from
    pub source_id: SourceId,
    /// Slice duration in seconds
    pub duration: f64,
    /// Slice start in source coordinates
    pub from: f64,
    /// Slice end in source coordinates (exclusive)
    pub to: f64,
}

impl Part {
    /// Create a part spanning `[from, to)` of a source.
    pub fn new(source_id: SourceId, from: f64, to: f64) -> Self {
        Self {
            source_id,
            duration: to - from,
            from,
            to,
        }
    }

    /// Create a part covering a whole source.
    pub fn full(source_id: SourceId, duration: f64) -> Self {
        Self::new(source_id, 0.0, duration)
    }

    /// Stable display hue in `[0, 1)`, derived from `(source id, from)`.
    ///
    /// Cosmetic only; recomputed on demand and never persisted.
    pub fn hue(&self) -> f64 {
        part_hue(&self.source_id, self.from)
    }

    /// CSS color for display grouping.
    pub fn color(&self) -> String {
        let (r, g, b) = hsv_to_rgb(self.hue(), 0.5, 0.8);
        format!("rgb({r},{g},{b})")
    }
}
