//! The derived cursor.
//!
//! A cursor is recomputed wholesale from the timeline and a requested
//! position, never patched in place. That keeps every derived field
//! consistent after any structural change: callers throw the old cursor away
//! and locate a new one.

use crate::part::Part;
use crate::timeline::Timeline;
use reelcut_core::SourceId;

/// The current edit position and its resolved part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    /// Position in timeline coordinates, clamped to `[0, duration]`
    pub time: f64,
    /// Index of the resolved part, 0 when nothing resolved
    pub part_index: usize,
    /// Start of the resolved part in timeline coordinates
    pub part_start: f64,
    /// End of the resolved part in timeline coordinates
    pub part_end: f64,
    /// The resolved part, `None` for the placeholder state
    pub part: Option<Part>,
}

impl Cursor {
    /// Locate a cursor at `time`, clamping into the timeline's range.
    ///
    /// On an empty timeline every field is the placeholder state; callers
    /// fall back to their placeholder preview.
    pub fn locate(timeline: &Timeline, time: f64) -> Self {
        let time = time.clamp(0.0, timeline.duration());
        match timeline.resolve(time) {
            Some(at) => Self {
                time,
                part_index: at.index,
                part_start: at.start,
                part_end: at.start + at.part.duration,
                part: Some(at.part.clone()),
            },
            None => Self {
                time,
                ..Self::default()
            },
        }
    }

    /// Offset of the cursor into the resolved part.
    pub fn rel_time(&self) -> f64 {
        self.time - self.part_start
    }

    /// The source frame under the cursor, as `(source id, source-local
    /// seconds)`. `None` in the placeholder state.
    pub fn preview_position(&self) -> Option<(SourceId, f64)> {
        let part = self.part.as_ref()?;
        Some((part.source_id.clone(), part.from + self.rel_time()))
    }
}
