//! The ordered timeline and its structural operations.
//!
//! Parts are contiguous in timeline coordinates: part `i + 1` starts where
//! part `i` ends, coordinate 0 is the start of the first part, and the end of
//! the timeline equals the cached total duration. Mutators keep the cached
//! duration in sync; it is only recomputed by summation on bulk replacement.
//!
//! All mutators are no-ops on invalid indices or positions. Callers are
//! expected to re-derive their cursor after any structural change.

use crate::part::Part;
use tracing::debug;

/// The result of resolving a timeline position to a part.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// Index of the part in the timeline
    pub index: usize,
    /// The resolved part
    pub part: &'a Part,
    /// Offset into the part, in seconds
    pub rel_time: f64,
    /// Start of the part in timeline coordinates
    pub start: f64,
}

/// An ordered sequence of parts with a cached total duration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    parts: Vec<Part>,
    duration: f64,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The parts in timeline order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the timeline has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total duration in seconds. O(1): maintained by every mutator.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Resolve a timeline position to the part containing it.
    ///
    /// Containment is half-open (`[start, start + duration)`), so a position
    /// exactly on a boundary resolves to the part starting there. The one
    /// exception is the inclusive upper bound: `time == duration` resolves to
    /// the last part with `rel_time` equal to its full duration. An empty
    /// timeline or a position outside `[0, duration]` resolves to nothing.
    pub fn resolve(&self, time: f64) -> Option<Resolved<'_>> {
        if self.parts.is_empty() || time < 0.0 || time > self.duration {
            debug!(time, "no part found");
            return None;
        }
        let mut start = 0.0;
        for (index, part) in self.parts.iter().enumerate() {
            let rel_time = time - start;
            if part.duration > rel_time {
                return Some(Resolved {
                    index,
                    part,
                    rel_time,
                    start,
                });
            }
            start += part.duration;
        }
        // time == duration: report the end of the last part
        let index = self.parts.len() - 1;
        let part = &self.parts[index];
        Some(Resolved {
            index,
            part,
            rel_time: part.duration,
            start: start - part.duration,
        })
    }

    /// Insert a part before `before_index`, or append when the index is
    /// missing or not an existing position.
    pub fn insert(&mut self, part: Part, before_index: Option<usize>) {
        self.duration += part.duration;
        match before_index {
            Some(index) if index < self.parts.len() => self.parts.insert(index, part),
            _ => self.parts.push(part),
        }
    }

    /// Remove the part at `index`. Returns the removed part, or `None` when
    /// the index does not exist.
    pub fn remove(&mut self, index: usize) -> Option<Part> {
        if index >= self.parts.len() {
            return None;
        }
        let part = self.parts.remove(index);
        self.duration -= part.duration;
        debug!(index, remaining = self.parts.len(), "part removed");
        Some(part)
    }

    /// Exchange the parts at two positions. No-op unless both exist.
    pub fn swap(&mut self, at_index: usize, to_index: usize) -> bool {
        if at_index >= self.parts.len() || to_index >= self.parts.len() {
            return false;
        }
        self.parts.swap(at_index, to_index);
        true
    }

    /// Split the part containing `time` into two parts at that position.
    ///
    /// Only strictly interior positions split; boundaries and misses are
    /// no-ops. Total duration is preserved exactly.
    pub fn split(&mut self, time: f64) -> bool {
        let Some(at) = self.resolve(time) else {
            return false;
        };
        if at.rel_time <= 0.0 || at.rel_time >= at.part.duration {
            return false;
        }
        let index = at.index;
        let part = at.part.clone();
        let split_point = part.from + at.rel_time;
        let first = Part::new(part.source_id.clone(), part.from, split_point);
        let second = Part::new(part.source_id, split_point, part.to);
        self.parts.splice(index..=index, [first, second]);
        debug!(index, count = self.parts.len(), "part split");
        true
    }

    /// Whether `join(time, step)` would merge two parts.
    pub fn can_join_at(&self, time: f64, step: f64) -> bool {
        self.join_candidate(time, step).is_some()
    }

    /// Merge the two parts adjacent to the boundary within `step` of `time`.
    ///
    /// Both the boundary ending at the cursor and the one starting at it are
    /// considered, preferring the nearer. Joining is refused when the two
    /// parts reference different sources, or when their source ranges are
    /// reversed (possible after swaps) and merging would produce an empty
    /// slice. The merged part spans from the first part's `from` to the
    /// second part's `to`, so joining across a removed middle cut restores
    /// the original range.
    pub fn join(&mut self, time: f64, step: f64) -> bool {
        let Some((first, second)) = self.join_candidate(time, step) else {
            return false;
        };
        let merged = Part::new(
            self.parts[first].source_id.clone(),
            self.parts[first].from,
            self.parts[second].to,
        );
        let removed = self.parts[first].duration + self.parts[second].duration;
        self.duration += merged.duration - removed;
        self.parts.splice(first..=second, [merged]);
        debug!(index = first, count = self.parts.len(), "parts joined");
        true
    }

    /// Find the pair of adjacent part indices joinable at `time`.
    fn join_candidate(&self, time: f64, step: f64) -> Option<(usize, usize)> {
        let at = self.resolve(time)?;
        let to_start = at.rel_time;
        let to_end = at.part.duration - at.rel_time;
        let before = (to_start <= step && at.index > 0).then(|| (at.index - 1, at.index));
        let after =
            (to_end <= step && at.index + 1 < self.parts.len()).then(|| (at.index, at.index + 1));
        let (first, second) = match (before, after) {
            (Some(pair), None) | (None, Some(pair)) => pair,
            (Some(near), Some(_)) if to_start <= to_end => near,
            (_, Some(far)) => far,
            (None, None) => return None,
        };
        // same source, and the merged range must stay a valid slice
        let (left, right) = (&self.parts[first], &self.parts[second]);
        (left.source_id == right.source_id && left.from < right.to).then_some((first, second))
    }

    /// Replace all parts at once (project load) and recompute the duration
    /// by summation.
    pub fn replace_parts(&mut self, parts: Vec<Part>) {
        self.parts = parts;
        self.duration = self.parts.iter().map(|part| part.duration).sum();
    }
}
