//! Opened sources and the session source map.

use crate::probe::{ProbeInfo, ProbeStream};
use reelcut_core::SourceId;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Seconds subtracted from the reported duration before flooring, so the
/// editable range never references a truncated final frame.
const TAIL_MARGIN: f64 = 1.1;

/// An opened media file and its inspected metadata. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: SourceId,
    /// Path the source was opened from
    pub filename: String,
    /// Conservative editable duration: `floor(reported - 1.1)`, never negative
    pub duration: f64,
    pub streams: Vec<ProbeStream>,
}

impl Source {
    /// Build a source from its inspection metadata.
    ///
    /// A malformed reported duration degrades to zero rather than failing
    /// the open.
    pub fn from_probe(id: SourceId, filename: impl Into<String>, info: ProbeInfo) -> Self {
        let filename = filename.into();
        let reported: f64 = info.format.duration.trim().parse().unwrap_or_else(|_| {
            warn!(source = %id, duration = %info.format.duration, "malformed duration");
            0.0
        });
        let duration = (reported - TAIL_MARGIN).floor().max(0.0);
        debug!(source = %id, duration, "source opened");
        Self {
            id,
            filename,
            duration,
            streams: info.streams,
        }
    }

    /// The first video stream, if any.
    pub fn primary_video(&self) -> Option<&ProbeStream> {
        self.streams.iter().find(|s| s.codec_type == "video")
    }

    /// Display aspect ratio of the primary video stream, 0 when absent or
    /// malformed.
    pub fn aspect_ratio(&self) -> f64 {
        self.primary_video()
            .and_then(|s| s.display_aspect_ratio.as_deref())
            .map(compute_aspect_ratio)
            .unwrap_or(0.0)
    }
}

/// Parse a `W:H` aspect ratio into a quotient truncated to six decimal
/// places. Malformed input degrades to 0.
pub fn compute_aspect_ratio(value: &str) -> f64 {
    let mut components = value.split(':');
    let width: f64 = components
        .next()
        .and_then(|c| c.trim().parse().ok())
        .unwrap_or(f64::NAN);
    let height: f64 = components
        .next()
        .and_then(|c| c.trim().parse().ok())
        .unwrap_or(f64::NAN);
    let ratio = width / height;
    if !ratio.is_finite() {
        return 0.0;
    }
    (ratio * 1_000_000.0).floor() / 1_000_000.0
}

/// All sources opened this session, keyed by id.
///
/// Populated lazily on first open and never evicted.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    sources: HashMap<SourceId, Source>,
}

impl SourceMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an opened source under its id.
    pub fn insert(&mut self, source: Source) {
        self.sources.insert(source.id.clone(), source);
    }

    /// Look up a source by id.
    pub fn get(&self, id: &SourceId) -> Option<&Source> {
        self.sources.get(id)
    }

    /// Whether a source id has been opened.
    pub fn contains(&self, id: &SourceId) -> bool {
        self.sources.contains_key(id)
    }

    /// Iterate over all opened sources.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
