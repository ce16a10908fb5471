//! Project document persistence.
//!
//! A project is a flat JSON document: the part list, the id-to-filename map
//! of its sources, and the session's scalar fields copied by name. This
//! field list is the complete persisted-state contract and round-trips
//! exactly.

use reelcut_core::{ReelcutError, Result, SourceId};
use reelcut_timeline::Part;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The on-disk project document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Source id to filename, for reopening
    #[serde(default)]
    pub sources: BTreeMap<SourceId, String>,
    #[serde(default)]
    pub destination_filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_filename: Option<String>,
    #[serde(default)]
    pub aspect_ratio: String,
    #[serde(default)]
    pub export_format: String,
    #[serde(default)]
    pub export_video_codec: String,
    #[serde(default)]
    pub export_audio_codec: String,
    #[serde(default)]
    pub export_subtitle_codec: String,
    #[serde(default)]
    pub map_all_streams: bool,
    #[serde(default)]
    pub time: f64,
}

impl ProjectDocument {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReelcutError::Serialization(format!("failed to serialize project: {e}")))
    }

    /// Deserialize from JSON.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data)
            .map_err(|e| ReelcutError::Serialization(format!("failed to parse project: {e}")))
    }
}
