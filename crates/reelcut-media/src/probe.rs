//! Backend media inspection metadata.
//!
//! Only the fields the editor consumes are modeled; everything else in the
//! inspection document is ignored on decode.

use reelcut_core::{Result, SourceId};
use serde::{Deserialize, Serialize};

/// Inspection metadata for one source, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeInfo {
    pub format: ProbeFormat,
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

/// Container-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeFormat {
    /// Reported duration in seconds, as a decimal string
    #[serde(default)]
    pub duration: String,
}

/// One stream descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeStream {
    pub codec_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_aspect_ratio: Option<String>,
}

impl ProbeInfo {
    /// Decode an inspection document.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| {
            reelcut_core::ReelcutError::Serialization(format!("invalid probe metadata: {e}"))
        })
    }
}

/// Collaborator resolving filenames to stable source ids and fetching their
/// inspection metadata.
#[allow(async_fn_in_trait)]
pub trait MediaLookup {
    /// Resolve a filesystem path to a source id, stable per unique path
    /// within one session.
    async fn resolve_source(&self, filename: &str) -> Result<SourceId>;

    /// Fetch the inspection metadata for a resolved source.
    async fn probe(&self, id: &SourceId) -> Result<ProbeInfo>;
}
