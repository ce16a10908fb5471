//! Job request assembly and lifecycle.
//!
//! A job request is a value snapshot: once submitted, later timeline edits
//! have no effect on it. The in-flight job id is the whole lifecycle state,
//! set on acceptance and cleared only when the log stream closes.

use reelcut_core::{Result, SourceId};
use reelcut_media::SourceMap;
use reelcut_timeline::Timeline;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Minimal reference to a part in the job request.
///
/// `from`/`to` are omitted when they equal the source's natural bounds, so
/// trivial full-source parts serialize without redundant fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRef {
    pub source_id: SourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
}

/// Build the minimal part references for a timeline.
///
/// Parts whose source is not in the map are skipped.
pub fn build_part_refs(timeline: &Timeline, sources: &SourceMap) -> Vec<PartRef> {
    timeline
        .parts()
        .iter()
        .filter_map(|part| {
            let source = sources.get(&part.source_id)?;
            Some(PartRef {
                source_id: part.source_id.clone(),
                from: (part.from != 0.0).then_some(part.from),
                to: (part.to < source.duration).then_some(part.to),
            })
        })
        .collect()
}

/// An immutable export job request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub filename: String,
    pub parts: Vec<PartRef>,
    pub options: Vec<String>,
}

/// Collaborator driving the external renderer.
#[allow(async_fn_in_trait)]
pub trait RenderService {
    /// Submit a job request; resolves with the backend-assigned job id.
    async fn submit(&self, request: &ExportRequest) -> Result<String>;

    /// Request termination of a running job. Fire-and-forget: completion is
    /// signalled by the log stream closing, not by this call returning.
    async fn cancel(&self, job_id: &str) -> Result<()>;
}

/// Collaborator guarding destination overwrites.
#[allow(async_fn_in_trait)]
pub trait OverwriteGuard {
    /// Whether the destination already exists on the backend.
    async fn destination_exists(&self, filename: &str) -> Result<bool>;

    /// Suspend until the user resolves the overwrite prompt. `true` means
    /// proceed.
    async fn confirm_overwrite(&self, request: &OverwriteRequest) -> bool;
}

/// A pending overwrite confirmation, with a request-scoped handle so
/// overlapping prompts cannot be confused.
#[derive(Debug, Clone)]
pub struct OverwriteRequest {
    pub id: Uuid,
    pub filename: String,
}

impl OverwriteRequest {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
        }
    }
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the job under this id.
    Started(String),
    /// Another job is in flight; the request was silently absorbed.
    AlreadyRunning,
    /// The user declined to overwrite the destination.
    Aborted,
}

/// The session's one export job slot.
#[derive(Debug, Clone, Default)]
pub struct ExportJob {
    active: Option<String>,
}

impl ExportJob {
    /// Whether a job is in flight.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight job id.
    pub fn id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Submit a job request.
    ///
    /// No-op while a job is in flight. When the destination exists the
    /// operation suspends on the overwrite prompt and aborts if declined.
    pub async fn submit<B>(&mut self, backend: &B, request: ExportRequest) -> Result<SubmitOutcome>
    where
        B: RenderService + OverwriteGuard,
    {
        if self.active.is_some() {
            debug!("export already in flight, ignoring submit");
            return Ok(SubmitOutcome::AlreadyRunning);
        }
        if backend.destination_exists(&request.filename).await? {
            let prompt = OverwriteRequest::new(&request.filename);
            if !backend.confirm_overwrite(&prompt).await {
                info!(filename = %request.filename, "overwrite declined");
                return Ok(SubmitOutcome::Aborted);
            }
        }
        let id = backend.submit(&request).await?;
        info!(job = %id, filename = %request.filename, "export job submitted");
        self.active = Some(id.clone());
        Ok(SubmitOutcome::Started(id))
    }

    /// Request cancellation of the in-flight job, if any.
    ///
    /// Does not clear the id: the job stays "running" until its stream
    /// closes.
    pub async fn cancel<R: RenderService>(&self, service: &R) -> Result<()> {
        if let Some(id) = &self.active {
            info!(job = %id, "cancelling export job");
            service.cancel(id).await?;
        }
        Ok(())
    }

    /// The job's log stream closed: the job is over, whatever the reason.
    pub fn stream_closed(&mut self) {
        if let Some(id) = self.active.take() {
            info!(job = %id, "export job stream closed");
        }
    }
}
