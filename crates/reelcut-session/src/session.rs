//! The editing session.
//!
//! `Session` is the one mutable context value: timeline, cursor, sources,
//! seek state, export settings and job state live here and are passed to the
//! component operations explicitly. Between collaborator calls every
//! operation is synchronous, so the model is never observed mid-mutation.

use crate::backend::{AppConfig, Backend, PickRequest};
use crate::project::ProjectDocument;
use reelcut_core::{
    basename, format_hms, parse_hms, without_extension, ReelcutError, Result, SourceId,
};
use reelcut_export::{
    build_part_refs, progress, ExportJob, ExportRequest, ExportSettings, JobProgress,
    SubmitOutcome,
};
use reelcut_media::{Source, SourceMap};
use reelcut_timeline::{Cursor, Part, SeekController, Timeline};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

/// Default destination filename for a new session.
const DEFAULT_DESTINATION: &str = "out.mp4";

/// Default display aspect ratio for a new session.
const DEFAULT_ASPECT_RATIO: &str = "16/9";

/// One editing session against one backend.
pub struct Session<B: Backend> {
    backend: B,
    config: AppConfig,
    sources: SourceMap,
    timeline: Timeline,
    cursor: Cursor,
    seek: SeekController,
    settings: ExportSettings,
    job: ExportJob,
    progress: JobProgress,
    pub destination_filename: String,
    pub project_filename: Option<String>,
    pub aspect_ratio: String,
}

impl<B: Backend> Session<B> {
    /// Create a session with default state.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: AppConfig::default(),
            sources: SourceMap::new(),
            timeline: Timeline::new(),
            cursor: Cursor::default(),
            seek: SeekController::default(),
            settings: ExportSettings::default(),
            job: ExportJob::default(),
            progress: JobProgress::default(),
            destination_filename: DEFAULT_DESTINATION.to_string(),
            project_filename: None,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
        }
    }

    /// Fetch the backend configuration.
    pub async fn init(&mut self) -> Result<()> {
        self.config = self.backend.load_config().await?;
        info!(media = %self.config.media, "session configured");
        Ok(())
    }

    /// Whether the render backend is reachable.
    pub async fn backend_available(&self) -> bool {
        self.backend.check_backend().await
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn seek(&self) -> &SeekController {
        &self.seek
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ExportSettings {
        &mut self.settings
    }

    pub fn job(&self) -> &ExportJob {
        &self.job
    }

    pub fn progress(&self) -> &JobProgress {
        &self.progress
    }

    /// Metadata of the source under the cursor.
    pub fn source_info(&self) -> Option<&Source> {
        let part = self.cursor.part.as_ref()?;
        self.sources.get(&part.source_id)
    }

    /// The source frame to preview for the current cursor.
    pub fn preview_position(&self) -> Option<(SourceId, f64)> {
        self.cursor.preview_position()
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Move the cursor, keeping the adaptive seek state.
    pub fn go_to(&mut self, time: f64) {
        self.cursor = Cursor::locate(&self.timeline, time);
    }

    /// Jump to a position, restarting the adaptive search at coarse
    /// granularity.
    pub fn navigate_to(&mut self, time: f64) {
        self.seek.reset();
        self.go_to(time);
    }

    /// Jump by a signed offset from the current position.
    pub fn move_by(&mut self, delta: f64) {
        self.navigate_to(self.cursor.time + delta);
    }

    /// One adaptive seek in the given direction.
    pub fn find_next(&mut self, forward: bool) {
        let delta = self.seek.find_next(forward);
        self.go_to(self.cursor.time + delta);
    }

    /// The cursor position as `H:MM:SS` text.
    pub fn time_hms(&self) -> String {
        format_hms(self.cursor.time, false)
    }

    /// Jump to a position given as `H:MM:SS` text.
    pub fn set_time_hms(&mut self, value: &str) {
        self.navigate_to(parse_hms(value));
    }

    /// The seek period as `H:MM:SS` text.
    pub fn period_hms(&self) -> String {
        format_hms(self.seek.period, false)
    }

    pub fn set_period_hms(&mut self, value: &str) {
        self.seek.period = parse_hms(value);
    }

    // ── Sources ─────────────────────────────────────────────────

    /// Resolve and inspect a media file, caching the result per source id.
    pub async fn open_source(&mut self, filename: &str) -> Result<SourceId> {
        info!(filename, "opening source");
        let id = self.backend.resolve_source(filename).await?;
        if !self.sources.contains(&id) {
            let metadata = self.backend.probe(&id).await?;
            self.sources
                .insert(Source::from_probe(id.clone(), filename, metadata));
        }
        Ok(id)
    }

    /// Place a full-source part on the timeline, before `before_index` or at
    /// the end.
    pub fn add_source_part(&mut self, id: &SourceId, before_index: Option<usize>) -> bool {
        let Some(source) = self.sources.get(id) else {
            warn!(source = %id, "cannot add part for unknown source");
            return false;
        };
        if source.duration <= 0.0 {
            warn!(source = %id, "source too short to add");
            return false;
        }
        self.timeline
            .insert(Part::full(id.clone(), source.duration), before_index);
        self.go_to(self.cursor.time);
        true
    }

    /// Let the user pick media files and append them to the timeline.
    pub async fn add_sources(&mut self, before_index: Option<usize>) -> Result<()> {
        let request = PickRequest::open(
            self.config.media.as_str(),
            self.config.media_filter.as_str(),
            true,
        );
        let filenames = self.backend.pick(&request).await?;
        if filenames.is_empty() {
            return Err(ReelcutError::Selection("no file selected".to_string()));
        }
        for filename in &filenames {
            let id = self.open_source(filename).await?;
            self.add_source_part(&id, before_index);
        }
        self.go_to(self.cursor.time);
        Ok(())
    }

    // ── Editing ─────────────────────────────────────────────────

    /// Split the part under the cursor at the cursor position.
    pub fn split_at_cursor(&mut self) -> bool {
        let split = self.timeline.split(self.cursor.time);
        if split {
            self.go_to(self.cursor.time);
        }
        split
    }

    /// Whether a join is possible at the cursor position.
    pub fn can_join_at_cursor(&self) -> bool {
        self.timeline.can_join_at(self.cursor.time, self.seek.step)
    }

    /// Join the parts adjacent to the boundary near the cursor.
    pub fn join_at_cursor(&mut self) -> bool {
        let joined = self.timeline.join(self.cursor.time, self.seek.step);
        if joined {
            self.go_to(self.cursor.time);
        }
        joined
    }

    /// Remove a part by index.
    pub fn remove_part(&mut self, index: usize) -> bool {
        let removed = self.timeline.remove(index).is_some();
        if removed {
            self.go_to(self.cursor.time);
        }
        removed
    }

    /// Exchange two parts by index.
    pub fn swap_parts(&mut self, at_index: usize, to_index: usize) -> bool {
        let swapped = self.timeline.swap(at_index, to_index);
        if swapped {
            self.go_to(self.cursor.time);
        }
        swapped
    }

    // ── Export ──────────────────────────────────────────────────

    /// Snapshot the current composition and options into a job request.
    pub fn build_request(&self) -> ExportRequest {
        ExportRequest {
            filename: self.destination_filename.clone(),
            parts: build_part_refs(&self.timeline, &self.sources),
            options: self.settings.build_options(),
        }
    }

    /// Submit the current composition for rendering.
    ///
    /// Silently absorbed while a job is in flight; suspends on the overwrite
    /// prompt when the destination exists.
    pub async fn export_video(&mut self) -> Result<SubmitOutcome> {
        let request = self.build_request();
        let outcome = self.job.submit(&self.backend, request).await?;
        if matches!(outcome, SubmitOutcome::Started(_)) {
            self.progress.reset(self.timeline.duration());
        }
        Ok(outcome)
    }

    /// Request cancellation of the in-flight job. The job stays "running"
    /// until its stream closes.
    pub async fn cancel_export(&self) -> Result<()> {
        self.job.cancel(&self.backend).await
    }

    /// Consume one log fragment from the in-flight job's stream.
    pub fn handle_progress_fragment(&mut self, fragment: &str) {
        self.progress.feed(fragment);
    }

    /// The in-flight job's stream closed: clear the job id.
    pub fn progress_stream_closed(&mut self) {
        self.job.stream_closed();
    }

    /// Drain a job's whole log stream, then mark the job terminated.
    pub async fn watch_job(&mut self, mut stream: UnboundedReceiver<String>) {
        progress::drain(&mut stream, &mut self.progress).await;
        self.progress_stream_closed();
    }

    // ── Project persistence ─────────────────────────────────────

    /// Copy the persisted session state into a document.
    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument {
            parts: self.timeline.parts().to_vec(),
            sources: self
                .sources
                .iter()
                .map(|source| (source.id.clone(), source.filename.clone()))
                .collect(),
            destination_filename: self.destination_filename.clone(),
            project_filename: self.project_filename.clone(),
            aspect_ratio: self.aspect_ratio.clone(),
            export_format: self.settings.format.clone(),
            export_video_codec: self.settings.video_codec.clone(),
            export_audio_codec: self.settings.audio_codec.clone(),
            export_subtitle_codec: self.settings.subtitle_codec.clone(),
            map_all_streams: self.settings.map_all_streams,
            time: self.cursor.time,
        }
    }

    /// Proposed project file name, derived from the destination.
    pub fn default_project_name(&self) -> String {
        format!(
            "{}.json",
            without_extension(basename(&self.destination_filename))
        )
    }

    /// Save the session to a project file. With no path, the user picks one.
    pub async fn save_project(&mut self, path: Option<String>) -> Result<String> {
        let path = match path {
            Some(path) => path,
            None => {
                let request = PickRequest::save(
                    self.config.media.as_str(),
                    "json",
                    self.default_project_name(),
                );
                self.backend
                    .pick(&request)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| ReelcutError::Selection("no file selected".to_string()))?
            }
        };
        let document = self.to_document();
        self.backend
            .write(&path, &document.to_json()?, true)
            .await?;
        self.project_filename = Some(path.clone());
        info!(%path, "project saved");
        Ok(path)
    }

    /// Load a project file, reopening and revalidating its sources.
    ///
    /// Each declared source must still resolve to its declared id; a
    /// mismatch rejects the whole load as a selection error and leaves the
    /// session untouched except for sources already opened.
    pub async fn load_project(&mut self, path: &str) -> Result<()> {
        let data = self.backend.read(path).await?;
        let document = ProjectDocument::from_json(&data)?;

        for (declared_id, filename) in &document.sources {
            let id = self.backend.resolve_source(filename).await?;
            if &id != declared_id {
                return Err(ReelcutError::Selection(format!(
                    "source '{filename}' does not match its declared id"
                )));
            }
            if !self.sources.contains(&id) {
                let metadata = self.backend.probe(&id).await?;
                self.sources
                    .insert(Source::from_probe(id, filename.as_str(), metadata));
            }
        }
        for part in &document.parts {
            if !self.sources.contains(&part.source_id) {
                return Err(ReelcutError::Selection(format!(
                    "part references undeclared source '{}'",
                    part.source_id
                )));
            }
        }

        self.timeline.replace_parts(document.parts);
        self.destination_filename = document.destination_filename;
        self.project_filename = document.project_filename.or_else(|| Some(path.to_string()));
        self.aspect_ratio = document.aspect_ratio;
        self.settings.format = document.export_format;
        self.settings.video_codec = document.export_video_codec;
        self.settings.audio_codec = document.export_audio_codec;
        self.settings.subtitle_codec = document.export_subtitle_codec;
        self.settings.map_all_streams = document.map_all_streams;
        self.navigate_to(document.time);
        info!(path, parts = self.timeline.len(), "project loaded");
        Ok(())
    }
}
