//! In-memory backend used by the integration tests.

use reelcut_core::{basename, ReelcutError, Result, SourceId};
use reelcut_export::{ExportRequest, OverwriteGuard, OverwriteRequest, RenderService};
use reelcut_media::{MediaLookup, ProbeFormat, ProbeInfo, ProbeStream};
use reelcut_session::{AppConfig, ConfigService, FilePicker, FileStore, PickRequest};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Backend with canned probe data, an in-memory file store, and scripted
/// pick/confirm answers.
#[derive(Default)]
pub struct TestBackend {
    pub probes: HashMap<String, ProbeInfo>,
    pub files: Mutex<HashMap<String, String>>,
    pub picks: Mutex<VecDeque<Vec<String>>>,
    pub confirm_overwrite: bool,
    pub available: bool,
    pub submitted: Mutex<Vec<ExportRequest>>,
    pub cancelled: Mutex<Vec<String>>,
    pub next_job: AtomicUsize,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    /// Register a media file with the given reported duration and streams.
    pub fn with_media(mut self, filename: &str, reported_duration: f64, aspect: &str) -> Self {
        let id = source_id_for(filename);
        self.probes.insert(
            id,
            ProbeInfo {
                format: ProbeFormat {
                    duration: reported_duration.to_string(),
                },
                streams: vec![
                    ProbeStream {
                        codec_type: "video".to_string(),
                        display_aspect_ratio: Some(aspect.to_string()),
                    },
                    ProbeStream {
                        codec_type: "audio".to_string(),
                        display_aspect_ratio: None,
                    },
                ],
            },
        );
        self
    }

    /// Queue a pick-dialog answer.
    pub fn queue_pick(&self, filenames: &[&str]) {
        self.picks
            .lock()
            .unwrap()
            .push_back(filenames.iter().map(|f| f.to_string()).collect());
    }
}

/// The deterministic id the fake backend assigns to a path.
pub fn source_id_for(filename: &str) -> String {
    format!("id-{}", basename(filename))
}

impl MediaLookup for TestBackend {
    async fn resolve_source(&self, filename: &str) -> Result<SourceId> {
        Ok(SourceId::new(source_id_for(filename)))
    }

    async fn probe(&self, id: &SourceId) -> Result<ProbeInfo> {
        self.probes
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ReelcutError::Backend(format!("unknown source {id}")))
    }
}

impl RenderService for TestBackend {
    async fn submit(&self, request: &ExportRequest) -> Result<String> {
        self.submitted.lock().unwrap().push(request.clone());
        let id = self.next_job.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("job-{id}"))
    }

    async fn cancel(&self, job_id: &str) -> Result<()> {
        self.cancelled.lock().unwrap().push(job_id.to_string());
        Ok(())
    }
}

impl OverwriteGuard for TestBackend {
    async fn destination_exists(&self, filename: &str) -> Result<bool> {
        Ok(self.files.lock().unwrap().contains_key(filename))
    }

    async fn confirm_overwrite(&self, _request: &OverwriteRequest) -> bool {
        self.confirm_overwrite
    }
}

impl ConfigService for TestBackend {
    async fn load_config(&self) -> Result<AppConfig> {
        serde_json::from_str(r#"{"media": "/media", "mediaFilter": "mp4"}"#)
            .map_err(|e| ReelcutError::Backend(e.to_string()))
    }

    async fn check_backend(&self) -> bool {
        self.available
    }
}

impl FileStore for TestBackend {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }

    async fn read(&self, path: &str) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ReelcutError::Backend(format!("no such file {path}")))
    }

    async fn write(&self, path: &str, data: &str, overwrite: bool) -> Result<()> {
        let mut files = self.files.lock().unwrap();
        if !overwrite && files.contains_key(path) {
            return Err(ReelcutError::Backend(format!("{path} already exists")));
        }
        files.insert(path.to_string(), data.to_string());
        Ok(())
    }
}

impl FilePicker for TestBackend {
    async fn pick(&self, _request: &PickRequest) -> Result<Vec<String>> {
        Ok(self.picks.lock().unwrap().pop_front().unwrap_or_default())
    }
}
