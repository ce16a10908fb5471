//! Collaborator boundaries for the session.
//!
//! Each trait is one external concern; the `Backend` supertrait bundles them
//! for embedders that provide everything. Interactions that wait on the user
//! (file picking, overwrite confirmation) carry a request-scoped id so an
//! abandoned request can never be confused with a newer one.

use reelcut_core::Result;
use reelcut_export::{OverwriteGuard, RenderService};
use reelcut_media::MediaLookup;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application configuration supplied by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Root directory presented by the file picker
    #[serde(default)]
    pub media: String,
    /// Extension filter for media selection
    #[serde(default)]
    pub media_filter: String,
    #[serde(default)]
    pub webview: WebviewConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebviewConfig {
    #[serde(default)]
    pub native: bool,
}

/// Configuration and availability collaborator.
#[allow(async_fn_in_trait)]
pub trait ConfigService {
    async fn load_config(&self) -> Result<AppConfig>;

    /// Whether the render backend is reachable.
    async fn check_backend(&self) -> bool;
}

/// File storage collaborator. Paths and payloads are opaque.
#[allow(async_fn_in_trait)]
pub trait FileStore {
    async fn exists(&self, path: &str) -> Result<bool>;
    async fn read(&self, path: &str) -> Result<String>;
    async fn write(&self, path: &str, data: &str, overwrite: bool) -> Result<()>;
}

/// A pending file-pick interaction.
#[derive(Debug, Clone)]
pub struct PickRequest {
    /// Request-scoped handle
    pub id: Uuid,
    /// Directory to list
    pub directory: String,
    /// Extension filter, empty for all files
    pub filter: String,
    /// Proposed file name for save dialogs
    pub name: String,
    pub multiple: bool,
    pub save: bool,
}

impl PickRequest {
    /// A request to open one or more existing files.
    pub fn open(directory: impl Into<String>, filter: impl Into<String>, multiple: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            directory: directory.into(),
            filter: filter.into(),
            name: String::new(),
            multiple,
            save: false,
        }
    }

    /// A request to choose a destination, proposing `name`.
    pub fn save(
        directory: impl Into<String>,
        filter: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            directory: directory.into(),
            filter: filter.into(),
            name: name.into(),
            multiple: false,
            save: true,
        }
    }
}

/// File selection collaborator.
#[allow(async_fn_in_trait)]
pub trait FilePicker {
    /// Suspend until the user picks. An empty result means nothing was
    /// selected; callers surface that as a selection error.
    async fn pick(&self, request: &PickRequest) -> Result<Vec<String>>;
}

/// Everything a full embedder provides.
pub trait Backend:
    MediaLookup + RenderService + OverwriteGuard + ConfigService + FileStore + FilePicker
{
}

impl<T> Backend for T where
    T: MediaLookup + RenderService + OverwriteGuard + ConfigService + FileStore + FilePicker
{
}
