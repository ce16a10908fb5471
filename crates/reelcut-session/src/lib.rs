//! Reelcut Session - The editing session context
//!
//! One explicit, mutable session value bundles the timeline, cursor, source
//! map, export settings and job state, and every operation goes through it;
//! there are no module-level singletons. Collaborators (config, file store,
//! file picker, overwrite prompt, media lookup, render service) are traits
//! the embedder implements; their calls are the session's only suspension
//! points.

pub mod backend;
pub mod project;
pub mod session;

pub use backend::{
    AppConfig, Backend, ConfigService, FilePicker, FileStore, PickRequest, WebviewConfig,
};
pub use project::ProjectDocument;
pub use session::Session;
