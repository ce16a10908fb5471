//! Reelcut Export - Job assembly and progress tracking
//!
//! This crate handles:
//! - Deterministic assembly of renderer option tokens
//! - Minimal part references for the job request body
//! - The export job lifecycle (submission, overwrite confirmation, cancel)
//! - Incremental parsing of the job's log stream into progress state

pub mod job;
pub mod options;
pub mod progress;

pub use job::{
    build_part_refs, ExportJob, ExportRequest, OverwriteGuard, OverwriteRequest, PartRef,
    RenderService, SubmitOutcome,
};
pub use options::{ExportSettings, CODEC_DISABLE};
pub use progress::JobProgress;
