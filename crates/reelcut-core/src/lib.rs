//! Reelcut Core - Foundation types for the timeline editor
//!
//! This crate provides the fundamental types used throughout Reelcut:
//! - Error taxonomy and `Result` alias
//! - Time text rendering and parsing (H:MM:SS)
//! - Deterministic part hues for display grouping
//! - Path helpers for proposing file names
//! - Source identifiers

pub mod error;
pub mod hue;
pub mod path;
pub mod source_id;
pub mod time;

pub use error::{ReelcutError, Result};
pub use hue::{hsv_to_rgb, part_hue};
pub use path::{basename, dirname, without_extension};
pub use source_id::SourceId;
pub use time::{format_hms, parse_hms};
