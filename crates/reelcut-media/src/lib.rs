//! Reelcut Media - Source metadata model
//!
//! This crate handles:
//! - Decoding the backend's media inspection JSON
//! - Deriving the conservative editable duration of a source
//! - Aspect-ratio parsing
//! - The session source map and the media lookup boundary

pub mod probe;
pub mod source;

pub use probe::{MediaLookup, ProbeFormat, ProbeInfo, ProbeStream};
pub use source::{compute_aspect_ratio, Source, SourceMap};
