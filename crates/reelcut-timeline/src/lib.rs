//! Reelcut Timeline - Part and timeline data model
//!
//! Implements the composition structure for the cut editor:
//! - Parts referencing slices of source media
//! - The ordered timeline with split/join/reorder operations
//! - The derived cursor resolving a timeline position to a part
//! - The adaptive seek controller for frame-accurate scrubbing

pub mod cursor;
pub mod part;
pub mod seek;
pub mod timeline;

pub use cursor::Cursor;
pub use part::Part;
pub use seek::SeekController;
pub use timeline::{Resolved, Timeline};
