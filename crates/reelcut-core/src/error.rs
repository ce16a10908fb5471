//! Error types for Reelcut.

use thiserror::Error;

/// Main error type for Reelcut operations.
///
/// Nothing in the editing core is fatal: selection errors are surfaced to the
/// caller for re-prompting, backend errors abort the one operation that made
/// the request, and everything else degrades locally.
#[derive(Error, Debug)]
pub enum ReelcutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Reelcut operations.
pub type Result<T> = std::result::Result<T, ReelcutError>;
