//! Error types for spanlight.

use thiserror::Error;

/// Result type for spanlight operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spanlight operations.
///
/// The engine itself has no failure modes (malformed detections are
/// skipped, absent labels degrade to empty strings); only response intake
/// can fail, and only on JSON that is broken at the envelope level.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A service response could not be parsed as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
