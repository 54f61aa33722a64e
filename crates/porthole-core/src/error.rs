//! Error types. The engine itself never surfaces these to a user: setters
//! log and ignore them. Loaders and tools propagate them.

use thiserror::Error;

/// Rejected input to a setter or patch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown location id: {0}")]
    UnknownLocation(String),

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("invalid tick delta: {0}")]
    InvalidDelta(f64),

    #[error("cruise to {0} already in progress")]
    CruiseInProgress(String),
}

/// Failure to read a persisted snapshot.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot root must be a JSON object")]
    NotAnObject,
}

/// Check that a numeric input is finite.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}
