//! Projection errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("No projection definition for {0}")]
    UnknownCrs(String),

    #[error("Invalid projection definition for {crs}: {reason}")]
    InvalidDefinition { crs: String, reason: String },

    #[error("Transform from {from} to {to} failed: {reason}")]
    TransformFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to load CRS overrides from {path}: {reason}")]
    OverridesLoad { path: String, reason: String },
}
