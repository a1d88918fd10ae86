//! Error types for OWS link generation.

use thiserror::Error;

/// Result type alias using OwsError.
pub type OwsResult<T> = Result<T, OwsError>;

/// Primary error type for link generation.
#[derive(Debug, Error)]
pub enum OwsError {
    // === Request Errors ===
    #[error("Unknown service type: {0}")]
    UnknownServiceType(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),

    // === Geometry Errors ===
    #[error("Failed to reproject the bounding box of '{identifier}' from {from} to {to}: {reason}")]
    Reprojection {
        identifier: String,
        from: String,
        to: String,
        reason: String,
    },

    #[error("CRS {0} is not supported for tile previews")]
    UnsupportedTileCrs(String),

    // === Link Errors ===
    #[error("Malformed service link: {0}")]
    MalformedLink(String),

    #[error("Style format not supported: {0}")]
    UnsupportedStyleFormat(String),

    #[error("There can only be one default {format} style for record '{identifier}'")]
    DuplicateDefaultStyle { identifier: String, format: String },
}

impl From<serde_json::Error> for OwsError {
    fn from(err: serde_json::Error) -> Self {
        OwsError::MalformedLink(format!("JSON error: {}", err))
    }
}
