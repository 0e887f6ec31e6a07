//! Error types
//!
//! Nothing in the game is allowed to fail hard; these surface storage and
//! configuration problems so callers can log them and fall back to defaults.

/// Errors from the key/value store (LocalStorage on web)
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage access failed: {0}")]
    Access(String),

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from loading balance tuning
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Errors from bringing up the GPU renderer
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to create GPU device: {0}")]
    Device(String),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
