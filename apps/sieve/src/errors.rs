use thiserror::Error;

/// Application-level error type.
///
/// Only two conditions are fatal for the engine itself: a bad configuration
/// (rejected at load, before any analysis) and a structurally invalid input
/// document. Everything else a resume can get wrong is data and flows into
/// scores, flags, and recommendations instead of an error path.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed input document: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for the CLI: configuration failures are
    /// distinguishable from per-document failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Configuration(_) => 2,
            _ => 1,
        }
    }
}
