use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PropdocError {
    #[error("failed to load vocabulary profiles from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid vocabulary profiles: {0}")]
    ProfileInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
