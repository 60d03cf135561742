use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Radius input has no leading integer: {input:?}")]
    InvalidRadius { input: String },

    #[error("Radius must not be negative: {0}")]
    NegativeRadius(i64),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
