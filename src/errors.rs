use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackgenError {
    // Config-related errors
    #[error("Invalid generator configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Track file errors
    #[error("Track file not found at path: {path}")]
    TrackFileNotFound { path: PathBuf },

    #[error("Corrupted track file: {reason}")]
    CorruptedTrackFile { reason: String },

    #[error("Track validation failed: {reason}")]
    TrackValidationFailed { reason: String },
}

/// Result type alias for all operations
pub type TrackgenResult<T> = Result<T, TrackgenError>;
