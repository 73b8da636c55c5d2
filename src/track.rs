use crate::config::TrackConfig;
use crate::errors::{TrackgenError, TrackgenResult};
use crate::generator::TrackGenerator;
use crate::segment::PlacedSegment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Serializable snapshot of a finished generation run: the configuration
/// that produced it plus the ordered segment sequence. What external
/// renderers and tools consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrackDefinition {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(nested)]
    pub config: TrackConfig,
    pub segments: Vec<PlacedSegment>,
}

impl TrackDefinition {
    /// Create a new track definition with validation
    pub fn new(
        name: String,
        config: TrackConfig,
        segments: Vec<PlacedSegment>,
    ) -> TrackgenResult<Self> {
        let track = Self {
            name,
            config,
            segments,
        };

        track
            .validate()
            .map_err(|_| TrackgenError::TrackValidationFailed {
                reason: "Track validation failed".to_string(),
            })?;

        Ok(track)
    }

    /// Snapshot the ledger of a generator's most recent run
    pub fn from_generator(name: String, generator: &TrackGenerator) -> TrackgenResult<Self> {
        Self::new(
            name,
            generator.config().clone(),
            generator.ledger().segments().to_vec(),
        )
    }

    /// Get the tracks directory path
    pub fn get_tracks_dir() -> TrackgenResult<PathBuf> {
        std::env::current_dir()
            .map_err(TrackgenError::Io)
            .map(|dir| dir.join("tracks"))
    }

    /// Load a track from the tracks directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> TrackgenResult<Self> {
        let tracks_dir = Self::get_tracks_dir()?;
        let file_path = tracks_dir.join(filename);

        if !file_path.exists() {
            return Err(TrackgenError::TrackFileNotFound { path: file_path });
        }

        let data = std::fs::read(&file_path).map_err(TrackgenError::Io)?;

        let (track, _): (TrackDefinition, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(|e| {
                TrackgenError::CorruptedTrackFile {
                    reason: format!("Failed to deserialize track data: {e}"),
                }
            })?;

        // Validate the loaded track with detailed error reporting
        track.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            TrackgenError::TrackValidationFailed {
                reason: format!("Track validation failed: {error_details}"),
            }
        })?;

        Ok(track)
    }

    /// Save the track to the tracks directory
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> TrackgenResult<()> {
        self.validate()
            .map_err(|_| TrackgenError::TrackValidationFailed {
                reason: "Track validation failed before save".to_string(),
            })?;

        let tracks_dir = Self::get_tracks_dir()?;
        let file_path = tracks_dir.join(filename);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).map_err(TrackgenError::Io)?;
        }

        let data = bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(
            |e| TrackgenError::CorruptedTrackFile {
                reason: format!("Failed to serialize track: {e}"),
            },
        )?;

        std::fs::write(&file_path, data).map_err(TrackgenError::Io)?;

        Ok(())
    }
}
