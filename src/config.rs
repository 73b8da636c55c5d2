use crate::constants::*;
use crate::errors::{TrackgenError, TrackgenResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use validator::Validate;

/// Track generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrackConfig {
    /// Terrain width in grid cells
    #[validate(range(min = 1, max = 2048))]
    pub terrain_width: u32,
    /// Terrain depth in grid cells
    #[validate(range(min = 1, max = 2048))]
    pub terrain_depth: u32,

    /// Segment (cell) width in world units
    #[validate(range(min = 0.1, max = 100.0))]
    pub segment_width: f32,
    /// Segment (cell) depth in world units
    #[validate(range(min = 0.1, max = 100.0))]
    pub segment_depth: f32,

    /// Target number of growth steps after the start segment. The achieved
    /// length may be shorter if the path dead-ends.
    #[validate(range(max = 100_000))]
    pub path_length: u32,

    /// Half-extent of the central square where the path may not begin
    #[validate(range(min = 0.0, max = 10_000.0))]
    pub start_margin: f32,

    /// Seed for the deterministic random source; equal seeds reproduce
    /// equal tracks
    pub seed: u64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            terrain_width: DEFAULT_TERRAIN_WIDTH,
            terrain_depth: DEFAULT_TERRAIN_DEPTH,
            segment_width: DEFAULT_SEGMENT_WIDTH,
            segment_depth: DEFAULT_SEGMENT_DEPTH,
            path_length: DEFAULT_PATH_LENGTH,
            start_margin: DEFAULT_START_MARGIN,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrackConfig {
    /// Validate ranges, flattening field errors into a single reason
    pub fn check(&self) -> TrackgenResult<()> {
        self.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            TrackgenError::InvalidConfig {
                reason: error_details,
            }
        })
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|mut path| {
            path.push("trackgen");
            fs::create_dir_all(&path).ok()?;
            path.push("config.toml");
            Some(path)
        })
        .flatten()
}

/// Load the config file, falling back to defaults when it is missing or
/// unreadable
pub fn load_config() -> TrackConfig {
    if let Some(config_path) = get_config_path() {
        if let Ok(contents) = fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<TrackConfig>(&contents) {
                return config;
            }
        }
    }
    TrackConfig::default()
}

pub fn save_config(config: &TrackConfig) -> TrackgenResult<()> {
    let config_path = get_config_path().ok_or(TrackgenError::ConfigDirNotFound)?;
    let contents = toml::to_string_pretty(config)?;
    fs::write(config_path, contents)?;
    Ok(())
}
