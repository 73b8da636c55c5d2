/// Constants for track generation
/// Default values for the generator configuration
pub const DEFAULT_TERRAIN_WIDTH: u32 = 10;
pub const DEFAULT_TERRAIN_DEPTH: u32 = 10;
pub const DEFAULT_SEGMENT_WIDTH: f32 = 1.0;
pub const DEFAULT_SEGMENT_DEPTH: f32 = 1.0;
pub const DEFAULT_PATH_LENGTH: u32 = 30;
pub const DEFAULT_START_MARGIN: f32 = 2.0;
pub const DEFAULT_SEED: u64 = 42;

/// Vertical offset applied to every placed segment
pub const SEGMENT_HEIGHT: f32 = 0.0;

/// Inclusive tolerance for grid-bounds containment checks
pub const BOUNDS_EPSILON: f32 = 1e-3;

/// Quantization step for occupancy keys; positions closer than this
/// are treated as the same grid cell
pub const POSITION_TOLERANCE: f32 = 1e-3;

/// How many random cells to sample before giving up on finding a start
/// outside the exclusion zone
pub const START_RETRY_BUDGET: u32 = 500;
