pub mod config;
pub mod constants;
pub mod errors;
pub mod generator;
pub mod grid;
pub mod ledger;
pub mod rng;
pub mod segment;
pub mod track;

// Selective re-exports for external consumers

// Errors - every fallible operation returns these
pub use errors::{TrackgenError, TrackgenResult};

// Core generation surface
pub use config::TrackConfig;
pub use generator::{GenerationReport, TrackGenerator};

// Result types consumed by renderers and tools
pub use grid::{GridBounds, WorldCoord};
pub use ledger::{PathLedger, SegmentId};
pub use segment::{Heading, PlacedSegment, SegmentKind};
pub use track::TrackDefinition;
