use crate::constants::{BOUNDS_EPSILON, POSITION_TOLERANCE, SEGMENT_HEIGHT};
use crate::errors::{TrackgenError, TrackgenResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// World coordinates (floating point)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldCoord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldCoord {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Horizontal translation; height is preserved
    pub fn offset(self, dx: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.y, self.z + dz)
    }

    /// Occupancy key, quantized at [`POSITION_TOLERANCE`]. Positions closer
    /// than the tolerance map to the same key.
    pub(crate) fn quantized(&self) -> (i64, i64, i64) {
        let q = |v: f32| (v / POSITION_TOLERANCE).round() as i64;
        (q(self.x), q(self.y), q(self.z))
    }
}

impl fmt::Display for WorldCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Rectangular region of legal cell-center positions, centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl GridBounds {
    /// Inclusive containment with [`BOUNDS_EPSILON`] tolerance
    pub fn contains(&self, p: WorldCoord) -> bool {
        p.x >= self.x_min - BOUNDS_EPSILON
            && p.x <= self.x_max + BOUNDS_EPSILON
            && p.z >= self.z_min - BOUNDS_EPSILON
            && p.z <= self.z_max + BOUNDS_EPSILON
    }
}

/// Origin-centered cell lattice derived from terrain extents (in cells) and
/// segment extents (in world units). Cell pitch equals the segment size so
/// neighboring segments meet edge-to-edge.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    depth: u32,
    segment_width: f32,
    segment_depth: f32,
    bounds: GridBounds,
}

impl Grid {
    pub fn new(
        width: u32,
        depth: u32,
        segment_width: f32,
        segment_depth: f32,
    ) -> TrackgenResult<Self> {
        if width == 0 || depth == 0 {
            return Err(TrackgenError::InvalidConfig {
                reason: format!("terrain size must be positive, got {width}x{depth}"),
            });
        }
        if segment_width <= 0.0 || segment_depth <= 0.0 {
            return Err(TrackgenError::InvalidConfig {
                reason: format!(
                    "segment size must be positive, got {segment_width}x{segment_depth}"
                ),
            });
        }

        let half_x = width as f32 * segment_width / 2.0;
        let half_z = depth as f32 * segment_depth / 2.0;
        let bounds = GridBounds {
            x_min: -half_x + segment_width / 2.0,
            x_max: half_x - segment_width / 2.0,
            z_min: -half_z + segment_depth / 2.0,
            z_max: half_z - segment_depth / 2.0,
        };

        Ok(Self {
            width,
            depth,
            segment_width,
            segment_depth,
            bounds,
        })
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn segment_width(&self) -> f32 {
        self.segment_width
    }

    pub fn segment_depth(&self) -> f32 {
        self.segment_depth
    }

    /// World position of the center of cell `(x, z)`
    pub fn cell_center(&self, x: u32, z: u32) -> WorldCoord {
        WorldCoord::new(
            self.bounds.x_min + x as f32 * self.segment_width,
            SEGMENT_HEIGHT,
            self.bounds.z_min + z as f32 * self.segment_depth,
        )
    }

    /// Whether `p` falls inside the central no-start square of half-extent
    /// `margin`. A margin of zero excludes only the exact grid center.
    pub fn in_start_exclusion(&self, p: WorldCoord, margin: f32) -> bool {
        p.x.abs() <= margin + BOUNDS_EPSILON && p.z.abs() <= margin + BOUNDS_EPSILON
    }

    /// Row-major enumeration of every cell center, for consumers that lay
    /// out the full terrain (e.g. tile renderers)
    pub fn cells(&self) -> impl Iterator<Item = WorldCoord> + '_ {
        (0..self.depth).flat_map(move |z| (0..self.width).map(move |x| self.cell_center(x, z)))
    }
}
