use crate::grid::WorldCoord;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three track pieces a path is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SegmentKind {
    Straight,
    TurnLeft,
    TurnRight,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [
        SegmentKind::Straight,
        SegmentKind::TurnLeft,
        SegmentKind::TurnRight,
    ];

    pub fn is_turn(self) -> bool {
        matches!(self, SegmentKind::TurnLeft | SegmentKind::TurnRight)
    }
}

/// Rotation about the vertical axis, restricted to multiples of 90 degrees.
///
/// Stored as quarter turns so the forward/right unit vectors are exact and
/// positions reached by repeated advances compare bit-for-bit equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading(u8);

impl Heading {
    pub fn degrees(self) -> f32 {
        self.0 as f32 * 90.0
    }

    /// Local +Z direction as a horizontal `(x, z)` unit vector
    pub fn forward(self) -> (f32, f32) {
        match self.0 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    }

    /// Local +X direction as a horizontal `(x, z)` unit vector
    pub fn right(self) -> (f32, f32) {
        Heading((self.0 + 1) % 4).forward()
    }

    /// Heading after placing a segment of `kind`: left turns rotate -90,
    /// right turns +90, straights keep the heading
    pub fn turned(self, kind: SegmentKind) -> Heading {
        match kind {
            SegmentKind::Straight => self,
            SegmentKind::TurnLeft => Heading((self.0 + 3) % 4),
            SegmentKind::TurnRight => Heading((self.0 + 1) % 4),
        }
    }
}

/// One placed track piece. Immutable after creation; owned by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedSegment {
    pub position: WorldCoord,
    pub heading: Heading,
    pub kind: SegmentKind,
}

impl PlacedSegment {
    pub fn new(position: WorldCoord, heading: Heading, kind: SegmentKind) -> Self {
        Self {
            position,
            heading,
            kind,
        }
    }
}

impl fmt::Display for PlacedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} || {} @ {}",
            self.position,
            self.kind,
            self.heading.degrees()
        )
    }
}

/// Horizontal `(dx, dz)` offset from the tail segment to the next segment,
/// for a tail of `tail_kind` at `heading` continuing with `chosen`.
///
/// A turn's stored heading is its exit heading (already rotated 90 degrees
/// from its entry direction), so continuations from a turn run along the
/// local ±X axis instead of +Z. Lateral components only appear when the
/// chosen piece is itself a turn.
pub fn advance_offset(
    tail_kind: SegmentKind,
    heading: Heading,
    chosen: SegmentKind,
    segment_width: f32,
    segment_depth: f32,
) -> (f32, f32) {
    let (fx, fz) = heading.forward();
    let (rx, rz) = heading.right();

    let (bx, bz) = match tail_kind {
        SegmentKind::Straight => (fx * segment_width, fz * segment_width),
        SegmentKind::TurnLeft => (-rx * segment_width, -rz * segment_width),
        SegmentKind::TurnRight => (rx * segment_width, rz * segment_width),
    };

    let (lx, lz) = match (tail_kind, chosen) {
        (_, SegmentKind::Straight) => (0.0, 0.0),
        (SegmentKind::Straight, SegmentKind::TurnLeft) => (-rx * segment_depth, -rz * segment_depth),
        (SegmentKind::Straight, SegmentKind::TurnRight) => (rx * segment_depth, rz * segment_depth),
        (SegmentKind::TurnLeft, SegmentKind::TurnLeft) => (-fx * segment_depth, -fz * segment_depth),
        (SegmentKind::TurnLeft, SegmentKind::TurnRight) => (fx * segment_depth, fz * segment_depth),
        (SegmentKind::TurnRight, SegmentKind::TurnLeft) => (fx * segment_depth, fz * segment_depth),
        (SegmentKind::TurnRight, SegmentKind::TurnRight) => {
            (-fx * segment_depth, -fz * segment_depth)
        }
    };

    (bx + lx, bz + lz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_vectors_are_exact_units() {
        let north = Heading::default();
        assert_eq!(north.degrees(), 0.0);
        assert_eq!(north.forward(), (0.0, 1.0));
        assert_eq!(north.right(), (1.0, 0.0));

        let east = north.turned(SegmentKind::TurnRight);
        assert_eq!(east.degrees(), 90.0);
        assert_eq!(east.forward(), (1.0, 0.0));
        assert_eq!(east.right(), (0.0, -1.0));

        let west = north.turned(SegmentKind::TurnLeft);
        assert_eq!(west.degrees(), 270.0);
        assert_eq!(west.forward(), (-1.0, 0.0));
        assert_eq!(west.right(), (0.0, 1.0));
    }

    #[test]
    fn test_four_right_turns_return_home() {
        let mut h = Heading::default();
        for _ in 0..4 {
            h = h.turned(SegmentKind::TurnRight);
        }
        assert_eq!(h, Heading::default());

        assert_eq!(h.turned(SegmentKind::Straight), h);
    }

    #[test]
    fn test_advance_offsets_from_straight_tail() {
        let h = Heading::default();
        let s = SegmentKind::Straight;

        assert_eq!(advance_offset(s, h, SegmentKind::Straight, 1.0, 1.0), (0.0, 1.0));
        assert_eq!(advance_offset(s, h, SegmentKind::TurnLeft, 1.0, 1.0), (-1.0, 1.0));
        assert_eq!(advance_offset(s, h, SegmentKind::TurnRight, 1.0, 1.0), (1.0, 1.0));
    }

    #[test]
    fn test_advance_offsets_from_turn_tails() {
        let h = Heading::default();

        let l = SegmentKind::TurnLeft;
        assert_eq!(advance_offset(l, h, SegmentKind::Straight, 1.0, 1.0), (-1.0, 0.0));
        assert_eq!(advance_offset(l, h, SegmentKind::TurnLeft, 1.0, 1.0), (-1.0, -1.0));
        assert_eq!(advance_offset(l, h, SegmentKind::TurnRight, 1.0, 1.0), (-1.0, 1.0));

        let r = SegmentKind::TurnRight;
        assert_eq!(advance_offset(r, h, SegmentKind::Straight, 1.0, 1.0), (1.0, 0.0));
        assert_eq!(advance_offset(r, h, SegmentKind::TurnLeft, 1.0, 1.0), (1.0, 1.0));
        assert_eq!(advance_offset(r, h, SegmentKind::TurnRight, 1.0, 1.0), (1.0, -1.0));
    }

    #[test]
    fn test_advance_offsets_rotate_with_heading() {
        // Facing east, a straight continuation from a straight tail moves +X
        let east = Heading::default().turned(SegmentKind::TurnRight);
        assert_eq!(
            advance_offset(SegmentKind::Straight, east, SegmentKind::Straight, 2.0, 2.0),
            (2.0, 0.0)
        );
        // and a right turn option adds the lateral -Z component
        assert_eq!(
            advance_offset(SegmentKind::Straight, east, SegmentKind::TurnRight, 2.0, 2.0),
            (2.0, -2.0)
        );
    }

    #[test]
    fn test_segment_display() {
        let seg = PlacedSegment::new(
            WorldCoord::new(1.5, 0.0, -2.5),
            Heading::default().turned(SegmentKind::TurnRight),
            SegmentKind::TurnRight,
        );
        let line = seg.to_string();
        assert!(line.contains("TurnRight"), "got: {}", line);
        assert!(line.contains("(1.5, 0.0, -2.5)"), "got: {}", line);
        assert!(line.contains("90"), "got: {}", line);
    }
}
