//! Face construction: axis-aligned faces of a volume and sloped ramp tops.
//!
//! Points are always taken from the volume's real coordinates with unit
//! tangent offsets, so the winding never depends on brush size.

use crate::core::error::GeometryError;
use crate::core::types::DVec3;
use crate::math::Volume;

use super::plane::{Plane, TextureAlign};

/// One of the six faces of an axis-aligned volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDir {
    /// -x
    West,
    /// +x
    East,
    /// -y
    South,
    /// +y
    North,
    /// -z
    Bottom,
    /// +z
    Top,
}

impl FaceDir {
    pub const ALL: [FaceDir; 6] = [
        FaceDir::West,
        FaceDir::East,
        FaceDir::South,
        FaceDir::North,
        FaceDir::Bottom,
        FaceDir::Top,
    ];

    /// Outward unit normal
    pub fn normal(self) -> DVec3 {
        match self {
            FaceDir::West => DVec3::NEG_X,
            FaceDir::East => DVec3::X,
            FaceDir::South => DVec3::NEG_Y,
            FaceDir::North => DVec3::Y,
            FaceDir::Bottom => DVec3::NEG_Z,
            FaceDir::Top => DVec3::Z,
        }
    }
}

/// Horizontal compass direction (+y is north)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::South, Heading::East, Heading::West];

    pub fn unit(self) -> DVec3 {
        match self {
            Heading::North => DVec3::Y,
            Heading::South => DVec3::NEG_Y,
            Heading::East => DVec3::X,
            Heading::West => DVec3::NEG_X,
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }

    /// The wall face that looks this way
    pub fn face(self) -> FaceDir {
        match self {
            Heading::North => FaceDir::North,
            Heading::South => FaceDir::South,
            Heading::East => FaceDir::East,
            Heading::West => FaceDir::West,
        }
    }

    /// True when travel runs along the x axis
    pub fn is_x(self) -> bool {
        matches!(self, Heading::East | Heading::West)
    }
}

/// Plane of one axis-aligned face of `volume`
pub fn axis_face(volume: &Volume, dir: FaceDir, texture: TextureAlign) -> Plane {
    let DVec3 { x: x1, y: y1, z: z1 } = volume.min();
    let DVec3 { x: x2, y: y2, z: z2 } = volume.max();
    let p = DVec3::new;
    let [a, b, c] = match dir {
        FaceDir::West => [p(x1, y1, z1), p(x1, y1 + 1.0, z1), p(x1, y1, z1 + 1.0)],
        FaceDir::East => [p(x2, y1, z1), p(x2, y1, z1 + 1.0), p(x2, y1 + 1.0, z1)],
        FaceDir::South => [p(x1, y1, z1), p(x1, y1, z1 + 1.0), p(x1 + 1.0, y1, z1)],
        FaceDir::North => [p(x1, y2, z1), p(x1 + 1.0, y2, z1), p(x1, y2, z1 + 1.0)],
        FaceDir::Bottom => [p(x1, y1, z1), p(x1 + 1.0, y1, z1), p(x1, y1 + 1.0, z1)],
        FaceDir::Top => [p(x1, y1, z2), p(x1, y1 + 1.0, z2), p(x1 + 1.0, y1, z2)],
    };
    // Unit offsets on a validated volume are never collinear
    Plane::from_trusted([a, b, c], texture)
}

/// A single-slope surface over a rectangular footprint.
///
/// The surface sits at `low_z` along the footprint edge it rises away from
/// and reaches `high_z` at the opposite edge; it has no twist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slope {
    pub footprint: Volume,
    pub ascent: Heading,
    pub low_z: f64,
    pub high_z: f64,
}

impl Slope {
    /// Surface height at a horizontal position (clamped to the footprint run)
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        let (min, max) = (self.footprint.min(), self.footprint.max());
        let t = match self.ascent {
            Heading::North => (y - min.y) / (max.y - min.y),
            Heading::South => (max.y - y) / (max.y - min.y),
            Heading::East => (x - min.x) / (max.x - min.x),
            Heading::West => (max.x - x) / (max.x - min.x),
        };
        self.low_z + (self.high_z - self.low_z) * t.clamp(0.0, 1.0)
    }
}

/// Plane of a sloped top face: low end, high end, and a point beside the low
/// end offset along the level width axis
pub fn sloped_face(slope: &Slope, texture: TextureAlign) -> Result<Plane, GeometryError> {
    if !slope.low_z.is_finite() || !slope.high_z.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate);
    }
    if slope.low_z == slope.high_z {
        return Err(GeometryError::ZeroHeightRamp);
    }
    let (min, max) = (slope.footprint.min(), slope.footprint.max());
    let (anchor, run) = match slope.ascent {
        Heading::North => (DVec3::new(min.x, min.y, 0.0), max.y - min.y),
        Heading::South => (DVec3::new(min.x, max.y, 0.0), max.y - min.y),
        Heading::East => (DVec3::new(min.x, min.y, 0.0), max.x - min.x),
        Heading::West => (DVec3::new(max.x, min.y, 0.0), max.x - min.x),
    };
    let up = slope.ascent.unit();
    // Width axis chosen so the normal leans upward: (up x Z) x up = Z
    let width = up.cross(DVec3::Z);
    let low = anchor + DVec3::Z * slope.low_z;
    let high = anchor + up * run + DVec3::Z * slope.high_z;
    Plane::new(low, high, low + width, texture)
}
