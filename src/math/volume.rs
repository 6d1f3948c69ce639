//! Axis-aligned volume

use crate::core::error::GeometryError;
use crate::core::types::DVec3;

/// Axis-aligned box defined by min and max corners.
///
/// Always has positive extent on every axis; constructors reject anything
/// thinner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volume {
    min: DVec3,
    max: DVec3,
}

impl Volume {
    /// Create a volume from min and max corners
    pub fn new(min: DVec3, max: DVec3) -> Result<Self, GeometryError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        if min.x >= max.x || min.y >= max.y || min.z >= max.z {
            return Err(GeometryError::DegenerateVolume { min, max });
        }
        Ok(Self { min, max })
    }

    /// Create a volume from `(x1, y1, z1) - (x2, y2, z2)`
    pub fn from_bounds(
        x1: f64, y1: f64, z1: f64,
        x2: f64, y2: f64, z2: f64,
    ) -> Result<Self, GeometryError> {
        Self::new(DVec3::new(x1, y1, z1), DVec3::new(x2, y2, z2))
    }

    pub fn min(&self) -> DVec3 {
        self.min
    }

    pub fn max(&self) -> DVec3 {
        self.max
    }

    /// Get center point
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Check if point is inside or on the boundary
    pub fn contains_point(&self, p: DVec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Check if `other` lies entirely inside, boundaries included
    pub fn contains_volume(&self, other: &Volume) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Check if two volumes share interior points. Touching faces do not count.
    pub fn overlaps(&self, other: &Volume) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x &&
        self.min.y < other.max.y && self.max.y > other.min.y &&
        self.min.z < other.max.z && self.max.z > other.min.z
    }

    /// Grow by `amount` on every side
    pub fn expanded(&self, amount: f64) -> Result<Volume, GeometryError> {
        Volume::new(self.min - DVec3::splat(amount), self.max + DVec3::splat(amount))
    }

    /// Same footprint with a new vertical range
    pub fn with_z(&self, z1: f64, z2: f64) -> Result<Volume, GeometryError> {
        Volume::from_bounds(self.min.x, self.min.y, z1, self.max.x, self.max.y, z2)
    }

    /// The 8 corners, bit 0 = x, bit 1 = y, bit 2 = z
    pub fn corners(&self) -> [DVec3; 8] {
        std::array::from_fn(|i| {
            DVec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }
}
