//! Ramp emitter: one wedge brush with a sloped top.

use crate::brush::{axis_face, sloped_face, Brush, FaceDir, Heading, Slope, TextureAlign};
use crate::core::error::GeometryError;
use crate::core::types::{DVec3, Result};
use crate::math::Volume;

/// Wedge over `volume` whose top climbs from `low_z` at the foot to the top of
/// `volume` at the far end along `ascent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub volume: Volume,
    pub ascent: Heading,
    pub low_z: f64,
}

impl Ramp {
    pub fn high_z(&self) -> f64 {
        self.volume.max().z
    }

    pub fn slope(&self) -> Slope {
        Slope {
            footprint: self.volume,
            ascent: self.ascent,
            low_z: self.low_z,
            high_z: self.high_z(),
        }
    }

    /// Five axis-aligned faces plus the sloped top
    pub fn brush(&self, side: &TextureAlign, top: &TextureAlign) -> Result<Brush> {
        let (min, max) = (self.volume.min(), self.volume.max());
        if self.low_z == max.z {
            return Err(GeometryError::ZeroHeightRamp.into());
        }
        if self.low_z <= min.z || self.low_z > max.z {
            return Err(GeometryError::DegenerateVolume {
                min,
                max: DVec3::new(max.x, max.y, self.low_z),
            }
            .into());
        }
        let mut planes: Vec<_> = FaceDir::ALL
            .iter()
            .filter(|d| **d != FaceDir::Top)
            .map(|d| axis_face(&self.volume, *d, side.clone()))
            .collect();
        planes.push(sloped_face(&self.slope(), top.clone())?);
        Ok(Brush::new(planes)?)
    }
}
