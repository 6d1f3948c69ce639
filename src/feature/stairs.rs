//! Staircase emitter.

use crate::brush::{Brush, Heading, TextureAlign};
use crate::core::error::{ConfigError, GeometryError};
use crate::core::types::{DVec3, Result};
use crate::math::Volume;

/// A straight run of solid steps.
///
/// Step `i` covers `[i * step_depth, (i + 1) * step_depth]` along `ascent`
/// from `start` and rises from `start.z` to `start.z + (i + 1) * step_height`.
/// `start` is the corner at the foot of the run with the lowest cross-axis
/// coordinate. Steps carry no ceiling; whatever sits above the run must be
/// hollow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Staircase {
    pub start: DVec3,
    pub ascent: Heading,
    pub width: f64,
    pub step_height: f64,
    pub step_depth: f64,
    pub num_steps: u32,
}

impl Staircase {
    /// Height of the top step above `start.z`
    pub fn rise(&self) -> f64 {
        self.step_height * self.num_steps as f64
    }

    /// Horizontal length of the run
    pub fn run(&self) -> f64 {
        self.step_depth * self.num_steps as f64
    }

    /// Footprint of step `i`
    fn step_volume(&self, i: u32) -> std::result::Result<Volume, GeometryError> {
        let near = self.step_depth * i as f64;
        let far = self.step_depth * (i + 1) as f64;
        let (s, z1) = (self.start, self.start.z);
        let z2 = z1 + self.step_height * (i + 1) as f64;
        match self.ascent {
            Heading::North => Volume::from_bounds(s.x, s.y + near, z1, s.x + self.width, s.y + far, z2),
            Heading::South => Volume::from_bounds(s.x, s.y - far, z1, s.x + self.width, s.y - near, z2),
            Heading::East => Volume::from_bounds(s.x + near, s.y, z1, s.x + far, s.y + self.width, z2),
            Heading::West => Volume::from_bounds(s.x - far, s.y, z1, s.x - near, s.y + self.width, z2),
        }
    }

    /// One brush per step, bottom step first
    pub fn brushes(&self, texture: &TextureAlign) -> Result<Vec<Brush>> {
        for (name, value) in [
            ("stair width", self.width),
            ("step_height", self.step_height),
            ("step_depth", self.step_depth),
            ("num_steps", self.num_steps as f64),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value }.into());
            }
        }
        (0..self.num_steps)
            .map(|i| -> Result<Brush> { Ok(Brush::from_volume(&self.step_volume(i)?, texture)?) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stairs(ascent: Heading) -> Staircase {
        Staircase {
            start: DVec3::ZERO,
            ascent,
            width: 64.0,
            step_height: 16.0,
            step_depth: 32.0,
            num_steps: 8,
        }
    }

    #[test]
    fn test_step_tops_and_ranges() {
        let brushes = stairs(Heading::North).brushes(&TextureAlign::new("metal1_1")).unwrap();
        assert_eq!(brushes.len(), 8);
        for (i, brush) in brushes.iter().enumerate() {
            let b = brush.bounds();
            let i = i as f64;
            assert_eq!(b.max().z, 16.0 * (i + 1.0));
            assert_eq!(b.min().z, 0.0);
            assert_eq!((b.min().y, b.max().y), (32.0 * i, 32.0 * (i + 1.0)));
            assert_eq!((b.min().x, b.max().x), (0.0, 64.0));
        }
        assert_eq!(brushes[7].bounds().max().y, 256.0);
    }

    #[test]
    fn test_steps_contiguous_every_heading() {
        for ascent in Heading::ALL {
            let s = stairs(ascent);
            let brushes = s.brushes(&TextureAlign::new("metal1_1")).unwrap();
            for pair in brushes.windows(2) {
                let (a, b) = (pair[0].bounds(), pair[1].bounds());
                assert!(!a.overlaps(&b), "{:?}", ascent);
                assert!(b.max().z > a.max().z);
                // Neighbouring steps share a face
                let shared = match ascent {
                    Heading::North => a.max().y == b.min().y,
                    Heading::South => a.min().y == b.max().y,
                    Heading::East => a.max().x == b.min().x,
                    Heading::West => a.min().x == b.max().x,
                };
                assert!(shared, "{:?}", ascent);
            }
            assert_eq!(s.rise(), 128.0);
            assert_eq!(s.run(), 256.0);
        }
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut s = stairs(Heading::East);
        s.num_steps = 0;
        assert!(s.brushes(&TextureAlign::new("metal1_1")).is_err());
    }
}
