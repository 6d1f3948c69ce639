//! Pillars and cover blocks.

use crate::brush::{Brush, TextureAlign};
use crate::core::types::{DVec2, Result};
use crate::math::Volume;

/// Square vertical column from `base_z` to `ceiling_z`
pub fn pillar(center: DVec2, size: f64, base_z: f64, ceiling_z: f64, texture: &TextureAlign) -> Result<Brush> {
    let h = size / 2.0;
    let v = Volume::from_bounds(center.x - h, center.y - h, base_z, center.x + h, center.y + h, ceiling_z)?;
    Ok(Brush::from_volume(&v, texture)?)
}

/// Cube of side `size` standing on `floor_z`
pub fn cover_block(center: DVec2, size: f64, floor_z: f64, texture: &TextureAlign) -> Result<Brush> {
    pillar(center, size, floor_z, floor_z + size, texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DVec3;

    #[test]
    fn test_pillar_bounds() {
        let p = pillar(DVec2::new(640.0, 640.0), 48.0, 0.0, 192.0, &TextureAlign::new("metal1_1")).unwrap();
        assert_eq!(p.bounds().min(), DVec3::new(616.0, 616.0, 0.0));
        assert_eq!(p.bounds().max(), DVec3::new(664.0, 664.0, 192.0));
    }

    #[test]
    fn test_cover_block_is_cube() {
        let c = cover_block(DVec2::new(0.0, 0.0), 64.0, -32.0, &TextureAlign::new("metal1_1")).unwrap();
        assert_eq!(c.bounds().size(), DVec3::splat(64.0));
        assert_eq!(c.bounds().min().z, -32.0);
    }

    #[test]
    fn test_flat_pillar_rejected() {
        assert!(pillar(DVec2::ZERO, 0.0, 0.0, 128.0, &TextureAlign::new("metal1_1")).is_err());
    }
}
