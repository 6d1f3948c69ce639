//! Raised platform emitter.

use crate::brush::{Brush, FaceDir, TextureAlign};
use crate::core::types::Result;
use crate::math::Volume;

/// A solid raised block whose top face takes `top` instead of the ambient floor texture
pub fn platform(volume: &Volume, side: &TextureAlign, top: &TextureAlign) -> Result<Brush> {
    Ok(Brush::from_volume_with(volume, |dir| {
        if dir == FaceDir::Top { top.clone() } else { side.clone() }
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_top_override() {
        let v = Volume::from_bounds(0.0, 0.0, 0.0, 128.0, 128.0, 64.0).unwrap();
        let brush = platform(&v, &TextureAlign::new("ground1_6"), &TextureAlign::new("metal1_1")).unwrap();
        let names: Vec<&str> = brush.planes().iter().map(|p| p.texture.name.as_str()).collect();
        assert_eq!(names, ["ground1_6", "ground1_6", "ground1_6", "ground1_6", "ground1_6", "metal1_1"]);
    }
}
