//! Brush plane: three points plus texture alignment.

use crate::core::error::GeometryError;
use crate::core::types::DVec3;
use crate::math::HalfSpace;

/// Texture name and alignment fields, in the order the compiler reads them
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAlign {
    pub name: String,
    pub x_offset: f64,
    pub y_offset: f64,
    pub rotation: f64,
    x_scale: f64,
    y_scale: f64,
}

impl TextureAlign {
    /// Unshifted, unrotated, unit scale
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x_offset: 0.0,
            y_offset: 0.0,
            rotation: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
        }
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set scale; zero on either axis is rejected
    pub fn with_scale(mut self, x: f64, y: f64) -> Result<Self, GeometryError> {
        if x == 0.0 || y == 0.0 {
            return Err(GeometryError::ZeroTextureScale);
        }
        self.x_scale = x;
        self.y_scale = y;
        Ok(self)
    }

    pub fn x_scale(&self) -> f64 {
        self.x_scale
    }

    pub fn y_scale(&self) -> f64 {
        self.y_scale
    }
}

/// One bounding plane of a brush.
///
/// The points wind clockwise seen from outside the brush; the compiler takes
/// `(p1 - p2) x (p3 - p2)` as the outward normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    points: [DVec3; 3],
    pub texture: TextureAlign,
}

impl Plane {
    pub fn new(p1: DVec3, p2: DVec3, p3: DVec3, texture: TextureAlign) -> Result<Self, GeometryError> {
        let points = [p1, p2, p3];
        if points.iter().any(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate);
        }
        if (p3 - p1).cross(p2 - p1).length_squared() < 1e-12 {
            return Err(GeometryError::CollinearPoints(points));
        }
        Ok(Self { points, texture })
    }

    /// Points already known to be independent and finite
    pub(crate) fn from_trusted(points: [DVec3; 3], texture: TextureAlign) -> Self {
        debug_assert!(Self::new(points[0], points[1], points[2], texture.clone()).is_ok());
        Self { points, texture }
    }

    pub fn points(&self) -> &[DVec3; 3] {
        &self.points
    }

    /// Outward normal (not normalised)
    pub fn normal(&self) -> DVec3 {
        let [p1, p2, p3] = self.points;
        (p3 - p1).cross(p2 - p1)
    }

    /// Normalised half-space; negative distances are inside the brush
    pub fn half_space(&self) -> HalfSpace {
        // Plane::new rejects collinear points, so the normal is non-zero
        let n = self.normal().normalize();
        HalfSpace::new(n, -n.dot(self.points[0]))
    }

    /// Signed distance from `point` (negative = interior side)
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.half_space().distance_to_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_normal_convention() {
        // West face of a box at x = 0: outward is -x
        let p = Plane::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            TextureAlign::new("base"),
        )
        .unwrap();
        assert_eq!(p.normal(), DVec3::new(-1.0, 0.0, 0.0));
        // Same as the compiler's (p1 - p2) x (p3 - p2)
        let [p1, p2, p3] = *p.points();
        assert_eq!((p1 - p2).cross(p3 - p2).normalize(), p.half_space().normal);
        assert!(p.signed_distance(DVec3::new(5.0, 0.0, 0.0)) < 0.0);
    }

    #[test]
    fn test_collinear_rejected() {
        let err = Plane::new(
            DVec3::ZERO,
            DVec3::X,
            DVec3::X * 2.0,
            TextureAlign::new("base"),
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::CollinearPoints(_)));
    }

    #[test]
    fn test_texture_scale() {
        let tex = TextureAlign::new("base");
        assert_eq!((tex.x_scale(), tex.y_scale()), (1.0, 1.0));
        assert_eq!(tex.clone().with_scale(0.0, 1.0), Err(GeometryError::ZeroTextureScale));
        let scaled = tex.with_offset(8.0, -8.0).with_rotation(90.0).with_scale(0.5, -1.0).unwrap();
        assert_eq!(scaled.x_scale(), 0.5);
        assert_eq!(scaled.y_scale(), -1.0);
        assert_eq!(scaled.rotation, 90.0);
    }
}
