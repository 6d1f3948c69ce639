//! Normalised half-space used for signed-distance checks

use crate::core::types::DVec3;

/// A plane defined by unit normal and distance from origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfSpace {
    pub normal: DVec3,
    pub distance: f64,
}

impl HalfSpace {
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Build from a point on the plane and a (not necessarily unit) normal.
    /// Returns None for a zero normal.
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Option<Self> {
        let n = normal.try_normalize()?;
        Some(Self { normal: n, distance: -n.dot(point) })
    }

    /// Signed distance from point to plane (positive = in front, outside the brush)
    pub fn distance_to_point(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.distance
    }

    /// Same plane and same facing, within `eps`
    pub fn approx_eq(&self, other: &HalfSpace, eps: f64) -> bool {
        self.normal.abs_diff_eq(other.normal, eps) && (self.distance - other.distance).abs() <= eps
    }

    /// Point where three planes meet, if they are independent
    pub fn intersect3(a: &HalfSpace, b: &HalfSpace, c: &HalfSpace) -> Option<DVec3> {
        let bc = b.normal.cross(c.normal);
        let denom = a.normal.dot(bc);
        if denom.abs() < 1e-9 {
            return None;
        }
        let p = (bc * -a.distance
            + c.normal.cross(a.normal) * -b.distance
            + a.normal.cross(b.normal) * -c.distance)
            / denom;
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_point() {
        let p = HalfSpace::from_point_normal(DVec3::new(0.0, 0.0, 10.0), DVec3::Z * 5.0).unwrap();
        assert_eq!(p.normal, DVec3::Z);
        assert_eq!(p.distance_to_point(DVec3::new(3.0, 4.0, 12.0)), 2.0);
        assert_eq!(p.distance_to_point(DVec3::ZERO), -10.0);
    }

    #[test]
    fn test_zero_normal() {
        assert!(HalfSpace::from_point_normal(DVec3::ZERO, DVec3::ZERO).is_none());
    }

    #[test]
    fn test_intersect3() {
        let x = HalfSpace::from_point_normal(DVec3::new(1.0, 0.0, 0.0), DVec3::X).unwrap();
        let y = HalfSpace::from_point_normal(DVec3::new(0.0, 2.0, 0.0), DVec3::Y).unwrap();
        let z = HalfSpace::from_point_normal(DVec3::new(0.0, 0.0, 3.0), DVec3::Z).unwrap();
        let p = HalfSpace::intersect3(&x, &y, &z).unwrap();
        assert!(p.abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), 1e-9));
        assert!(HalfSpace::intersect3(&x, &x, &z).is_none());
    }
}
