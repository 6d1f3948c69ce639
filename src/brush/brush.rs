//! Convex brush: an ordered set of bounding planes.

use crate::core::error::GeometryError;
use crate::core::types::DVec3;
use crate::math::{HalfSpace, Volume};

use super::face::{axis_face, FaceDir};
use super::plane::{Plane, TextureAlign};

/// Distance tolerance for vertex and plane-contact tests
const EPSILON: f64 = 1e-6;

/// A convex solid bounded by at least four planes.
///
/// Construction enumerates the solid's vertices and rejects plane sets that
/// are unbounded, flat, or carry planes that never touch the surface. The
/// vertex centroid is therefore strictly inside every plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    planes: Vec<Plane>,
    vertices: Vec<DVec3>,
    bounds: Volume,
}

impl Brush {
    pub fn new(planes: Vec<Plane>) -> Result<Self, GeometryError> {
        if planes.len() < 4 {
            return Err(GeometryError::TooFewPlanes(planes.len()));
        }
        let spaces: Vec<HalfSpace> = planes.iter().map(Plane::half_space).collect();

        for (j, b) in spaces.iter().enumerate() {
            if spaces[..j].iter().any(|a| a.approx_eq(b, EPSILON)) {
                return Err(GeometryError::RedundantPlane(j));
            }
        }
        if has_recession_direction(&spaces) {
            return Err(GeometryError::Unbounded);
        }

        let vertices = enumerate_vertices(&spaces);
        if vertices.len() < 4 {
            return Err(GeometryError::Unbounded);
        }
        let centroid = mean(&vertices);
        for (i, space) in spaces.iter().enumerate() {
            if space.distance_to_point(centroid) >= -EPSILON {
                return Err(GeometryError::InvertedPlane(i));
            }
            let touching: Vec<DVec3> = vertices
                .iter()
                .copied()
                .filter(|v| space.distance_to_point(*v).abs() <= EPSILON)
                .collect();
            if !spans_area(&touching) {
                return Err(GeometryError::RedundantPlane(i));
            }
        }

        let bounds = bounds_of(&vertices).ok_or(GeometryError::Unbounded)?;
        Ok(Self { planes, vertices, bounds })
    }

    /// Six-plane box over `volume`, one texture on every face
    pub fn from_volume(volume: &Volume, texture: &TextureAlign) -> Result<Self, GeometryError> {
        Self::from_volume_with(volume, |_| texture.clone())
    }

    /// Six-plane box over `volume` with a texture chosen per face
    pub fn from_volume_with(
        volume: &Volume,
        mut texture: impl FnMut(FaceDir) -> TextureAlign,
    ) -> Result<Self, GeometryError> {
        let planes = FaceDir::ALL
            .iter()
            .map(|&dir| axis_face(volume, dir, texture(dir)))
            .collect();
        Self::new(planes)
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Corner points of the solid
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Mean of the vertices; strictly interior
    pub fn centroid(&self) -> DVec3 {
        mean(&self.vertices)
    }

    /// Tight axis-aligned bounds
    pub fn bounds(&self) -> Volume {
        self.bounds
    }

    /// True if `point` is inside or on the surface
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.bounds.expanded(EPSILON).is_ok_and(|b| b.contains_point(point))
            && self.planes.iter().all(|p| p.signed_distance(point) <= EPSILON)
    }

    /// True if `point` is strictly inside
    pub fn contains_point_strict(&self, point: DVec3) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) < -EPSILON)
    }
}

/// A direction `d` with `n_i . d <= 0` for every plane means the solid
/// extends forever along `d`. Extreme rays of that cone lie along pairwise
/// normal cross products.
fn has_recession_direction(spaces: &[HalfSpace]) -> bool {
    let mut any_pair = false;
    for (i, a) in spaces.iter().enumerate() {
        for b in &spaces[i + 1..] {
            let d = a.normal.cross(b.normal);
            if d.length_squared() < 1e-12 {
                continue;
            }
            any_pair = true;
            for dir in [d, -d] {
                if spaces.iter().all(|s| s.normal.dot(dir) <= 1e-9) {
                    return true;
                }
            }
        }
    }
    // Every normal parallel: a slab at best
    !any_pair
}

fn enumerate_vertices(spaces: &[HalfSpace]) -> Vec<DVec3> {
    let mut vertices: Vec<DVec3> = Vec::new();
    let n = spaces.len();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let Some(p) = HalfSpace::intersect3(&spaces[i], &spaces[j], &spaces[k]) else {
                    continue;
                };
                if spaces.iter().all(|s| s.distance_to_point(p) <= EPSILON)
                    && !vertices.iter().any(|v| v.abs_diff_eq(p, EPSILON))
                {
                    vertices.push(p);
                }
            }
        }
    }
    vertices
}

fn spans_area(points: &[DVec3]) -> bool {
    let Some(&a) = points.first() else {
        return false;
    };
    points.iter().enumerate().any(|(i, b)| {
        points[i + 1..]
            .iter()
            .any(|c| (*b - a).cross(*c - a).length_squared() > EPSILON)
    })
}

fn bounds_of(points: &[DVec3]) -> Option<Volume> {
    let mut min = DVec3::splat(f64::INFINITY);
    let mut max = DVec3::splat(f64::NEG_INFINITY);
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    Volume::new(min, max).ok()
}

fn mean(points: &[DVec3]) -> DVec3 {
    points.iter().copied().sum::<DVec3>() / points.len().max(1) as f64
}
