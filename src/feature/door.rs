//! Walls with doorways: the door-frame split and its multi-opening form.

use crate::brush::{Brush, TextureAlign};
use crate::core::error::{ConfigError, GeometryError};
use crate::core::types::Result;
use crate::math::Volume;

/// Axis a wall runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallAxis {
    X,
    Y,
}

/// A straight wall slab.
///
/// `start..end` is the span along the run axis, `near..far` the thickness
/// across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub axis: WallAxis,
    pub start: f64,
    pub end: f64,
    pub near: f64,
    pub far: f64,
    pub floor_z: f64,
    pub ceiling_z: f64,
}

impl Wall {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Slab section over `a..b` along the run and `z1..z2`
    fn section(&self, a: f64, b: f64, z1: f64, z2: f64) -> std::result::Result<Volume, GeometryError> {
        match self.axis {
            WallAxis::X => Volume::from_bounds(a, self.near, z1, b, self.far, z2),
            WallAxis::Y => Volume::from_bounds(self.near, a, z1, self.far, b, z2),
        }
    }

    /// The whole slab without openings
    pub fn volume(&self) -> std::result::Result<Volume, GeometryError> {
        self.section(self.start, self.end, self.floor_z, self.ceiling_z)
    }
}

/// A door-sized gap: `center` along the wall run, `height` above the wall floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Doorway {
    pub center: f64,
    pub width: f64,
    pub height: f64,
}

impl Doorway {
    pub fn left(&self) -> f64 {
        self.center - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center + self.width / 2.0
    }

    /// Check the doorway fits strictly inside `start..end` under `wall_height`
    pub fn check_fits(&self, start: f64, end: f64, wall_height: f64) -> std::result::Result<(), ConfigError> {
        if self.width <= 0.0 {
            return Err(ConfigError::InvalidDimension { name: "door_width", value: self.width });
        }
        if self.height <= 0.0 {
            return Err(ConfigError::InvalidDimension { name: "door_height", value: self.height });
        }
        if self.width >= end - start {
            return Err(ConfigError::DoorWiderThanWall { door_width: self.width, span: end - start });
        }
        if self.left() <= start || self.right() >= end {
            return Err(ConfigError::DoorOutsideWall {
                center: self.center,
                door_width: self.width,
                start,
                end,
            });
        }
        if self.height >= wall_height {
            return Err(ConfigError::DoorTooTall { door_height: self.height, wall_height });
        }
        Ok(())
    }
}

/// Split a wall around one doorway: left segment, right segment, lintel.
pub fn door_frame_split(wall: &Wall, door: &Doorway, texture: &TextureAlign) -> Result<[Brush; 3]> {
    wall.volume()?;
    door.check_fits(wall.start, wall.end, wall.ceiling_z - wall.floor_z)?;

    let left = wall.section(wall.start, door.left(), wall.floor_z, wall.ceiling_z)?;
    let right = wall.section(door.right(), wall.end, wall.floor_z, wall.ceiling_z)?;
    let lintel = wall.section(door.left(), door.right(), wall.floor_z + door.height, wall.ceiling_z)?;
    Ok([
        Brush::from_volume(&left, texture)?,
        Brush::from_volume(&right, texture)?,
        Brush::from_volume(&lintel, texture)?,
    ])
}

/// Emit a wall pierced by any number of non-overlapping doorways.
///
/// Full-height segments come first in run order, then one lintel per doorway.
/// With no doorways this is the plain slab.
pub fn wall_with_openings(wall: &Wall, doors: &[Doorway], texture: &TextureAlign) -> Result<Vec<Brush>> {
    wall.volume()?;
    let height = wall.ceiling_z - wall.floor_z;

    let mut sorted: Vec<Doorway> = doors.to_vec();
    sorted.sort_by(|a, b| a.center.total_cmp(&b.center));

    let mut previous_right = f64::NEG_INFINITY;
    for door in &sorted {
        door.check_fits(wall.start, wall.end, height)?;
        if door.left() <= previous_right {
            return Err(ConfigError::OverlappingOpenings(door.center).into());
        }
        previous_right = door.right();
    }

    let mut brushes = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = wall.start;
    for door in &sorted {
        let seg = wall.section(cursor, door.left(), wall.floor_z, wall.ceiling_z)?;
        brushes.push(Brush::from_volume(&seg, texture)?);
        cursor = door.right();
    }
    let last = wall.section(cursor, wall.end, wall.floor_z, wall.ceiling_z)?;
    brushes.push(Brush::from_volume(&last, texture)?);

    for door in &sorted {
        let lintel = wall.section(door.left(), door.right(), wall.floor_z + door.height, wall.ceiling_z)?;
        brushes.push(Brush::from_volume(&lintel, texture)?);
    }
    Ok(brushes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn wall() -> Wall {
        Wall {
            axis: WallAxis::Y,
            start: 0.0,
            end: 256.0,
            near: -16.0,
            far: 0.0,
            floor_z: 0.0,
            ceiling_z: 192.0,
        }
    }

    fn tex() -> TextureAlign {
        TextureAlign::new("stone1_3")
    }

    #[test]
    fn test_door_frame_split_ranges() {
        let door = Doorway { center: 128.0, width: 64.0, height: 128.0 };
        let [left, right, lintel] = door_frame_split(&wall(), &door, &tex()).unwrap();

        let l = left.bounds();
        assert_eq!((l.min().y, l.max().y), (0.0, 96.0));
        assert_eq!((l.min().z, l.max().z), (0.0, 192.0));

        let r = right.bounds();
        assert_eq!((r.min().y, r.max().y), (160.0, 256.0));

        let t = lintel.bounds();
        assert_eq!((t.min().y, t.max().y), (96.0, 160.0));
        assert_eq!((t.min().z, t.max().z), (128.0, 192.0));
        assert_eq!((t.min().x, t.max().x), (-16.0, 0.0));
    }

    #[test]
    fn test_door_wider_than_wall() {
        let door = Doorway { center: 128.0, width: 256.0, height: 128.0 };
        let err = door_frame_split(&wall(), &door, &tex()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::DoorWiderThanWall { .. })));
        assert!(err.to_string().contains("door wider than wall span"));
    }

    #[test]
    fn test_door_off_the_end() {
        let door = Doorway { center: 16.0, width: 64.0, height: 128.0 };
        let err = door_frame_split(&wall(), &door, &tex()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::DoorOutsideWall { .. })));
    }

    #[test]
    fn test_door_too_tall() {
        let door = Doorway { center: 128.0, width: 64.0, height: 192.0 };
        let err = door_frame_split(&wall(), &door, &tex()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::DoorTooTall { .. })));
    }

    #[test]
    fn test_multiple_openings() {
        let mut long = wall();
        long.end = 512.0;
        let doors = [
            Doorway { center: 384.0, width: 64.0, height: 128.0 },
            Doorway { center: 128.0, width: 64.0, height: 128.0 },
        ];
        let brushes = wall_with_openings(&long, &doors, &tex()).unwrap();
        assert_eq!(brushes.len(), 5);
        let spans: Vec<(f64, f64)> = brushes[..3]
            .iter()
            .map(|b| (b.bounds().min().y, b.bounds().max().y))
            .collect();
        assert_eq!(spans, vec![(0.0, 96.0), (160.0, 352.0), (416.0, 512.0)]);
        assert_eq!(brushes[3].bounds().min().y, 96.0);
        assert_eq!(brushes[4].bounds().min().y, 352.0);
    }

    #[test]
    fn test_overlapping_openings() {
        let doors = [
            Doorway { center: 100.0, width: 64.0, height: 128.0 },
            Doorway { center: 150.0, width: 64.0, height: 128.0 },
        ];
        let err = wall_with_openings(&wall(), &doors, &tex()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::OverlappingOpenings(_))));
    }

    #[test]
    fn test_plain_wall() {
        let brushes = wall_with_openings(&wall(), &[], &tex()).unwrap();
        assert_eq!(brushes.len(), 1);
        assert_eq!(brushes[0].bounds(), wall().volume().unwrap());
    }
}
