//! Room decoration: pillars, cover blocks and raised platforms.

use crate::brush::{Brush, Heading, TextureAlign};
use crate::core::error::ConfigError;
use crate::core::types::{DVec2, DVec3, Result};
use crate::entity::PlacementParams;
use crate::feature::{cover_block, pillar, platform, Ramp, Staircase};
use crate::layout::{PlatformAccess, Room, RoomKind};
use crate::math::Volume;

const PILLAR_SIZE: f64 = 48.0;
const COVER_SIZE: f64 = 64.0;
const PLATFORM_HEIGHT: f64 = 64.0;
const STEP_HEIGHT: f64 = 16.0;
const STEP_DEPTH: f64 = 32.0;
const ACCESS_WIDTH: f64 = 64.0;
/// Ramp lip above the floor at its foot
const RAMP_FOOT: f64 = 16.0;

/// Textures used by decoration brushes
#[derive(Debug, Clone, PartialEq)]
pub struct DecorTextures {
    pub feature: TextureAlign,
    pub platform_top: TextureAlign,
}

const DECORATED_KINDS: [RoomKind; 4] = [
    RoomKind::Arena,
    RoomKind::Cover,
    RoomKind::Platform(PlatformAccess::Stairs),
    RoomKind::Platform(PlatformAccess::Ramp),
];

fn does_not_fit(interior: &Volume) -> ConfigError {
    let size = interior.size();
    ConfigError::DecorationDoesNotFit { width: size.x, depth: size.y, height: size.z }
}

/// Brushes for a room's decoration, empty for plain rooms.
///
/// Fails with [`ConfigError::DecorationDoesNotFit`] when any brush would
/// leave the room interior.
pub fn decorate(room: &Room, textures: &DecorTextures) -> Result<Vec<Brush>> {
    let interior = room.interior();
    let brushes = emit(room.kind(), interior, textures)?;
    if brushes.iter().any(|b| !interior.contains_volume(&b.bounds())) {
        return Err(does_not_fit(interior).into());
    }
    Ok(brushes)
}

/// Check that every decoration fits `interior` and leaves room for the
/// lights `lights` would hang in it.
///
/// Decoration sizes are fixed, so passing the smallest room that can be
/// decorated covers every larger one.
pub fn check_fits(interior: &Volume, lights: &PlacementParams) -> std::result::Result<(), ConfigError> {
    let textures = DecorTextures {
        feature: TextureAlign::new("check"),
        platform_top: TextureAlign::new("check"),
    };
    let light_z = interior.max().z - lights.light_offset;
    for kind in DECORATED_KINDS {
        let brushes = emit(kind, interior, &textures).map_err(|_| does_not_fit(interior))?;
        for bounds in brushes.iter().map(Brush::bounds) {
            // Pillars are the only brushes meant to reach the ceiling
            let under_lights = kind == RoomKind::Arena || bounds.max().z < light_z;
            if !interior.contains_volume(&bounds) || !under_lights {
                return Err(does_not_fit(interior));
            }
        }
    }
    // Lattice lights come no closer than min(side, spacing) / 6 to a pillar axis
    let size = interior.size();
    if size.x.min(size.y).min(lights.light_spacing) / 6.0 <= PILLAR_SIZE / 2.0 {
        return Err(does_not_fit(interior));
    }
    Ok(())
}

fn emit(kind: RoomKind, interior: &Volume, textures: &DecorTextures) -> Result<Vec<Brush>> {
    let (min, max, size) = (interior.min(), interior.max(), interior.size());
    let c = interior.center();

    match kind {
        RoomKind::Plain => Ok(Vec::new()),
        RoomKind::Arena => {
            let at = |i: f64, j: f64| DVec2::new(min.x + size.x * i / 3.0, min.y + size.y * j / 3.0);
            [(1.0, 1.0), (2.0, 1.0), (1.0, 2.0), (2.0, 2.0)]
                .into_iter()
                .map(|(i, j)| pillar(at(i, j), PILLAR_SIZE, min.z, max.z, &textures.feature))
                .collect()
        }
        RoomKind::Cover => [-1.0, 1.0]
            .into_iter()
            .map(|side| {
                let at = DVec2::new(c.x + side * size.x / 4.0, c.y);
                cover_block(at, COVER_SIZE, min.z, &textures.feature)
            })
            .collect(),
        RoomKind::Platform(access) => {
            let top = Volume::from_bounds(
                c.x - size.x / 4.0,
                c.y - size.y / 8.0,
                min.z,
                c.x + size.x / 4.0,
                c.y + size.y / 8.0,
                min.z + PLATFORM_HEIGHT,
            )?;
            let mut brushes = vec![platform(&top, &textures.feature, &textures.platform_top)?];
            let num_steps = (PLATFORM_HEIGHT / STEP_HEIGHT) as u32;
            let run = STEP_DEPTH * num_steps as f64;
            // Access climbs north and ends flush with the platform's south face
            let foot = DVec3::new(c.x - ACCESS_WIDTH / 2.0, top.min().y - run, min.z);
            match access {
                PlatformAccess::Stairs => {
                    let stairs = Staircase {
                        start: foot,
                        ascent: Heading::North,
                        width: ACCESS_WIDTH,
                        step_height: STEP_HEIGHT,
                        step_depth: STEP_DEPTH,
                        num_steps,
                    };
                    brushes.extend(stairs.brushes(&textures.feature)?);
                }
                PlatformAccess::Ramp => {
                    let ramp = Ramp {
                        volume: Volume::from_bounds(
                            foot.x, foot.y, min.z,
                            foot.x + ACCESS_WIDTH, top.min().y, min.z + PLATFORM_HEIGHT,
                        )?,
                        ascent: Heading::North,
                        low_z: min.z + RAMP_FOOT,
                    };
                    brushes.push(ramp.brush(&textures.feature, &textures.platform_top)?);
                }
            }
            Ok(brushes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CellRect, RoomId};

    fn room(kind: RoomKind) -> Room {
        let mut room = Room::new(
            RoomId(1),
            CellRect::new(0, 0, 2, 2),
            Volume::from_bounds(48.0, 48.0, 0.0, 464.0, 464.0, 192.0).unwrap(),
        );
        room.set_kind(kind);
        room
    }

    fn textures() -> DecorTextures {
        DecorTextures {
            feature: TextureAlign::new("metal1_1"),
            platform_top: TextureAlign::new("metal2_1"),
        }
    }

    fn inside_room(room: &Room, brushes: &[Brush]) {
        for b in brushes {
            assert!(room.interior().contains_volume(&b.bounds()), "{:?} outside {:?}", b.bounds(), room.interior());
        }
    }

    fn sized_room(kind: RoomKind, width: f64, height: f64) -> Room {
        let mut room = Room::new(
            RoomId(1),
            CellRect::new(0, 0, 2, 2),
            Volume::from_bounds(40.0, 40.0, 0.0, 40.0 + width, 40.0 + width, height).unwrap(),
        );
        room.set_kind(kind);
        room
    }

    #[test]
    fn test_plain_room_is_empty() {
        assert!(decorate(&room(RoomKind::Plain), &textures()).unwrap().is_empty());
    }

    #[test]
    fn test_arena_pillars_reach_ceiling() {
        let r = room(RoomKind::Arena);
        let brushes = decorate(&r, &textures()).unwrap();
        assert_eq!(brushes.len(), 4);
        inside_room(&r, &brushes);
        for b in &brushes {
            assert_eq!((b.bounds().min().z, b.bounds().max().z), (0.0, 192.0));
            // Room centre stays clear for the light
            assert!(!b.contains_point(DVec3::new(256.0, 256.0, 160.0)));
        }
    }

    #[test]
    fn test_cover_blocks_flank_centre() {
        let r = room(RoomKind::Cover);
        let brushes = decorate(&r, &textures()).unwrap();
        assert_eq!(brushes.len(), 2);
        inside_room(&r, &brushes);
        assert_eq!(brushes[0].bounds().center(), DVec3::new(152.0, 256.0, 32.0));
        assert_eq!(brushes[1].bounds().center(), DVec3::new(360.0, 256.0, 32.0));
    }

    #[test]
    fn test_stairs_meet_platform() {
        let r = room(RoomKind::Platform(PlatformAccess::Stairs));
        let brushes = decorate(&r, &textures()).unwrap();
        assert_eq!(brushes.len(), 5);
        inside_room(&r, &brushes);
        let top = brushes[0].bounds();
        let last = brushes[4].bounds();
        assert_eq!(last.max().y, top.min().y);
        assert_eq!(last.max().z, top.max().z);
        assert!(brushes[0].planes().iter().any(|p| p.texture.name == "metal2_1"));
    }

    #[test]
    fn test_ramp_meets_platform() {
        let r = room(RoomKind::Platform(PlatformAccess::Ramp));
        let brushes = decorate(&r, &textures()).unwrap();
        assert_eq!(brushes.len(), 2);
        inside_room(&r, &brushes);
        let top = brushes[0].bounds();
        let ramp = brushes[1].bounds();
        assert_eq!(ramp.max().y, top.min().y);
        assert_eq!(ramp.max().z, 64.0);
        assert_eq!(brushes[1].planes().len(), 6);
    }

    #[test]
    fn test_every_kind_inside_larger_room() {
        // 320-unit cells with a 40-unit margin and a low ceiling
        let params = PlacementParams::default();
        for kind in DECORATED_KINDS {
            let r = sized_room(kind, 560.0, 160.0);
            check_fits(r.interior(), &params).unwrap();
            let brushes = decorate(&r, &textures()).unwrap();
            assert!(!brushes.is_empty());
            inside_room(&r, &brushes);
        }
    }

    #[test]
    fn test_stairs_outside_narrow_room_rejected() {
        // 160-unit cells with a 40-unit margin: the run starts south of the interior
        let r = sized_room(RoomKind::Platform(PlatformAccess::Stairs), 240.0, 192.0);
        let err = decorate(&r, &textures()).unwrap_err();
        assert!(err.is_config(), "{}", err);
        assert_eq!(
            check_fits(r.interior(), &PlacementParams::default()),
            Err(ConfigError::DecorationDoesNotFit { width: 240.0, depth: 240.0, height: 192.0 })
        );
    }

    #[test]
    fn test_light_clearance_rejected() {
        // Platform and cover tops would reach the light at 60 - 32
        let r = sized_room(RoomKind::Cover, 416.0, 60.0);
        assert!(check_fits(r.interior(), &PlacementParams::default()).is_err());
        // Tight light spacing puts a light against an arena pillar
        let params = PlacementParams { light_spacing: 128.0, ..Default::default() };
        assert!(check_fits(room(RoomKind::Arena).interior(), &params).is_err());
        check_fits(room(RoomKind::Arena).interior(), &PlacementParams::default()).unwrap();
    }
}
