//! Point entities derived from a finished layout.

use crate::core::error::ConfigError;
use crate::core::types::DVec3;
use crate::layout::{LayoutGraph, Room};
use crate::map::format_number;

use super::Entity;

/// Placement settings for player start, lights and supplies
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementParams {
    /// Player start height above the floor
    pub spawn_height: f64,
    /// Light distance below the ceiling
    pub light_offset: f64,
    pub light_level: f64,
    pub light_color: [f64; 3],
    /// Interior length per light along each axis
    pub light_spacing: f64,
    pub supplies: bool,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            spawn_height: 24.0,
            light_offset: 32.0,
            light_level: 300.0,
            light_color: [1.0, 1.0, 1.0],
            light_spacing: 512.0,
            supplies: false,
        }
    }
}

/// `info_player_start` at the spawn room centre, facing east
pub fn player_start(graph: &LayoutGraph, params: &PlacementParams) -> Result<Entity, ConfigError> {
    let room = graph.spawn_room()?;
    let interior = room.interior();
    let c = interior.center();
    let origin = DVec3::new(c.x, c.y, interior.min().z + params.spawn_height);
    Ok(Entity::point("info_player_start", origin).with("angle", "0"))
}

/// Light positions for one room: an even `nx x ny` subdivision of the
/// interior, one light at the centre of each part.
pub fn light_lattice(room: &Room, params: &PlacementParams) -> Vec<DVec3> {
    let interior = room.interior();
    let (min, size) = (interior.min(), interior.size());
    let count = |len: f64| ((len / params.light_spacing).floor() as usize).max(1);
    let (nx, ny) = (count(size.x), count(size.y));
    let z = interior.max().z - params.light_offset;

    (0..ny)
        .flat_map(|j| (0..nx).map(move |i| (i, j)))
        .map(|(i, j)| {
            DVec3::new(
                min.x + size.x * (i as f64 + 0.5) / nx as f64,
                min.y + size.y * (j as f64 + 0.5) / ny as f64,
                z,
            )
        })
        .collect()
}

/// Health, shells and a super shotgun around `spawn`
pub fn supplies(spawn: DVec3) -> Vec<Entity> {
    vec![
        Entity::point("item_health", spawn - DVec3::X * 64.0),
        Entity::point("item_shells", spawn + DVec3::X * 64.0),
        Entity::point("weapon_supershotgun", spawn + DVec3::Y * 64.0),
    ]
}

/// All point entities of a level: player start, lights per room in room
/// order, then supplies when enabled.
pub fn place_entities(graph: &LayoutGraph, params: &PlacementParams) -> Result<Vec<Entity>, ConfigError> {
    let start = player_start(graph, params)?;
    let spawn_origin = start.origin();
    let mut entities = vec![start];

    let color = params.light_color.map(format_number).join(" ");
    for room in graph.rooms() {
        for pos in light_lattice(room, params) {
            entities.push(
                Entity::point("light", pos)
                    .with("light", format_number(params.light_level))
                    .with("_color", color.clone()),
            );
        }
    }

    if params.supplies {
        if let Some(origin) = spawn_origin {
            entities.extend(supplies(origin));
        }
    }

    log::info!("Placed {} point entities", entities.len());
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CellRect, LayoutGenerator, LayoutParams, RoomId};
    use crate::math::Volume;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_room(spawn: Option<RoomId>) -> LayoutGraph {
        let room = Room::new(
            RoomId(0),
            CellRect::new(0, 0, 1, 1),
            Volume::from_bounds(48.0, 48.0, 0.0, 208.0, 208.0, 192.0).unwrap(),
        );
        LayoutGraph::from_parts(3, vec![room], Vec::new(), spawn)
    }

    #[test]
    fn test_player_start_in_spawn_room() {
        let graph = single_room(Some(RoomId(0)));
        let start = player_start(&graph, &PlacementParams::default()).unwrap();
        assert_eq!(start.classname(), "info_player_start");
        assert_eq!(start.origin(), Some(DVec3::new(128.0, 128.0, 24.0)));
        assert_eq!(start.get("angle"), Some("0"));
        assert!(graph.rooms()[0].interior().contains_point(start.origin().unwrap()));
    }

    #[test]
    fn test_no_spawn_room() {
        let graph = single_room(None);
        let err = place_entities(&graph, &PlacementParams::default()).unwrap_err();
        assert_eq!(err, ConfigError::NoSpawnRoom);
        assert_eq!(err.to_string(), "no spawn room designated");
    }

    #[test]
    fn test_one_light_for_small_room() {
        let graph = single_room(Some(RoomId(0)));
        let entities = place_entities(&graph, &PlacementParams::default()).unwrap();
        assert_eq!(entities.len(), 2);
        let light = &entities[1];
        assert_eq!(light.classname(), "light");
        assert_eq!(light.origin(), Some(DVec3::new(128.0, 128.0, 160.0)));
        assert_eq!(light.get("light"), Some("300"));
        assert_eq!(light.get("_color"), Some("1 1 1"));
    }

    #[test]
    fn test_lattice_for_large_room() {
        let room = Room::new(
            RoomId(0),
            CellRect::new(0, 0, 5, 2),
            Volume::from_bounds(48.0, 48.0, 0.0, 1232.0, 464.0, 192.0).unwrap(),
        );
        let lights = light_lattice(&room, &PlacementParams::default());
        // 1184 wide -> 2 columns, 416 deep -> 1 row
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[0], DVec3::new(344.0, 256.0, 160.0));
        assert_eq!(lights[1], DVec3::new(936.0, 256.0, 160.0));
    }

    #[test]
    fn test_supplies_around_spawn() {
        let graph = single_room(Some(RoomId(0)));
        let params = PlacementParams { supplies: true, ..Default::default() };
        let entities = place_entities(&graph, &params).unwrap();
        let names: Vec<_> = entities.iter().map(|e| e.classname()).collect();
        assert_eq!(names, ["info_player_start", "light", "item_health", "item_shells", "weapon_supershotgun"]);
        assert_eq!(entities[2].origin(), Some(DVec3::new(64.0, 128.0, 24.0)));
    }

    #[test]
    fn test_every_room_lit() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let graph = LayoutGenerator::new(LayoutParams { grid_size: 5, num_rooms: 8, ..Default::default() })
            .generate(&mut rng)
            .unwrap();
        let entities = place_entities(&graph, &PlacementParams::default()).unwrap();
        for room in graph.rooms() {
            let lit = entities
                .iter()
                .filter(|e| e.classname() == "light")
                .filter_map(|e| e.origin())
                .any(|p| room.interior().contains_point(p));
            assert!(lit, "{} has no light", room.id());
        }
    }
}
