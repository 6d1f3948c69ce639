//! Grid layout generator.
//!
//! Rooms grow outward from a spawn room by frontier expansion: every new room
//! claims a free cell that touches an occupied one, so each room joins the
//! connected set the moment it is placed. After placement, every pair of
//! rooms sharing a cell edge gets exactly one corridor.

use std::collections::BTreeMap;

use rand::Rng;

use crate::brush::Heading;
use crate::core::error::ConfigError;
use crate::core::types::Result;
use crate::feature::{Doorway, Opening, WallAxis};
use crate::math::Volume;

use super::graph::{Corridor, LayoutGraph, PlatformAccess, Room, RoomId, RoomKind};
use super::grid::{CellRect, Grid};

/// Parameters of the grid layout
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
    pub grid_size: u32,
    pub room_min: u32,
    pub room_max: u32,
    pub num_rooms: u32,
    /// World units per cell
    pub cell_size: f64,
    /// Inset of a room interior from its cell span
    pub room_margin: f64,
    pub wall_thickness: f64,
    pub room_height: f64,
    pub floor_z: f64,
    pub door_width: f64,
    pub door_height: f64,
    /// Decorate rooms spanning at least 2x2 cells
    pub features: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            grid_size: 4,
            room_min: 1,
            room_max: 2,
            num_rooms: 5,
            cell_size: 256.0,
            room_margin: 48.0,
            wall_thickness: 16.0,
            room_height: 192.0,
            floor_z: 0.0,
            door_width: 64.0,
            door_height: 128.0,
            features: true,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::InvalidGridSize);
        }
        if self.room_min == 0 || self.room_min > self.room_max {
            return Err(ConfigError::InvalidRoomRange { min: self.room_min, max: self.room_max });
        }
        if self.num_rooms == 0 {
            return Err(ConfigError::InvalidRoomCount);
        }
        let cells = self.grid_size as u64 * self.grid_size as u64;
        if self.num_rooms as u64 > cells || self.room_min > self.grid_size {
            return Err(ConfigError::GridTooSmall { requested: self.num_rooms, grid_size: self.grid_size });
        }
        for (name, value) in [
            ("cell_size", self.cell_size),
            ("room_margin", self.room_margin),
            ("wall_thickness", self.wall_thickness),
            ("room_height", self.room_height),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        if !self.floor_z.is_finite() {
            return Err(ConfigError::InvalidDimension { name: "floor_z", value: self.floor_z });
        }
        if self.room_margin <= self.wall_thickness {
            return Err(ConfigError::MarginTooThin { margin: self.room_margin, thickness: self.wall_thickness });
        }
        let single_wall = self.cell_size - 2.0 * self.room_margin;
        if self.door_width >= single_wall {
            return Err(ConfigError::CorridorTooWide { door_width: self.door_width, wall: single_wall.max(0.0) });
        }
        if self.door_height >= self.room_height {
            return Err(ConfigError::DoorTooTall { door_height: self.door_height, wall_height: self.room_height });
        }
        Ok(())
    }

    /// Interior volume of a room spanning `cells`
    pub fn room_interior(&self, cells: &CellRect) -> std::result::Result<Volume, crate::core::error::GeometryError> {
        let c = self.cell_size;
        let m = self.room_margin;
        Volume::from_bounds(
            cells.x as f64 * c + m,
            cells.y as f64 * c + m,
            self.floor_z,
            cells.right() as f64 * c - m,
            cells.top() as f64 * c - m,
            self.floor_z + self.room_height,
        )
    }
}

/// Two rooms sharing a cell edge. `low` is the room on the smaller-coordinate
/// side of the boundary.
#[derive(Clone, Copy, Debug)]
struct Adjacency {
    low: RoomId,
    high: RoomId,
    /// Axis crossed when walking from `low` to `high`
    run: WallAxis,
    /// Shared cell range along the boundary, inclusive
    first: u32,
    last: u32,
}

/// Builds a layout graph from parameters and a seeded generator
pub struct LayoutGenerator {
    params: LayoutParams,
}

impl LayoutGenerator {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Run frontier expansion until `num_rooms` rooms exist, then connect them.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<LayoutGraph> {
        let p = &self.params;
        p.validate()?;

        let mut grid = Grid::new(p.grid_size);
        let mut rooms: Vec<Room> = Vec::with_capacity(p.num_rooms as usize);
        let mut frontier: Vec<(u32, u32)> = Vec::new();
        let mut queued = vec![false; (p.grid_size * p.grid_size) as usize];

        // Spawn room anywhere on the grid, snapped to the room_min lattice
        let w = rng.gen_range(p.room_min..=p.room_max.min(p.grid_size));
        let h = rng.gen_range(p.room_min..=p.room_max.min(p.grid_size));
        let spawn_rect = CellRect::new(
            rng.gen_range(0..=(p.grid_size - w) / p.room_min) * p.room_min,
            rng.gen_range(0..=(p.grid_size - h) / p.room_min) * p.room_min,
            w,
            h,
        );
        self.place(&mut grid, &mut rooms, &mut frontier, &mut queued, spawn_rect)?;

        while rooms.len() < p.num_rooms as usize {
            if frontier.is_empty() {
                return Err(ConfigError::GridTooSmall { requested: p.num_rooms, grid_size: p.grid_size }.into());
            }
            let (cx, cy) = frontier.swap_remove(rng.gen_range(0..frontier.len()));
            if grid.get(cx, cy).is_some() {
                continue;
            }
            match self.fit_room(&grid, cx, cy, rng) {
                Some(rect) => {
                    self.place(&mut grid, &mut rooms, &mut frontier, &mut queued, rect)?;
                }
                None => {
                    log::warn!("Cell ({}, {}) cannot hold a {}x{} room, discarding", cx, cy, p.room_min, p.room_min);
                }
            }
        }

        let adjacencies = find_adjacencies(&grid);
        let mut corridors = Vec::with_capacity(adjacencies.len());
        for adj in adjacencies {
            corridors.push(self.connect(&mut rooms, &adj)?);
        }

        if p.features {
            for room in rooms.iter_mut().skip(1) {
                let cells = room.cells();
                if cells.w >= 2 && cells.h >= 2 {
                    room.set_kind(match rng.gen_range(0..5) {
                        0 => RoomKind::Plain,
                        1 => RoomKind::Arena,
                        2 => RoomKind::Cover,
                        3 => RoomKind::Platform(PlatformAccess::Stairs),
                        _ => RoomKind::Platform(PlatformAccess::Ramp),
                    });
                }
            }
        }

        log::info!(
            "Layout: {} rooms, {} corridors on a {}x{} grid ({} cells used)",
            rooms.len(), corridors.len(), p.grid_size, p.grid_size, grid.occupied_count()
        );

        Ok(LayoutGraph::from_parts(p.grid_size, rooms, corridors, Some(RoomId(0))))
    }

    fn place(
        &self,
        grid: &mut Grid,
        rooms: &mut Vec<Room>,
        frontier: &mut Vec<(u32, u32)>,
        queued: &mut [bool],
        rect: CellRect,
    ) -> Result<()> {
        let id = RoomId(rooms.len());
        grid.occupy(&rect, id);
        rooms.push(Room::new(id, rect, self.params.room_interior(&rect)?));
        log::debug!("Placed {} at ({}, {}) size {}x{}", id, rect.x, rect.y, rect.w, rect.h);

        for (x, y) in rect.cells() {
            for (nx, ny) in grid.neighbors(x, y) {
                let i = (ny * grid.size() + nx) as usize;
                if grid.get(nx, ny).is_none() && !queued[i] {
                    queued[i] = true;
                    frontier.push((nx, ny));
                }
            }
        }
        Ok(())
    }

    /// Find a free rectangle covering cell `(cx, cy)`, preferring a random
    /// target size and falling back to the nearest sizes that fit. Among
    /// placements of one size, those on the room_min lattice win, so grids
    /// that tile exactly are not fragmented.
    fn fit_room<R: Rng>(&self, grid: &Grid, cx: u32, cy: u32, rng: &mut R) -> Option<CellRect> {
        let p = &self.params;
        let max = p.room_max.min(p.grid_size);
        let target = (rng.gen_range(p.room_min..=max), rng.gen_range(p.room_min..=max));

        let mut sizes: Vec<(u32, u32)> = (p.room_min..=max)
            .flat_map(|w| (p.room_min..=max).map(move |h| (w, h)))
            .collect();
        sizes.sort_by_key(|&(w, h)| (w.abs_diff(target.0) + h.abs_diff(target.1), u32::MAX - w * h));

        for (w, h) in sizes {
            let candidates: Vec<CellRect> = (0..w)
                .flat_map(|ox| (0..h).map(move |oy| (ox, oy)))
                .filter_map(|(ox, oy)| {
                    let x = cx.checked_sub(ox)?;
                    let y = cy.checked_sub(oy)?;
                    Some(CellRect::new(x, y, w, h))
                })
                .filter(|r| grid.is_free(r))
                .collect();
            let aligned: Vec<CellRect> = candidates
                .iter()
                .copied()
                .filter(|r| r.x % p.room_min == 0 && r.y % p.room_min == 0)
                .collect();
            let pool = if aligned.is_empty() { candidates } else { aligned };
            if !pool.is_empty() {
                return Some(pool[rng.gen_range(0..pool.len())]);
            }
        }
        None
    }

    /// Build the corridor for one adjacency and carve matching openings
    fn connect(&self, rooms: &mut [Room], adj: &Adjacency) -> Result<Corridor> {
        let p = &self.params;
        let t = p.wall_thickness;
        let half = p.door_width / 2.0;
        // Middle of the shared boundary
        let mid = (adj.first + adj.last + 1) as f64 * p.cell_size / 2.0;
        let low = *rooms[adj.low.0].interior();
        let high = *rooms[adj.high.0].interior();
        let (z1, z2) = (p.floor_z, p.floor_z + p.door_height);

        let (interior, low_side) = match adj.run {
            WallAxis::X => (
                Volume::from_bounds(low.max().x + t, mid - half, z1, high.min().x - t, mid + half, z2)?,
                Heading::East,
            ),
            WallAxis::Y => (
                Volume::from_bounds(mid - half, low.max().y + t, z1, mid + half, high.min().y - t, z2)?,
                Heading::North,
            ),
        };

        let door = Doorway { center: mid, width: p.door_width, height: p.door_height };
        rooms[adj.low.0].carve(Opening { side: low_side, door });
        rooms[adj.high.0].carve(Opening { side: low_side.opposite(), door });
        log::debug!("Corridor {} <-> {} along {:?} at {}", adj.low, adj.high, adj.run, mid);

        Ok(Corridor { from: adj.low, to: adj.high, interior, run: adj.run })
    }
}

/// Every pair of rooms sharing at least one cell edge, in room-id order
fn find_adjacencies(grid: &Grid) -> Vec<Adjacency> {
    let mut pairs: BTreeMap<(RoomId, RoomId), Adjacency> = BTreeMap::new();
    let size = grid.size();
    for y in 0..size {
        for x in 0..size {
            let Some(here) = grid.get(x, y) else { continue };
            let east = grid.get(x + 1, y).map(|r| (r, WallAxis::X, y));
            let north = grid.get(x, y + 1).map(|r| (r, WallAxis::Y, x));
            for (other, run, along) in [east, north].into_iter().flatten() {
                if other == here {
                    continue;
                }
                let key = (here.min(other), here.max(other));
                pairs
                    .entry(key)
                    .and_modify(|a| {
                        a.first = a.first.min(along);
                        a.last = a.last.max(along);
                    })
                    .or_insert(Adjacency { low: here, high: other, run, first: along, last: along });
            }
        }
    }
    pairs.into_values().collect()
}
