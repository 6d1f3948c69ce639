//! Layout graph: rooms as nodes, corridors as edges. Frozen once built.

use std::collections::VecDeque;
use std::fmt;

use crate::core::error::ConfigError;
use crate::feature::{Opening, WallAxis};
use crate::math::Volume;

use super::grid::CellRect;

/// Index of a room in its layout graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room {}", self.0)
    }
}

/// How a platform is reached from the floor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformAccess {
    Stairs,
    Ramp,
}

/// Decoration applied inside a room
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoomKind {
    #[default]
    Plain,
    /// Four pillars at the one-third points
    Arena,
    /// Two cover blocks flanking the centre
    Cover,
    /// Raised central platform
    Platform(PlatformAccess),
}

/// A room: a span of grid cells with its interior volume and wall openings
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    id: RoomId,
    cells: CellRect,
    interior: Volume,
    openings: Vec<Opening>,
    kind: RoomKind,
}

impl Room {
    pub(crate) fn new(id: RoomId, cells: CellRect, interior: Volume) -> Self {
        Self { id, cells, interior, openings: Vec::new(), kind: RoomKind::Plain }
    }

    pub(crate) fn carve(&mut self, opening: Opening) {
        self.openings.push(opening);
    }

    pub(crate) fn set_kind(&mut self, kind: RoomKind) {
        self.kind = kind;
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn cells(&self) -> CellRect {
        self.cells
    }

    pub fn interior(&self) -> &Volume {
        &self.interior
    }

    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }
}

/// A straight corridor joining two rooms across their shared cell boundary
#[derive(Clone, Debug, PartialEq)]
pub struct Corridor {
    pub from: RoomId,
    pub to: RoomId,
    pub interior: Volume,
    pub run: WallAxis,
}

/// Rooms and corridors of a finished layout
#[derive(Clone, Debug)]
pub struct LayoutGraph {
    grid_size: u32,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    spawn: Option<RoomId>,
}

impl LayoutGraph {
    pub fn from_parts(grid_size: u32, rooms: Vec<Room>, corridors: Vec<Corridor>, spawn: Option<RoomId>) -> Self {
        Self { grid_size, rooms, corridors, spawn }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn spawn(&self) -> Option<RoomId> {
        self.spawn
    }

    /// The designated spawn room
    pub fn spawn_room(&self) -> Result<&Room, ConfigError> {
        self.spawn
            .and_then(|id| self.room(id))
            .ok_or(ConfigError::NoSpawnRoom)
    }

    /// Rooms joined to `id` by a corridor
    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.corridors.iter().filter_map(move |c| {
            if c.from == id {
                Some(c.to)
            } else if c.to == id {
                Some(c.from)
            } else {
                None
            }
        })
    }

    /// Breadth-first visit order from the spawn room
    pub fn bfs_from_spawn(&self) -> Vec<RoomId> {
        let Some(start) = self.spawn.filter(|id| id.0 < self.rooms.len()) else {
            return Vec::new();
        };
        let mut seen = vec![false; self.rooms.len()];
        let mut order = Vec::with_capacity(self.rooms.len());
        let mut queue = VecDeque::from([start]);
        seen[start.0] = true;
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for next in self.neighbors(id) {
                // Corridors to unknown rooms are ignored
                if let Some(flag) = seen.get_mut(next.0).filter(|f| !**f) {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Every room reachable from the spawn room
    pub fn is_connected(&self) -> bool {
        self.bfs_from_spawn().len() == self.rooms.len()
    }

    /// Map of the grid: `S` spawn room, `#` other rooms, `.` empty
    pub fn ascii(&self) -> String {
        let size = self.grid_size;
        let mut out = String::with_capacity(((size + 1) * size) as usize);
        // Row 0 is the southmost; print north at the top
        for y in (0..size).rev() {
            for x in 0..size {
                let owner = self.rooms.iter().find(|r| r.cells.contains(x, y));
                out.push(match owner {
                    Some(r) if Some(r.id) == self.spawn => 'S',
                    Some(_) => '#',
                    None => '.',
                });
            }
            out.push('\n');
        }
        out
    }
}
