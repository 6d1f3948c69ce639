//! Grid layout: room placement, corridors and the resulting layout graph.

pub mod grid;
pub mod graph;
pub mod generator;

pub use grid::{CellRect, Grid};
pub use graph::{Corridor, LayoutGraph, PlatformAccess, Room, RoomId, RoomKind};
pub use generator::{LayoutGenerator, LayoutParams};
