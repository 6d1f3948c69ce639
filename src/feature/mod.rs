//! Feature emitters: higher-level shapes built from brushes.
//!
//! Emitters are pure geometry. Textures arrive already resolved, so the
//! caller controls every draw from the seeded generator.

pub mod shell;
pub mod door;
pub mod stairs;
pub mod ramp;
pub mod platform;
pub mod pillar;

pub use shell::{box_shell, corridor_shell, Opening, ShellTextures};
pub use door::{door_frame_split, wall_with_openings, Doorway, Wall, WallAxis};
pub use stairs::Staircase;
pub use ramp::Ramp;
pub use platform::platform;
pub use pillar::{cover_block, pillar};
