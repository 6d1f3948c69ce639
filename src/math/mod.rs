//! Mathematical utilities and data structures

pub mod volume;
pub mod plane;

pub use volume::Volume;
pub use plane::HalfSpace;
