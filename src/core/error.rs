//! Error types for the generator

use thiserror::Error;

use crate::core::types::DVec3;
use crate::texture::Role;

/// Main error type returned by the top-level generation entry points
#[derive(Debug, Error)]
pub enum Error {
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),

    #[error("GeometryError: {0}")]
    Geometry(#[from] GeometryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl Error {
    /// True for invalid or inconsistent input configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// True for degenerate or inconsistent volume/plane construction.
    pub fn is_geometry(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Invalid or inconsistent input configuration. Always fatal, always raised
/// before any output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid_size must be positive")]
    InvalidGridSize,

    #[error("invalid room span range {min}..={max} (need 0 < room_min <= room_max)")]
    InvalidRoomRange { min: u32, max: u32 },

    #[error("num_rooms must be positive")]
    InvalidRoomCount,

    #[error("grid too small for num_rooms requested ({requested} rooms on a {grid_size}x{grid_size} grid)")]
    GridTooSmall { requested: u32, grid_size: u32 },

    #[error("empty texture pool for role {0}")]
    EmptyTexturePool(Role),

    #[error("invalid texture name {0:?}")]
    InvalidTextureName(String),

    #[error("door wider than wall span (door {door_width}, span {span})")]
    DoorWiderThanWall { door_width: f64, span: f64 },

    #[error("door at {center} (width {door_width}) extends past wall span {start}..{end}")]
    DoorOutsideWall { center: f64, door_width: f64, start: f64, end: f64 },

    #[error("door height {door_height} leaves no lintel below wall height {wall_height}")]
    DoorTooTall { door_height: f64, wall_height: f64 },

    #[error("wall openings overlap at {0}")]
    OverlappingOpenings(f64),

    #[error("no spawn room designated")]
    NoSpawnRoom,

    #[error("room_margin {margin} must exceed wall_thickness {thickness}")]
    MarginTooThin { margin: f64, thickness: f64 },

    #[error("door_width {door_width} does not fit a single-cell room wall of {wall}")]
    CorridorTooWide { door_width: f64, wall: f64 },

    #[error("{name} must be positive, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("room interior {width}x{depth}x{height} too small for its decoration")]
    DecorationDoesNotFit { width: f64, depth: f64, height: f64 },

    #[error("invalid value for {key}: {value:?} contains a quote or line break")]
    InvalidPropertyValue { key: &'static str, value: String },
}

/// Degenerate or inconsistent volume/plane construction. Indicates an
/// emitter bug or a caller passing out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("degenerate volume {min} - {max}")]
    DegenerateVolume { min: DVec3, max: DVec3 },

    #[error("zero-height ramp")]
    ZeroHeightRamp,

    #[error("plane points are collinear: {0:?}")]
    CollinearPoints([DVec3; 3]),

    #[error("brush needs at least 4 planes, got {0}")]
    TooFewPlanes(usize),

    #[error("brush planes do not enclose a bounded solid")]
    Unbounded,

    #[error("plane {0} faces into the brush")]
    InvertedPlane(usize),

    #[error("plane {0} does not touch the brush surface")]
    RedundantPlane(usize),

    #[error("texture scale must be non-zero")]
    ZeroTextureScale,

    #[error("non-finite coordinate")]
    NonFiniteCoordinate,
}
