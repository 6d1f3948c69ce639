//! Hollow shells around room and corridor interiors.
//!
//! Every shell brush shares its boundary coordinates exactly with the
//! interior volume, so shells of neighbouring spaces meet on congruent faces.

use crate::brush::{Brush, Heading, TextureAlign};
use crate::core::error::ConfigError;
use crate::core::types::Result;
use crate::math::Volume;

use super::door::{wall_with_openings, Doorway, Wall, WallAxis};

/// Textures for the three shell roles
#[derive(Debug, Clone, PartialEq)]
pub struct ShellTextures {
    pub floor: TextureAlign,
    pub wall: TextureAlign,
    pub ceiling: TextureAlign,
}

/// A doorway in one wall of a room shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    /// The wall this opening pierces
    pub side: Heading,
    pub door: Doorway,
}

/// Floor and ceiling slabs covering the interior footprint plus the walls
fn slabs(interior: &Volume, thickness: f64, textures: &ShellTextures) -> Result<[Brush; 2]> {
    let (min, max) = (interior.min(), interior.max());
    let footprint = Volume::from_bounds(
        min.x - thickness, min.y - thickness, min.z,
        max.x + thickness, max.y + thickness, max.z,
    )?;
    let floor = footprint.with_z(min.z - thickness, min.z)?;
    let ceiling = footprint.with_z(max.z, max.z + thickness)?;
    Ok([
        Brush::from_volume(&floor, &textures.floor)?,
        Brush::from_volume(&ceiling, &textures.ceiling)?,
    ])
}

/// The four walls of a box shell. West/east walls run the full outer length,
/// south/north walls sit between them.
fn walls(interior: &Volume, thickness: f64) -> [(Heading, Wall); 4] {
    let (min, max) = (interior.min(), interior.max());
    let along_y = |near, far| Wall {
        axis: WallAxis::Y,
        start: min.y - thickness,
        end: max.y + thickness,
        near,
        far,
        floor_z: min.z,
        ceiling_z: max.z,
    };
    let along_x = |near, far| Wall {
        axis: WallAxis::X,
        start: min.x,
        end: max.x,
        near,
        far,
        floor_z: min.z,
        ceiling_z: max.z,
    };
    [
        (Heading::West, along_y(min.x - thickness, min.x)),
        (Heading::East, along_y(max.x, max.x + thickness)),
        (Heading::South, along_x(min.y - thickness, min.y)),
        (Heading::North, along_x(max.y, max.y + thickness)),
    ]
}

/// Closed box shell around `interior`: floor, ceiling, then west, east, south
/// and north walls, each wall split around its openings.
///
/// Openings must lie strictly inside the interior's extent along their wall.
pub fn box_shell(
    interior: &Volume,
    thickness: f64,
    openings: &[Opening],
    textures: &ShellTextures,
) -> Result<Vec<Brush>> {
    if thickness <= 0.0 {
        return Err(ConfigError::InvalidDimension { name: "wall_thickness", value: thickness }.into());
    }
    let mut brushes: Vec<Brush> = slabs(interior, thickness, textures)?.into();

    let (min, max) = (interior.min(), interior.max());
    for (side, wall) in walls(interior, thickness) {
        let doors: Vec<Doorway> = openings
            .iter()
            .filter(|o| o.side == side)
            .map(|o| o.door)
            .collect();
        let (start, end) = if side.is_x() { (min.y, max.y) } else { (min.x, max.x) };
        for door in &doors {
            door.check_fits(start, end, max.z - min.z)?;
        }
        brushes.extend(wall_with_openings(&wall, &doors, &textures.wall)?);
    }
    Ok(brushes)
}

/// Shell of a straight corridor running along `run`: floor, ceiling and the
/// two side walls. Both ends stay open onto the rooms it joins.
pub fn corridor_shell(
    interior: &Volume,
    thickness: f64,
    run: WallAxis,
    textures: &ShellTextures,
) -> Result<Vec<Brush>> {
    if thickness <= 0.0 {
        return Err(ConfigError::InvalidDimension { name: "wall_thickness", value: thickness }.into());
    }
    let (min, max) = (interior.min(), interior.max());
    let (floor, ceiling, side_a, side_b) = match run {
        WallAxis::X => (
            Volume::from_bounds(min.x, min.y - thickness, min.z - thickness, max.x, max.y + thickness, min.z)?,
            Volume::from_bounds(min.x, min.y - thickness, max.z, max.x, max.y + thickness, max.z + thickness)?,
            Volume::from_bounds(min.x, min.y - thickness, min.z, max.x, min.y, max.z)?,
            Volume::from_bounds(min.x, max.y, min.z, max.x, max.y + thickness, max.z)?,
        ),
        WallAxis::Y => (
            Volume::from_bounds(min.x - thickness, min.y, min.z - thickness, max.x + thickness, max.y, min.z)?,
            Volume::from_bounds(min.x - thickness, min.y, max.z, max.x + thickness, max.y, max.z + thickness)?,
            Volume::from_bounds(min.x - thickness, min.y, min.z, min.x, max.y, max.z)?,
            Volume::from_bounds(max.x, min.y, min.z, max.x + thickness, max.y, max.z)?,
        ),
    };
    Ok(vec![
        Brush::from_volume(&floor, &textures.floor)?,
        Brush::from_volume(&ceiling, &textures.ceiling)?,
        Brush::from_volume(&side_a, &textures.wall)?,
        Brush::from_volume(&side_b, &textures.wall)?,
    ])
}
