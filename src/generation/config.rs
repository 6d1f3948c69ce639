//! Generation configuration.
//!
//! A plain value with documented defaults. Overrides build a new validated
//! value instead of mutating shared state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::Result;
use crate::entity::{is_valid_property_value, PlacementParams};
use crate::generation::decor::check_fits;
use crate::layout::{CellRect, LayoutParams};
use crate::texture::{is_valid_texture_name, Role, TexturePools, Theme};

/// One WAD path or several, joined with `;` in the worldspawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WadPath {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for WadPath {
    fn default() -> Self {
        WadPath::Single("gfx/base.wad".to_string())
    }
}

impl WadPath {
    pub fn joined(&self) -> String {
        match self {
            WadPath::Single(path) => path.clone(),
            WadPath::Multiple(paths) => paths.join(";"),
        }
    }
}

/// Configuration for the level generation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Cells per grid side.
    pub grid_size: u32,
    /// Smallest room span in cells.
    pub room_min: u32,
    /// Largest room span in cells.
    pub room_max: u32,
    pub num_rooms: u32,
    /// Seed for layout, decoration and texture variety.
    pub seed: u64,
    pub texture_variety: bool,
    pub wad_path: WadPath,
    /// Preset used when `textures` is not given.
    pub theme: Theme,
    /// Explicit per-role pools, overriding the theme.
    pub textures: Option<TexturePools>,
    pub platform_top_texture: String,

    pub cell_size: f64,
    /// Inset of a room interior from its cell span (must exceed wall_thickness).
    pub room_margin: f64,
    pub wall_thickness: f64,
    pub room_height: f64,
    pub floor_z: f64,
    /// Corridor and doorway width.
    pub door_width: f64,
    /// Corridor and doorway height above the floor.
    pub door_height: f64,
    pub features: bool,

    pub spawn_height: f64,
    pub light_offset: f64,
    pub light_level: f64,
    pub light_color: [f64; 3],
    pub light_spacing: f64,
    pub supplies: bool,

    pub title: String,
    /// Worldspawn `light` key.
    pub ambient_light: Option<f64>,
    /// Worldspawn `fog` key: density, r, g, b.
    pub fog: Option<[f64; 4]>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let layout = LayoutParams::default();
        let placement = PlacementParams::default();
        Self {
            grid_size: layout.grid_size,
            room_min: layout.room_min,
            room_max: layout.room_max,
            num_rooms: layout.num_rooms,
            seed: 12345,
            texture_variety: false,
            wad_path: WadPath::default(),
            theme: Theme::default(),
            textures: None,
            platform_top_texture: "metal1_1".to_string(),
            cell_size: layout.cell_size,
            room_margin: layout.room_margin,
            wall_thickness: layout.wall_thickness,
            room_height: layout.room_height,
            floor_z: layout.floor_z,
            door_width: layout.door_width,
            door_height: layout.door_height,
            features: layout.features,
            spawn_height: placement.spawn_height,
            light_offset: placement.light_offset,
            light_level: placement.light_level,
            light_color: placement.light_color,
            light_spacing: placement.light_spacing,
            supplies: placement.supplies,
            title: "Procedural Dungeon".to_string(),
            ambient_light: None,
            fog: None,
        }
    }
}

impl GenerationConfig {
    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective texture pools: explicit pools or the theme preset
    pub fn texture_pools(&self) -> TexturePools {
        self.textures.clone().unwrap_or_else(|| self.theme.pools())
    }

    /// Copy with one role's pool replaced, re-validated
    pub fn with_texture_pool<S: AsRef<str>>(&self, role: Role, names: &[S]) -> std::result::Result<Self, ConfigError> {
        let pools = self.texture_pools().with_pool(role, names)?;
        Ok(Self { textures: Some(pools), ..self.clone() })
    }

    /// Copy using a theme preset, dropping explicit pools
    pub fn with_theme(&self, theme: Theme) -> Self {
        Self { theme, textures: None, ..self.clone() }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            grid_size: self.grid_size,
            room_min: self.room_min,
            room_max: self.room_max,
            num_rooms: self.num_rooms,
            cell_size: self.cell_size,
            room_margin: self.room_margin,
            wall_thickness: self.wall_thickness,
            room_height: self.room_height,
            floor_z: self.floor_z,
            door_width: self.door_width,
            door_height: self.door_height,
            features: self.features,
        }
    }

    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            spawn_height: self.spawn_height,
            light_offset: self.light_offset,
            light_level: self.light_level,
            light_color: self.light_color,
            light_spacing: self.light_spacing,
            supplies: self.supplies,
        }
    }

    /// Check every option before any geometry exists
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.layout_params().validate()?;
        self.texture_pools().validate()?;
        if !is_valid_texture_name(&self.platform_top_texture) {
            return Err(ConfigError::InvalidTextureName(self.platform_top_texture.clone()));
        }
        for (name, value) in [
            ("light_spacing", self.light_spacing),
            ("light_level", self.light_level),
            ("light_offset", self.light_offset),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        if !(self.spawn_height >= 0.0 && self.spawn_height < self.room_height) {
            return Err(ConfigError::InvalidDimension { name: "spawn_height", value: self.spawn_height });
        }
        if self.light_offset >= self.room_height {
            return Err(ConfigError::InvalidDimension { name: "light_offset", value: self.light_offset });
        }
        // Only rooms spanning at least 2x2 cells are decorated
        if self.features && self.room_max >= 2 {
            let smallest = self.layout_params().room_interior(&CellRect::new(0, 0, 2, 2)).map_err(|_| {
                let span = 2.0 * (self.cell_size - self.room_margin);
                ConfigError::DecorationDoesNotFit { width: span, depth: span, height: self.room_height }
            })?;
            check_fits(&smallest, &self.placement_params())?;
        }
        for (key, value) in [("message", self.title.clone()), ("wad", self.wad_path.joined())] {
            if !is_valid_property_value(&value) {
                return Err(ConfigError::InvalidPropertyValue { key, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = GenerationConfig::default();
        config.validate().unwrap();
        assert_eq!(config.wad_path.joined(), "gfx/base.wad");
        assert_eq!(config.texture_pools().floor, ["ground1_6"]);
        assert_eq!(config.layout_params(), LayoutParams::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GenerationConfig::from_json_str(r#"{ "grid_size": 6, "num_rooms": 9, "theme": "tech" }"#).unwrap();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.num_rooms, 9);
        assert_eq!(config.room_max, 2);
        assert_eq!(config.texture_pools().wall, ["tech01_1"]);
    }

    #[test]
    fn test_wad_list_joined() {
        let config = GenerationConfig::from_json_str(r#"{ "wad_path": ["gfx/base.wad", "gfx/tech.wad"] }"#).unwrap();
        assert_eq!(config.wad_path.joined(), "gfx/base.wad;gfx/tech.wad");
    }

    #[test]
    fn test_quoted_title_rejected() {
        let config = GenerationConfig { title: "The \"Pit\"".into(), ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPropertyValue { key: "message", value: "The \"Pit\"".into() })
        );

        let json = r#"{ "wad_path": ["gfx/base.wad", "gfx/te\nch.wad"] }"#;
        let err = GenerationConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("invalid value for wad"), "{}", err);
    }

    #[test]
    fn test_decoration_must_fit_rooms() {
        let tight = GenerationConfig { cell_size: 160.0, room_margin: 40.0, ..Default::default() };
        assert_eq!(
            tight.validate(),
            Err(ConfigError::DecorationDoesNotFit { width: 240.0, depth: 240.0, height: 192.0 })
        );
        let low = GenerationConfig { room_height: 60.0, door_height: 48.0, ..Default::default() };
        assert!(matches!(low.validate(), Err(ConfigError::DecorationDoesNotFit { .. })));

        // Without decoration, or without rooms big enough for it, the same sizes are fine
        GenerationConfig { features: false, ..tight.clone() }.validate().unwrap();
        GenerationConfig { room_max: 1, ..tight }.validate().unwrap();
        GenerationConfig { cell_size: 320.0, room_margin: 40.0, room_height: 160.0, door_height: 96.0, ..Default::default() }
            .validate()
            .unwrap();
    }

    #[test]
    fn test_json_rejects_empty_pool() {
        let json = r#"{ "textures": { "floor": [], "wall": ["a"], "ceiling": ["b"], "feature": ["c"] } }"#;
        let err = GenerationConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("empty texture pool for role floor"), "{}", err);
    }

    #[test]
    fn test_with_texture_pool() {
        let base = GenerationConfig::default();
        let next = base.with_texture_pool(Role::Wall, &["bricka2_1", "stone1_3"]).unwrap();
        assert_eq!(next.texture_pools().wall, ["bricka2_1", "stone1_3"]);
        // Base value untouched
        assert_eq!(base.texture_pools().wall, ["stone1_3"]);

        let empty: [&str; 0] = [];
        assert_eq!(
            base.with_texture_pool(Role::Floor, &empty).unwrap_err(),
            ConfigError::EmptyTexturePool(Role::Floor)
        );
    }

    #[test]
    fn test_invalid_options() {
        let bad = GenerationConfig { num_rooms: 20, grid_size: 4, ..Default::default() };
        assert!(matches!(bad.validate(), Err(ConfigError::GridTooSmall { .. })));
        let bad = GenerationConfig { platform_top_texture: "has space".into(), ..Default::default() };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidTextureName(_))));
        let bad = GenerationConfig { light_spacing: 0.0, ..Default::default() };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidDimension { name: "light_spacing", .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 99, "supplies": true, "fog": [0.05, 0.3, 0.3, 0.3] }}"#).unwrap();
        let config = GenerationConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 99);
        assert!(config.supplies);
        assert_eq!(config.fog, Some([0.05, 0.3, 0.3, 0.3]));
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ grid_size: 4 }}").unwrap();
        assert!(matches!(GenerationConfig::load(file.path()), Err(crate::core::error::Error::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GenerationConfig { seed: 7, texture_variety: true, ..Default::default() };
        let back = GenerationConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
