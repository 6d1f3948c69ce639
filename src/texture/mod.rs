//! Texture assignment: maps a brush's architectural role to a texture name.
//!
//! Pools are plain immutable values. Overriding a pool rebuilds the whole
//! value and re-validates it, so a generation run never observes a pool
//! changing underneath it. Variety selection draws from the caller's seeded
//! generator only.

pub mod theme;

pub use theme::Theme;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::brush::TextureAlign;
use crate::core::error::ConfigError;

/// Architectural role of a brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Floor,
    Wall,
    Ceiling,
    Feature,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Floor, Role::Wall, Role::Ceiling, Role::Feature];

    pub fn name(self) -> &'static str {
        match self {
            Role::Floor => "floor",
            Role::Wall => "wall",
            Role::Ceiling => "ceiling",
            Role::Feature => "feature",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check a texture identifier against the map grammar (`[A-Za-z0-9_*+]+`)
pub fn is_valid_texture_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '*' | '+'))
}

/// Per-role texture pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TexturePools {
    pub floor: Vec<String>,
    pub wall: Vec<String>,
    pub ceiling: Vec<String>,
    pub feature: Vec<String>,
}

impl Default for TexturePools {
    fn default() -> Self {
        Theme::Medieval.pools()
    }
}

impl TexturePools {
    /// Build pools from string slices, validating every role
    pub fn new(
        floor: &[&str],
        wall: &[&str],
        ceiling: &[&str],
        feature: &[&str],
    ) -> Result<Self, ConfigError> {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        let pools = Self {
            floor: owned(floor),
            wall: owned(wall),
            ceiling: owned(ceiling),
            feature: owned(feature),
        };
        pools.validate()?;
        Ok(pools)
    }

    pub fn pool(&self, role: Role) -> &[String] {
        match role {
            Role::Floor => &self.floor,
            Role::Wall => &self.wall,
            Role::Ceiling => &self.ceiling,
            Role::Feature => &self.feature,
        }
    }

    /// Return a copy with `role`'s pool replaced. The result is re-validated.
    pub fn with_pool<S: AsRef<str>>(&self, role: Role, names: &[S]) -> Result<Self, ConfigError> {
        let names: Vec<String> = names.iter().map(|s| s.as_ref().to_string()).collect();
        let mut next = self.clone();
        match role {
            Role::Floor => next.floor = names,
            Role::Wall => next.wall = names,
            Role::Ceiling => next.ceiling = names,
            Role::Feature => next.feature = names,
        }
        next.validate()?;
        Ok(next)
    }

    /// Every pool non-empty, every name valid in the map grammar
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in Role::ALL {
            let pool = self.pool(role);
            if pool.is_empty() {
                return Err(ConfigError::EmptyTexturePool(role));
            }
            if let Some(bad) = pool.iter().find(|n| !is_valid_texture_name(n)) {
                return Err(ConfigError::InvalidTextureName(bad.clone()));
            }
        }
        Ok(())
    }

    /// Pick a texture for `role`.
    ///
    /// Without variety this is always the pool's first entry and the generator
    /// is left untouched. With variety one value is drawn from `rng`.
    pub fn resolve<R: Rng>(
        &self,
        role: Role,
        variety: bool,
        rng: &mut R,
    ) -> Result<TextureAlign, ConfigError> {
        let pool = self.pool(role);
        if pool.is_empty() {
            return Err(ConfigError::EmptyTexturePool(role));
        }
        let name = if variety {
            &pool[rng.gen_range(0..pool.len())]
        } else {
            &pool[0]
        };
        Ok(TextureAlign::new(name.as_str()))
    }
}
