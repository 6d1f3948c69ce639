//! Texture theme presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TexturePools;

/// Visual theme applied consistently across a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Medieval,
    Tech,
    Metal,
    Stone,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Medieval, Theme::Tech, Theme::Metal, Theme::Stone];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Medieval => "medieval",
            Theme::Tech => "tech",
            Theme::Metal => "metal",
            Theme::Stone => "stone",
        }
    }

    /// Single-entry pools for this theme (floor, wall, ceiling, trim)
    pub fn pools(self) -> TexturePools {
        let (floor, wall, ceiling, feature) = match self {
            Theme::Medieval => ("ground1_6", "stone1_3", "ceiling4", "metal1_1"),
            Theme::Tech => ("floor01_5", "tech01_1", "tech02_1", "metal2_1"),
            Theme::Metal => ("metal5_1", "metal1_2", "metal4_2", "metal2_2"),
            Theme::Stone => ("rock4_1", "rock3_2", "ceiling5", "bricka2_1"),
        };
        TexturePools {
            floor: vec![floor.to_string()],
            wall: vec![wall.to_string()],
            ceiling: vec![ceiling.to_string()],
            feature: vec![feature.to_string()],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown theme '{}' (medieval, tech, metal, stone)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_theme_validates() {
        for theme in Theme::ALL {
            theme.pools().validate().unwrap();
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("TECH".parse::<Theme>().unwrap(), Theme::Tech);
        assert!("gothic".parse::<Theme>().is_err());
    }
}
