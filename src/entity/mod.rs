//! Entities and the level aggregate.

pub mod placement;

pub use placement::{light_lattice, place_entities, player_start, supplies, PlacementParams};

use crate::brush::Brush;
use crate::core::types::DVec3;
use crate::map::format_number;

/// True when `value` can be written between quotes on a single map line
pub fn is_valid_property_value(value: &str) -> bool {
    !value.contains(['"', '\n', '\r'])
}

/// A key-value record, optionally owning brushes.
///
/// Properties keep insertion order; `classname` is always the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    properties: Vec<(String, String)>,
    brushes: Vec<Brush>,
}

impl Entity {
    pub fn new(classname: impl Into<String>) -> Self {
        Self {
            properties: vec![("classname".to_string(), classname.into())],
            brushes: Vec::new(),
        }
    }

    /// Point entity with an `origin` key
    pub fn point(classname: impl Into<String>, origin: DVec3) -> Self {
        Self::new(classname).with("origin", format_vec(origin))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a property, replacing an existing value in place.
    ///
    /// Quotes and line breaks cannot be represented in the map format, so
    /// they are replaced with `'` and a space.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let mut value = value.into();
        if !is_valid_property_value(&value) {
            value = value.replace('"', "'").replace(['\n', '\r'], " ");
        }
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn classname(&self) -> &str {
        self.get("classname").unwrap_or_default()
    }

    /// Parsed `origin` key, if present and well-formed
    pub fn origin(&self) -> Option<DVec3> {
        let mut parts = self.get("origin")?.split_whitespace().map(|s| s.parse::<f64>().ok());
        let v = DVec3::new(parts.next()??, parts.next()??, parts.next()??);
        parts.next().is_none().then_some(v)
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    pub fn add_brush(&mut self, brush: Brush) {
        self.brushes.push(brush);
    }

    pub fn extend_brushes(&mut self, brushes: impl IntoIterator<Item = Brush>) {
        self.brushes.extend(brushes);
    }
}

/// `"x y z"` origin string
pub fn format_vec(v: DVec3) -> String {
    format!("{} {} {}", format_number(v.x), format_number(v.y), format_number(v.z))
}

/// Root aggregate: worldspawn owning all solid brushes plus the other entities
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    worldspawn: Entity,
    entities: Vec<Entity>,
}

impl Level {
    pub fn new(worldspawn: Entity) -> Self {
        Self { worldspawn, entities: Vec::new() }
    }

    pub fn worldspawn(&self) -> &Entity {
        &self.worldspawn
    }

    pub fn worldspawn_mut(&mut self) -> &mut Entity {
        &mut self.worldspawn
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Worldspawn first, then the rest in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.worldspawn).chain(self.entities.iter())
    }

    pub fn brush_count(&self) -> usize {
        self.iter().map(|e| e.brushes().len()).sum()
    }

    pub fn count_class(&self, classname: &str) -> usize {
        self.iter().filter(|e| e.classname() == classname).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classname_first() {
        let e = Entity::new("light").with("light", "300").with("classname", "light");
        assert_eq!(e.properties()[0], ("classname".to_string(), "light".to_string()));
        assert_eq!(e.properties().len(), 2);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut e = Entity::new("worldspawn").with("wad", "a.wad").with("message", "hi");
        e.set("wad", "b.wad");
        assert_eq!(e.get("wad"), Some("b.wad"));
        assert_eq!(e.properties()[1].0, "wad");
    }

    #[test]
    fn test_set_strips_unwritable_characters() {
        let e = Entity::new("worldspawn").with("message", "The \"Pit\"\nlevel 1\r");
        assert_eq!(e.get("message"), Some("The 'Pit' level 1 "));
        assert!(is_valid_property_value("gfx/base.wad;gfx/tech.wad"));
        assert!(!is_valid_property_value("a\"b"));
    }

    #[test]
    fn test_origin() {
        let e = Entity::point("info_player_start", DVec3::new(128.0, -64.5, 24.0));
        assert_eq!(e.get("origin"), Some("128 -64.5 24"));
        assert_eq!(e.origin(), Some(DVec3::new(128.0, -64.5, 24.0)));
        assert_eq!(Entity::new("light").with("origin", "1 2").origin(), None);
    }

    #[test]
    fn test_level_iteration() {
        let mut level = Level::new(Entity::new("worldspawn"));
        level.add_entity(Entity::new("light"));
        level.add_entity(Entity::new("light"));
        level.add_entity(Entity::new("info_player_start"));
        let names: Vec<_> = level.iter().map(|e| e.classname()).collect();
        assert_eq!(names, ["worldspawn", "light", "light", "info_player_start"]);
        assert_eq!(level.count_class("light"), 2);
        assert_eq!(level.brush_count(), 0);
    }
}
