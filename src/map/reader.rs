//! Parser for the text map format produced by [`super::writer`].

use crate::brush::{Brush, Plane, TextureAlign};
use crate::core::error::Error;
use crate::core::types::{DVec3, Result};
use crate::entity::{Entity, Level};
use crate::texture::is_valid_texture_name;

/// A brush as written in the file, not yet validated as a solid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBrush {
    /// Line of the opening brace
    pub line: usize,
    pub planes: Vec<Plane>,
}

/// An entity as written in the file: properties in file order and its
/// raw brushes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntity {
    /// Line of the opening brace
    pub line: usize,
    pub properties: Vec<(String, String)>,
    pub brushes: Vec<RawBrush>,
}

impl RawEntity {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn plane_count(&self) -> usize {
        self.brushes.iter().map(|b| b.planes.len()).sum()
    }

    /// Validate brushes and rebuild the entity. Errors carry the line of
    /// the offending entity or brush.
    pub fn into_entity(self) -> Result<Entity> {
        let classname = self
            .get("classname")
            .ok_or_else(|| parse_error(self.line, "entity has no classname"))?;
        let mut entity = Entity::new(classname);
        for (key, value) in &self.properties {
            if key != "classname" {
                entity.set(key.as_str(), value.as_str());
            }
        }
        for (i, raw) in self.brushes.into_iter().enumerate() {
            let brush = Brush::new(raw.planes)
                .map_err(|e| parse_error(raw.line, format!("invalid brush {}: {}", i, e)))?;
            entity.add_brush(brush);
        }
        Ok(entity)
    }
}

enum Scope {
    Top,
    Entity(RawEntity),
    Brush(RawEntity, RawBrush),
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse { line, message: message.into() }
}

/// Parse map text into raw entities, in file order
pub fn parse(text: &str) -> Result<Vec<RawEntity>> {
    let mut entities = Vec::new();
    let mut scope = Scope::Top;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        scope = match (scope, line) {
            (Scope::Top, "{") => Scope::Entity(RawEntity { line: line_no, ..Default::default() }),
            (Scope::Top, _) => return Err(parse_error(line_no, format!("expected '{{', found {:?}", line))),
            (Scope::Entity(entity), "{") => Scope::Brush(entity, RawBrush { line: line_no, planes: Vec::new() }),
            (Scope::Entity(entity), "}") => {
                entities.push(entity);
                Scope::Top
            }
            (Scope::Entity(mut entity), _) => {
                entity.properties.push(parse_property(line, line_no)?);
                Scope::Entity(entity)
            }
            (Scope::Brush(mut entity, brush), "}") => {
                entity.brushes.push(brush);
                Scope::Entity(entity)
            }
            (Scope::Brush(entity, mut brush), _) => {
                brush.planes.push(parse_plane(line, line_no)?);
                Scope::Brush(entity, brush)
            }
        };
    }

    match scope {
        Scope::Top => Ok(entities),
        Scope::Entity(entity) | Scope::Brush(entity, _) => {
            Err(parse_error(entity.line, "unterminated entity"))
        }
    }
}

/// Parse map text into a level, validating every brush. The first entity
/// must be the worldspawn.
pub fn parse_level(text: &str) -> Result<Level> {
    let mut raw = parse(text)?.into_iter();
    let first = raw.next().ok_or_else(|| parse_error(1, "no entities"))?;
    let first_line = first.line;
    let world = first.into_entity()?;
    if world.classname() != "worldspawn" {
        return Err(parse_error(first_line, format!("first entity is {:?}, not worldspawn", world.classname())));
    }
    let mut level = Level::new(world);
    for entity in raw {
        level.add_entity(entity.into_entity()?);
    }
    Ok(level)
}

/// `"key" "value"`
fn parse_property(line: &str, line_no: usize) -> Result<(String, String)> {
    let mut fields = line.split('"');
    // Layout after splitting on quotes: "", key, " ", value, ""
    match (fields.next(), fields.next(), fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(""), Some(key), Some(sep), Some(value), Some(""), None) if sep.trim().is_empty() && !key.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(parse_error(line_no, format!("malformed property {:?}", line))),
    }
}

/// `( x y z ) ( x y z ) ( x y z ) TEXTURE xoff yoff rot xscale yscale`
fn parse_plane(line: &str, line_no: usize) -> Result<Plane> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 21 {
        return Err(parse_error(line_no, format!("expected 21 plane tokens, found {}", tokens.len())));
    }
    let number = |s: &str| -> Result<f64> {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| parse_error(line_no, format!("invalid number {:?}", s)))
    };

    let mut points = [DVec3::ZERO; 3];
    for (k, point) in points.iter_mut().enumerate() {
        let group = &tokens[k * 5..k * 5 + 5];
        if group[0] != "(" || group[4] != ")" {
            return Err(parse_error(line_no, "point must be written as ( x y z )"));
        }
        *point = DVec3::new(number(group[1])?, number(group[2])?, number(group[3])?);
    }

    let name = tokens[15];
    if !is_valid_texture_name(name) {
        return Err(parse_error(line_no, format!("invalid texture name {:?}", name)));
    }
    let texture = TextureAlign::new(name)
        .with_offset(number(tokens[16])?, number(tokens[17])?)
        .with_rotation(number(tokens[18])?)
        .with_scale(number(tokens[19])?, number(tokens[20])?)?;

    Ok(Plane::new(points[0], points[1], points[2], texture)?)
}
