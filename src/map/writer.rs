//! Level serializer.
//!
//! Output grammar:
//!
//! ```text
//! // Game: Quake
//! // Format: Standard
//!
//! // entity 0
//! {
//! "classname" "worldspawn"
//! // brush 0
//! {
//! ( x y z ) ( x y z ) ( x y z ) TEXTURE xoff yoff rot xscale yscale
//! }
//! }
//! ```

use std::fmt::Write;

use crate::brush::{Brush, Plane};
use crate::entity::{Entity, Level};

/// Shortest decimal form that parses back to the same `f64`. Never uses
/// scientific notation; integral values carry no fractional part and
/// negative zero prints as `0`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{}", v)
}

/// Serializer carrying the header comment block
#[derive(Debug, Clone)]
pub struct MapWriter {
    header: Vec<String>,
}

impl Default for MapWriter {
    fn default() -> Self {
        Self {
            header: vec!["Game: Quake".to_string(), "Format: Standard".to_string()],
        }
    }
}

impl MapWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header line; newlines are flattened so the block stays a
    /// run of `//` comments.
    pub fn with_comment(mut self, line: impl AsRef<str>) -> Self {
        self.header.push(line.as_ref().replace(['\n', '\r'], " "));
        self
    }

    pub fn write(&self, level: &Level) -> String {
        let mut out = String::with_capacity(level.brush_count() * 400 + 256);
        for line in &self.header {
            let _ = writeln!(out, "// {}", line);
        }
        out.push('\n');
        for (i, entity) in level.iter().enumerate() {
            let _ = writeln!(out, "// entity {}", i);
            write_entity(&mut out, entity);
        }
        out
    }
}

/// Serialize with the default header
pub fn serialize(level: &Level) -> String {
    MapWriter::new().write(level)
}

fn write_entity(out: &mut String, entity: &Entity) {
    out.push_str("{\n");
    for (key, value) in entity.properties() {
        let _ = writeln!(out, "\"{}\" \"{}\"", key, value);
    }
    for (i, brush) in entity.brushes().iter().enumerate() {
        let _ = writeln!(out, "// brush {}", i);
        write_brush(out, brush);
    }
    out.push_str("}\n");
}

fn write_brush(out: &mut String, brush: &Brush) {
    out.push_str("{\n");
    for plane in brush.planes() {
        write_plane(out, plane);
    }
    out.push_str("}\n");
}

fn write_plane(out: &mut String, plane: &Plane) {
    for p in plane.points() {
        let _ = write!(out, "( {} {} {} ) ", format_number(p.x), format_number(p.y), format_number(p.z));
    }
    let t = &plane.texture;
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}",
        t.name,
        format_number(t.x_offset),
        format_number(t.y_offset),
        format_number(t.rotation),
        format_number(t.x_scale()),
        format_number(t.y_scale()),
    );
}
