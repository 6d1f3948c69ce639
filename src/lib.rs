//! Mapforge - procedural dungeon generator emitting brush-based `.map` levels
//!
//! ```no_run
//! use mapforge::generation::{generate_map_text, GenerationConfig};
//!
//! let text = generate_map_text(&GenerationConfig::default())?;
//! std::fs::write("dungeon.map", text)?;
//! # Ok::<(), mapforge::core::Error>(())
//! ```

pub mod core;
pub mod math;
pub mod brush;
pub mod texture;
pub mod feature;
pub mod layout;
pub mod entity;
pub mod map;
pub mod generation;
