//! Text map format: serializer and parser.

pub mod reader;
pub mod writer;

pub use reader::{parse, parse_level, RawBrush, RawEntity};
pub use writer::{format_number, serialize, MapWriter};
