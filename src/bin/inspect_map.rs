//! Map inspector: parses a `.map` file, re-validates every brush and prints
//! a summary.
//!
//! Usage: cargo run --bin inspect_map -- <FILE>

use std::collections::BTreeMap;
use std::process::ExitCode;

use mapforge::map::parse_level;

fn main() -> ExitCode {
    mapforge::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: inspect_map <FILE>");
        return ExitCode::FAILURE;
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    // Every brush is validated as a bounded convex solid while parsing
    let level = match parse_level(&text) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("error: {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut classes: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in level.iter() {
        *classes.entry(entity.classname()).or_default() += 1;
    }
    let planes: usize = level.iter().flat_map(|e| e.brushes()).map(|b| b.planes().len()).sum();

    println!("=== {} ===", path);
    if let Some(wad) = level.worldspawn().get("wad") {
        println!("WAD:      {}", wad);
    }
    println!("Brushes:  {} ({} planes, all valid)", level.brush_count(), planes);
    println!("Entities: {}", level.entities().len() + 1);
    for (class, count) in &classes {
        println!("  {:<24} {}", class, count);
    }
    ExitCode::SUCCESS
}
