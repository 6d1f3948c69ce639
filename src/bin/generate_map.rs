//! Dungeon generator binary: writes a brush-based `.map` file.
//!
//! Usage: cargo run --release --bin generate_map -- [OPTIONS]
//!
//! Options:
//!   --seed <N>        Random seed (default: 12345)
//!   --grid <N>        Grid cells per side (default: 4)
//!   --rooms <N>       Number of rooms (default: 5)
//!   --room-min <N>    Smallest room span in cells (default: 1)
//!   --room-max <N>    Largest room span in cells (default: 2)
//!   --theme <NAME>    medieval, tech, metal or stone (default: medieval)
//!   --variety         Draw textures randomly from each pool
//!   --supplies        Place health, ammo and a weapon in the spawn room
//!   --wad <PATH>      WAD path written to the worldspawn
//!   --config <FILE>   JSON config; flags above override its values
//!   --output <FILE>   Output path (default: dungeon.map)
//!
//! The map text is fully built before the output file is touched, so a
//! failed run never leaves a partial file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use mapforge::generation::{GenerationConfig, GenerationPipeline, WadPath};
use mapforge::texture::Theme;

fn main() -> ExitCode {
    mapforge::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::FAILURE;
        }
    };
    let output = PathBuf::from(parse_str_arg(&args, "--output").unwrap_or_else(|| "dungeon.map".to_string()));

    println!("=== Dungeon Map Generator ===");
    println!("Seed:  {}", config.seed);
    println!("Grid:  {}x{}, {} rooms ({}..={} cells)",
        config.grid_size, config.grid_size, config.num_rooms, config.room_min, config.room_max);
    println!("Output: {}", output.display());
    println!();

    let start = Instant::now();
    let result = GenerationPipeline::new(&config).and_then(|pipeline| {
        let generated = pipeline.run()?;
        let text = pipeline.writer().write(&generated.level);
        Ok((generated, text))
    });
    let (generated, text) = match result {
        Ok(done) => done,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&output, &text) {
        eprintln!("error: cannot write {}: {}", output.display(), e);
        return ExitCode::FAILURE;
    }

    println!("{}", generated.layout.ascii());
    println!("Rooms:     {}", generated.layout.rooms().len());
    println!("Corridors: {}", generated.layout.corridors().len());
    println!("Brushes:   {}", generated.level.brush_count());
    println!("Entities:  {}", generated.level.entities().len() + 1);
    println!("Done in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    ExitCode::SUCCESS
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(args: &[String]) -> Result<GenerationConfig, String> {
    let mut config = match parse_str_arg(args, "--config") {
        Some(path) => GenerationConfig::load(&path).map_err(|e| format!("{}: {}", path, e))?,
        None => GenerationConfig::default(),
    };

    if let Some(seed) = parse_arg(args, "--seed")? {
        config.seed = seed;
    }
    if let Some(grid) = parse_arg(args, "--grid")? {
        config.grid_size = grid;
    }
    if let Some(rooms) = parse_arg(args, "--rooms")? {
        config.num_rooms = rooms;
    }
    if let Some(min) = parse_arg(args, "--room-min")? {
        config.room_min = min;
    }
    if let Some(max) = parse_arg(args, "--room-max")? {
        config.room_max = max;
    }
    if let Some(theme) = parse_arg::<Theme>(args, "--theme")? {
        config = config.with_theme(theme);
    }
    if let Some(wad) = parse_str_arg(args, "--wad") {
        config.wad_path = WadPath::Single(wad);
    }
    if args.iter().any(|a| a == "--variety") {
        config.texture_variety = true;
    }
    if args.iter().any(|a| a == "--supplies") {
        config.supplies = true;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_arg<T: FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    match parse_str_arg(args, flag) {
        Some(s) => s.parse().map(Some).map_err(|_| format!("invalid value for {}: {}", flag, s)),
        None => Ok(None),
    }
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("generate_map").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(build_config(&args(&[])).unwrap(), GenerationConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = build_config(&args(&[
            "--seed", "7", "--grid", "6", "--rooms", "9", "--room-max", "3",
            "--theme", "stone", "--variety", "--wad", "id1/gfx.wad",
        ]))
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!((config.grid_size, config.num_rooms, config.room_max), (6, 9, 3));
        assert_eq!(config.theme, Theme::Stone);
        assert!(config.texture_variety);
        assert_eq!(config.wad_path.joined(), "id1/gfx.wad");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(build_config(&args(&["--grid", "four"])).unwrap_err().contains("--grid"));
        assert!(build_config(&args(&["--theme", "lava"])).is_err());
        let err = build_config(&args(&["--grid", "2", "--rooms", "5"])).unwrap_err();
        assert!(err.contains("grid too small"));
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 5, "num_rooms": 6, "title": "Keep" }}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let config = build_config(&args(&["--config", &path, "--rooms", "4"])).unwrap();
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.num_rooms, 4);
        assert_eq!(config.title, "Keep");
    }
}
