//! Level generation pipeline.
//!
//! The pipeline runs each stage to completion before the next:
//! 1. Grid layout (rooms, corridors, room kinds)
//! 2. Shell and decoration brushes per room, then corridor shells
//! 3. Point entities (player start, lights, supplies)
//! 4. Serialization
//!
//! One seeded generator is threaded through every stage, so a
//! `(seed, configuration)` pair always reproduces the same text.

pub mod config;
pub mod decor;

pub use config::{GenerationConfig, WadPath};
pub use decor::{check_fits, decorate, DecorTextures};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::brush::TextureAlign;
use crate::core::types::Result;
use crate::entity::{place_entities, Entity, Level};
use crate::feature::{box_shell, corridor_shell, ShellTextures};
use crate::layout::{LayoutGenerator, LayoutGraph};
use crate::map::{format_number, MapWriter};
use crate::texture::{Role, TexturePools};

/// Layout and level of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedLevel {
    pub layout: LayoutGraph,
    pub level: Level,
}

/// Orchestrates layout, geometry emission and entity placement
pub struct GenerationPipeline {
    config: GenerationConfig,
    pools: TexturePools,
}

impl GenerationPipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            pools: config.texture_pools(),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run layout and geometry with a generator seeded from the config
    pub fn run(&self) -> Result<GeneratedLevel> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        log::info!("Generating level (seed {}, {} rooms on {}x{})",
            self.config.seed, self.config.num_rooms, self.config.grid_size, self.config.grid_size);

        let layout = LayoutGenerator::new(self.config.layout_params()).generate(&mut rng)?;
        let level = self.build_level(&layout, &mut rng)?;
        Ok(GeneratedLevel { layout, level })
    }

    /// Emit every brush and entity of `layout`
    pub fn build_level<R: Rng>(&self, layout: &LayoutGraph, rng: &mut R) -> Result<Level> {
        let t = self.config.wall_thickness;
        let mut world = self.worldspawn();

        for room in layout.rooms() {
            let shell = self.shell_textures(rng)?;
            let decor = DecorTextures {
                feature: self.texture(Role::Feature, rng)?,
                platform_top: TextureAlign::new(self.config.platform_top_texture.as_str()),
            };
            let before = world.brushes().len();
            world.extend_brushes(box_shell(room.interior(), t, room.openings(), &shell)?);
            world.extend_brushes(decorate(room, &decor)?);
            log::debug!("{}: {:?}, {} openings, {} brushes",
                room.id(), room.kind(), room.openings().len(), world.brushes().len() - before);
        }
        for corridor in layout.corridors() {
            let shell = self.shell_textures(rng)?;
            world.extend_brushes(corridor_shell(&corridor.interior, t, corridor.run, &shell)?);
        }

        let mut level = Level::new(world);
        for entity in place_entities(layout, &self.config.placement_params())? {
            level.add_entity(entity);
        }
        log::info!("Level built: {} brushes, {} entities",
            level.brush_count(), level.entities().len() + 1);
        Ok(level)
    }

    /// Serializer carrying this run's header
    pub fn writer(&self) -> MapWriter {
        let theme = match self.config.textures {
            Some(_) => "custom".to_string(),
            None => self.config.theme.to_string(),
        };
        MapWriter::new()
            .with_comment(format!("Generator: mapforge {}", env!("CARGO_PKG_VERSION")))
            .with_comment(format!("Seed: {}", self.config.seed))
            .with_comment(format!("Theme: {}", theme))
    }

    fn worldspawn(&self) -> Entity {
        let mut world = Entity::new("worldspawn")
            .with("wad", self.config.wad_path.joined())
            .with("message", self.config.title.as_str());
        if let Some(light) = self.config.ambient_light {
            world.set("light", format_number(light));
        }
        if let Some(fog) = self.config.fog {
            world.set("fog", fog.map(format_number).join(" "));
        }
        world
    }

    fn texture<R: Rng>(&self, role: Role, rng: &mut R) -> Result<TextureAlign> {
        Ok(self.pools.resolve(role, self.config.texture_variety, rng)?)
    }

    fn shell_textures<R: Rng>(&self, rng: &mut R) -> Result<ShellTextures> {
        Ok(ShellTextures {
            floor: self.texture(Role::Floor, rng)?,
            wall: self.texture(Role::Wall, rng)?,
            ceiling: self.texture(Role::Ceiling, rng)?,
        })
    }
}

/// Generate a level from `config`
pub fn generate(config: &GenerationConfig) -> Result<Level> {
    Ok(GenerationPipeline::new(config)?.run()?.level)
}

/// Generate and serialize a level. Nothing is returned unless every stage
/// succeeded.
pub fn generate_map_text(config: &GenerationConfig) -> Result<String> {
    let pipeline = GenerationPipeline::new(config)?;
    let generated = pipeline.run()?;
    Ok(pipeline.writer().write(&generated.level))
}
