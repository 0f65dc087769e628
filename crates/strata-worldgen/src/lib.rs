//! Seed-driven 2D side-view world generation: noise heightmap, layered
//! materials, noise-carved caves, ore veins, chunked storage, and trees and
//! ground cover on the surface.

mod cave;
mod chunk;
mod config;
mod decoration;
mod generator;
mod heightmap;
mod material;
mod noise_field;
mod ore;
mod seed;

pub mod debug_viz;

pub use cave::{CaveConfig, CaveMask};
pub use chunk::{Chunk, ChunkIndex};
pub use config::{
    ConfigError, MAX_WORLD_COLUMNS, MAX_WORLD_HEIGHT, OreProfile, WorldConfig,
    default_ore_profiles,
};
pub use decoration::{
    Decoration, DecorationCell, DecorationKind, DecorationPart, DecorationPlacer, DecorationRules,
    SPAWN_OUTCOME,
};
pub use generator::{GeneratedWorld, WorldGenerator, generate};
pub use heightmap::{HeightmapParams, HeightmapSampler, row_count, top_row};
pub use material::{Cell, Material, MaterialClassifier, OreId};
pub use noise_field::{DEGENERATE_VALUE, NoiseField, NoiseMask};
pub use ore::OreDistributor;
pub use seed::{SEED_RANGE, Seed};
