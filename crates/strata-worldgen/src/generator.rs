//! The world generation pass.
//!
//! [`WorldGenerator`] validates a [`WorldConfig`] once and then turns seeds
//! into [`GeneratedWorld`] values. It keeps no state between runs: every
//! call starts from empty chunks.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use tracing::{debug, info};

use crate::cave::{CaveConfig, CaveMask};
use crate::chunk::{Chunk, ChunkIndex};
use crate::config::{ConfigError, WorldConfig};
use crate::decoration::{Decoration, DecorationCell, DecorationPlacer, DecorationRules};
use crate::heightmap::{self, HeightmapParams, HeightmapSampler};
use crate::material::{Cell, Material, MaterialClassifier};
use crate::ore::OreDistributor;
use crate::seed::Seed;

/// Result of one generation run, owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedWorld {
    seed: Seed,
    heights: Vec<f64>,
    chunks: ChunkIndex,
    decorations: Vec<Decoration>,
}

impl GeneratedWorld {
    /// The seed this world was generated from.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Column heights, indexed by x.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Height of column `x`.
    pub fn height_at(&self, x: i32) -> Option<f64> {
        usize::try_from(x).ok().and_then(|x| self.heights.get(x)).copied()
    }

    /// Topmost row of column `x` (the surface row, whether or not it was carved).
    pub fn top_row(&self, x: i32) -> Option<i32> {
        self.height_at(x).and_then(heightmap::top_row)
    }

    /// The chunk index holding every emitted cell.
    pub fn chunks(&self) -> &ChunkIndex {
        &self.chunks
    }

    /// Decorations in placement order (left to right).
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// The cell at `(x, y)`, if one was emitted.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.chunks.cell_at(x, y)
    }

    /// Every emitted cell, chunk by chunk.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.chunks.cells()
    }

    /// Number of emitted cells.
    pub fn cell_count(&self) -> usize {
        self.chunks.cell_count()
    }

    /// Footprint cells of every decoration, flattened.
    pub fn decoration_cells(&self) -> impl Iterator<Item = DecorationCell> + '_ {
        self.decorations.iter().flat_map(Decoration::footprint)
    }

    /// Digest of heights, cells and decorations for determinism checks.
    ///
    /// Stable across runs for a given crate version and target.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        for height in &self.heights {
            height.to_bits().hash(&mut hasher);
        }
        for chunk in self.chunks.iter() {
            chunk.index().hash(&mut hasher);
            chunk.cells().hash(&mut hasher);
        }
        self.decorations.hash(&mut hasher);
        hasher.finish()
    }

    /// Splits the world into its ordered chunks and decorations.
    pub fn into_parts(self) -> (Vec<Chunk>, Vec<Decoration>) {
        (self.chunks.into_chunks(), self.decorations)
    }
}

/// Generates worlds from a validated configuration.
#[derive(Clone, Debug)]
pub struct WorldGenerator {
    config: WorldConfig,
}

impl WorldGenerator {
    /// Validate `config` and build a generator for it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found; no generation is attempted.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the generator's configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Run one full generation pass for `seed`.
    pub fn generate(&self, seed: Seed) -> GeneratedWorld {
        let config = &self.config;

        let heights = HeightmapSampler::new(
            seed,
            HeightmapParams {
                frequency: config.terrain_frequency,
                multiplier: config.height_multiplier,
                base: config.height_addition,
            },
        )
        .column_heights(config.world_size);

        let rows = heights
            .iter()
            .map(|&h| heightmap::row_count(h))
            .max()
            .unwrap_or(0);
        debug!(
            "heightmap sampled: {} columns, tallest column {} rows",
            heights.len(),
            rows
        );

        let caves = CaveMask::new(
            seed,
            &CaveConfig {
                enabled: config.generate_caves,
                frequency: config.cave_frequency,
                surface_threshold: config.surface_threshold,
            },
            config.world_size,
            rows,
        );
        let ores = OreDistributor::new(seed, &config.ores, config.world_size, rows);
        debug!(
            "masks built: caves={} ores={}",
            caves.is_enabled(),
            ores.ore_count()
        );

        self.generate_with(seed, heights, &caves, &ores)
    }

    /// The column pass over pre-computed heights and masks.
    pub(crate) fn generate_with(
        &self,
        seed: Seed,
        heights: Vec<f64>,
        caves: &CaveMask,
        ores: &OreDistributor,
    ) -> GeneratedWorld {
        let config = &self.config;
        let classifier = MaterialClassifier::new(config.dirt_layer_height);
        let mut placer = DecorationPlacer::new(
            seed,
            DecorationRules {
                tree_spawn_chance: config.tree_spawn_chance,
                min_tree_height: config.min_tree_height,
                max_tree_height: config.max_tree_height,
                tall_grass_chance: config.tall_grass_chance,
            },
        );
        let mut chunks = ChunkIndex::new(config.world_size, config.chunk_size);
        let mut decorations = Vec::new();

        for (x, &height) in heights.iter().enumerate() {
            let x = x as i32;
            let Some(top) = heightmap::top_row(height) else {
                continue;
            };

            for y in 0..=top {
                let material = match classifier.classify(y, height) {
                    Material::Fill => ores
                        .sample_ore(x, y, height)
                        .map_or(Material::Fill, Material::Ore),
                    layer => layer,
                };

                if caves.is_solid(x, y) {
                    chunks.insert(Cell::new(x, y, material));
                }
            }

            let surface_solid = chunks.cell_at(x, top).is_some();
            if let Some(decoration) = placer.place(x, top, surface_solid) {
                decorations.push(decoration);
            }
        }

        info!(
            "generated world: seed={} cells={} chunks={} decorations={}",
            seed,
            chunks.cell_count(),
            chunks.len(),
            decorations.len()
        );

        GeneratedWorld {
            seed,
            heights,
            chunks,
            decorations,
        }
    }
}

/// Validate `config` and generate one world for `seed`.
///
/// # Errors
///
/// Returns a [`ConfigError`] naming the first invalid field.
pub fn generate(seed: Seed, config: &WorldConfig) -> Result<GeneratedWorld, ConfigError> {
    Ok(WorldGenerator::new(config.clone())?.generate(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::DecorationKind;
    use crate::material::OreId;
    use crate::noise_field::NoiseMask;

    fn flat_config(world_size: u32) -> WorldConfig {
        WorldConfig {
            world_size,
            chunk_size: 16,
            terrain_frequency: 0.0,
            height_multiplier: 4.0,
            height_addition: 8.0,
            dirt_layer_height: 5,
            generate_caves: false,
            tree_spawn_chance: 0,
            tall_grass_chance: 0,
            ores: Vec::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_same_seed_twice_identical() {
        let config = WorldConfig::default();
        let a = generate(Seed(12345), &config).unwrap();
        let b = generate(Seed(12345), &config).unwrap();
        assert_eq!(a, b, "Same inputs must produce identical worlds");
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_different_seeds_different_worlds() {
        let config = WorldConfig::default();
        let a = generate(Seed(0), &config).unwrap();
        let b = generate(Seed(9999), &config).unwrap();
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_regeneration_has_no_residual_state() {
        let generator = WorldGenerator::new(WorldConfig::default()).unwrap();
        let _first = generator.generate(Seed(1));
        let second = generator.generate(Seed(2));
        let fresh = WorldGenerator::new(WorldConfig::default())
            .unwrap()
            .generate(Seed(2));
        assert_eq!(second, fresh);
    }

    #[test]
    fn test_single_column_scenario() {
        let world = generate(Seed(42), &flat_config(1)).unwrap();

        assert_eq!(world.height_at(0), Some(10.0));
        assert_eq!(world.chunks().len(), 1);
        let chunk = world.chunks().chunk(0).unwrap();
        assert_eq!(chunk.len(), 10);

        for y in 0..10 {
            let expected = match y {
                0..=4 => Material::Fill,
                5..=8 => Material::Subsurface,
                _ => Material::Surface,
            };
            assert_eq!(
                chunk.cell_at(0, y).map(|c| c.material),
                Some(expected),
                "row {y}"
            );
        }
    }

    #[test]
    fn test_rows_bounded_by_height() {
        let world = generate(Seed(7), &WorldConfig::default()).unwrap();
        for cell in world.cells() {
            let height = world.height_at(cell.x).unwrap();
            assert!(
                f64::from(cell.y) < height,
                "cell ({}, {}) at or above height {height}",
                cell.x,
                cell.y
            );
            assert!(cell.y >= 0);
        }
    }

    #[test]
    fn test_without_caves_every_candidate_row_emitted() {
        let config = WorldConfig {
            generate_caves: false,
            ..Default::default()
        };
        let world = generate(Seed(7), &config).unwrap();
        for x in 0..config.world_size as i32 {
            let height = world.height_at(x).unwrap();
            let emitted = world
                .chunks()
                .chunk_for_column(x)
                .unwrap()
                .cells()
                .iter()
                .filter(|c| c.x == x)
                .count();
            assert_eq!(emitted as u32, heightmap::row_count(height), "column {x}");
        }
    }

    #[test]
    fn test_chunk_containment() {
        let config = WorldConfig {
            world_size: 130,
            chunk_size: 16,
            ..Default::default()
        };
        let world = generate(Seed(3), &config).unwrap();
        assert_eq!(world.chunks().len(), 9);
        for chunk in world.chunks().iter() {
            for cell in chunk.cells() {
                assert_eq!(cell.x as u32 / 16, chunk.index());
            }
        }
    }

    #[test]
    fn test_cave_gating_hides_ore() {
        let generator = WorldGenerator::new(flat_config(2)).unwrap();
        let ores = OreDistributor::from_masks(vec![(0, NoiseMask::filled(2, 10, true))]);
        let caves = CaveMask::from_mask(NoiseMask::from_fn(2, 10, |x, y| !(x == 1 && y == 2)));

        let world = generator.generate_with(Seed(0), vec![10.0, 10.0], &caves, &ores);

        assert_eq!(
            world.cell_at(0, 2).map(|c| c.material),
            Some(Material::Ore(OreId(0)))
        );
        assert_eq!(world.cell_at(1, 2), None, "carved ore cell must be absent");
        assert_eq!(
            world.cell_at(1, 3).map(|c| c.material),
            Some(Material::Ore(OreId(0)))
        );
    }

    #[test]
    fn test_ore_precedence_in_generation() {
        let generator = WorldGenerator::new(flat_config(1)).unwrap();
        let ores = OreDistributor::from_masks(vec![
            (0, NoiseMask::filled(1, 10, true)),
            (0, NoiseMask::filled(1, 10, true)),
        ]);
        let world = generator.generate_with(Seed(0), vec![10.0], &CaveMask::disabled(), &ores);
        for y in 0..5 {
            assert_eq!(
                world.cell_at(0, y).map(|c| c.material),
                Some(Material::Ore(OreId(0)))
            );
        }
        // Dirt and grass are never replaced by ore.
        assert_eq!(world.cell_at(0, 9).map(|c| c.material), Some(Material::Surface));
    }

    #[test]
    fn test_decorations_anchor_on_emitted_surface() {
        let config = WorldConfig {
            world_size: 400,
            tree_spawn_chance: 2,
            tall_grass_chance: 2,
            surface_threshold: 0.5,
            ..Default::default()
        };
        for seed in [1, 2, 3, 4] {
            let world = generate(Seed(seed), &config).unwrap();
            assert!(!world.decorations().is_empty());
            for decoration in world.decorations() {
                let below = world.cell_at(decoration.x, decoration.y - 1);
                assert_eq!(
                    below.map(|c| c.material),
                    Some(Material::Surface),
                    "decoration at ({}, {}) not on a surface cell",
                    decoration.x,
                    decoration.y
                );
                assert_eq!(world.top_row(decoration.x), Some(decoration.y - 1));
            }
        }
    }

    #[test]
    fn test_no_decoration_on_carved_column() {
        let config = WorldConfig {
            tree_spawn_chance: 2,
            tall_grass_chance: 2,
            ..flat_config(50)
        };
        let generator = WorldGenerator::new(config).unwrap();
        let caves = CaveMask::from_mask(NoiseMask::from_fn(50, 10, |x, y| x % 2 == 0 || y != 9));
        let world = generator.generate_with(
            Seed(8),
            vec![10.0; 50],
            &caves,
            &OreDistributor::empty(),
        );
        assert!(!world.decorations().is_empty());
        for decoration in world.decorations() {
            assert_eq!(decoration.x % 2, 0, "odd columns have a carved surface");
        }
    }

    #[test]
    fn test_tree_heights_within_config() {
        let config = WorldConfig {
            world_size: 300,
            generate_caves: false,
            tree_spawn_chance: 2,
            min_tree_height: 3,
            max_tree_height: 5,
            ..Default::default()
        };
        let world = generate(Seed(21), &config).unwrap();
        let trees: Vec<u32> = world
            .decorations()
            .iter()
            .filter_map(|d| match d.kind {
                DecorationKind::Tree { height } => Some(height),
                DecorationKind::GroundCover => None,
            })
            .collect();
        assert!(!trees.is_empty());
        assert!(trees.iter().all(|h| (3..=5).contains(h)));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = WorldConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert_eq!(
            generate(Seed(0), &config),
            Err(ConfigError::NonPositive {
                field: "chunk_size"
            })
        );
    }

    #[test]
    fn test_out_of_range_sizes_fail_before_generation() {
        let wide = WorldConfig {
            world_size: 3_000_000_000,
            chunk_size: 2_147_483_648,
            ..Default::default()
        };
        assert!(matches!(
            generate(Seed(0), &wide),
            Err(ConfigError::TooLarge {
                field: "world_size",
                ..
            })
        ));

        let tall = WorldConfig {
            height_addition: 3.0e9,
            generate_caves: false,
            ores: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            WorldGenerator::new(tall),
            Err(ConfigError::HeightOutOfRange { .. })
        ));
    }

    #[test]
    fn test_tallest_allowed_column_fully_emitted() {
        let config = WorldConfig {
            height_multiplier: 0.0,
            height_addition: f64::from(crate::config::MAX_WORLD_HEIGHT),
            ..flat_config(1)
        };
        let world = generate(Seed(0), &config).unwrap();
        assert_eq!(world.cell_count(), crate::config::MAX_WORLD_HEIGHT as usize);
        assert_eq!(
            world.top_row(0),
            Some(crate::config::MAX_WORLD_HEIGHT as i32 - 1)
        );
    }

    #[test]
    fn test_into_parts_keeps_chunk_order() {
        let world = generate(Seed(5), &WorldConfig::default()).unwrap();
        let decoration_count = world.decorations().len();
        let (chunks, decorations) = world.into_parts();
        let indices: Vec<u32> = chunks.iter().map(Chunk::index).collect();
        assert_eq!(indices, (0..7).collect::<Vec<_>>());
        assert_eq!(decorations.len(), decoration_count);
    }

    #[test]
    fn test_empty_columns_for_non_positive_height() {
        let config = WorldConfig {
            height_multiplier: 0.0,
            height_addition: -3.0,
            ..flat_config(4)
        };
        let world = generate(Seed(0), &config).unwrap();
        assert_eq!(world.cell_count(), 0);
        assert!(world.decorations().is_empty());
        assert_eq!(world.top_row(0), None);
    }
}
