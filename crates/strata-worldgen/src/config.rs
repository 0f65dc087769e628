//! World configuration and its one-shot validation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::material::{Material, OreId};

/// Largest accepted `world_size` and `chunk_size`; columns are addressed as `i32`.
pub const MAX_WORLD_COLUMNS: u32 = i32::MAX as u32;

/// Largest column height, in rows, that a configuration may reach.
pub const MAX_WORLD_HEIGHT: u32 = 4096;

/// Errors reported when a [`WorldConfig`] is rejected.
///
/// Validation runs once, before generation starts; a rejected config never
/// produces a partial world.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An integer field that must be strictly positive was zero.
    #[error("{field} must be greater than zero")]
    NonPositive {
        /// Offending field.
        field: &'static str,
    },

    /// A column count exceeds [`MAX_WORLD_COLUMNS`].
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        /// Offending field.
        field: &'static str,
        /// Configured value.
        value: u32,
        /// Upper bound.
        max: u32,
    },

    /// `height_addition + max(height_multiplier, 0)` exceeds [`MAX_WORLD_HEIGHT`].
    #[error("terrain can reach {height} rows, above the limit of {max}")]
    HeightOutOfRange {
        /// Highest reachable column height.
        height: f64,
        /// Upper bound.
        max: u32,
    },

    /// `min_tree_height` exceeds `max_tree_height`.
    #[error("min_tree_height ({min}) is greater than max_tree_height ({max})")]
    TreeHeightRange {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },

    /// A float field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Offending field.
        field: &'static str,
    },

    /// `surface_threshold` lies outside `[0, 1]`.
    #[error("surface_threshold must lie in [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Configured threshold.
        value: f64,
    },

    /// An ore profile carries a negative or non-finite value.
    #[error("ore '{label}': {field} must be a non-negative finite number, got {value}")]
    InvalidOre {
        /// Label of the offending profile.
        label: String,
        /// Offending field.
        field: &'static str,
        /// Configured value.
        value: f64,
    },

    /// Two ore profiles share a label.
    #[error("duplicate ore label: {0}")]
    DuplicateOreLabel(String),

    /// More ore profiles than an [`OreId`] can address.
    #[error("too many ore profiles: {0}")]
    TooManyOres(usize),
}

/// One ore type's vein noise and depth constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OreProfile {
    /// Tile name of the ore (e.g. "coal").
    pub label: String,
    /// Vein threshold: a cell is in a vein where the noise exceeds it.
    /// Higher is rarer.
    pub rarity: f64,
    /// Vein noise frequency. Smaller values give larger veins.
    pub size: f64,
    /// The ore only appears where `height - y > min_depth`.
    pub min_depth: i32,
}

impl Default for OreProfile {
    fn default() -> Self {
        Self {
            label: "ore".to_string(),
            rarity: 0.8,
            size: 0.1,
            min_depth: 0,
        }
    }
}

impl OreProfile {
    /// Creates a new profile.
    pub fn new(label: impl Into<String>, rarity: f64, size: f64, min_depth: i32) -> Self {
        Self {
            label: label.into(),
            rarity,
            size,
            min_depth,
        }
    }
}

/// Returns the default ore list: coal, iron, gold, diamond, from common and
/// shallow to rare and deep.
pub fn default_ore_profiles() -> Vec<OreProfile> {
    vec![
        OreProfile::new("coal", 0.68, 0.18, 2),
        OreProfile::new("iron", 0.72, 0.16, 6),
        OreProfile::new("gold", 0.78, 0.14, 12),
        OreProfile::new("diamond", 0.82, 0.12, 18),
    ]
}

/// Immutable input of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of columns.
    pub world_size: u32,
    /// Columns per chunk.
    pub chunk_size: u32,
    /// Frequency of the terrain height noise.
    pub terrain_frequency: f64,
    /// Frequency of the cave noise.
    pub cave_frequency: f64,
    /// Cells are solid where the cave noise exceeds this value.
    pub surface_threshold: f64,
    /// Scale of the terrain noise in rows.
    pub height_multiplier: f64,
    /// Base terrain height in rows.
    pub height_addition: f64,
    /// Depth of the dirt band below the surface row.
    pub dirt_layer_height: u32,
    /// Disable to keep every classified cell solid.
    pub generate_caves: bool,
    /// A tree is attempted with probability `1 / tree_spawn_chance` per column. 0 disables trees.
    pub tree_spawn_chance: u32,
    /// Shortest tree trunk.
    pub min_tree_height: u32,
    /// Tallest tree trunk (inclusive).
    pub max_tree_height: u32,
    /// Ground cover probability `1 / tall_grass_chance`. 0 disables it.
    pub tall_grass_chance: u32,
    /// Ore profiles in priority order.
    pub ores: Vec<OreProfile>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: 100,
            chunk_size: 16,
            terrain_frequency: 0.05,
            cave_frequency: 0.05,
            surface_threshold: 0.25,
            height_multiplier: 4.0,
            height_addition: 25.0,
            dirt_layer_height: 5,
            generate_caves: true,
            tree_spawn_chance: 10,
            min_tree_height: 4,
            max_tree_height: 6,
            tall_grass_chance: 10,
            ores: default_ore_profiles(),
        }
    }
}

impl WorldConfig {
    /// Check every field, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "world_size",
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "chunk_size",
            });
        }
        for (field, value) in [("world_size", self.world_size), ("chunk_size", self.chunk_size)] {
            if value > MAX_WORLD_COLUMNS {
                return Err(ConfigError::TooLarge {
                    field,
                    value,
                    max: MAX_WORLD_COLUMNS,
                });
            }
        }
        if self.min_tree_height > self.max_tree_height {
            return Err(ConfigError::TreeHeightRange {
                min: self.min_tree_height,
                max: self.max_tree_height,
            });
        }

        let floats = [
            ("terrain_frequency", self.terrain_frequency),
            ("cave_frequency", self.cave_frequency),
            ("surface_threshold", self.surface_threshold),
            ("height_multiplier", self.height_multiplier),
            ("height_addition", self.height_addition),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        // Terrain noise lies in [0, 1], so this bounds every column.
        let max_height = self.height_addition + self.height_multiplier.max(0.0);
        if max_height > f64::from(MAX_WORLD_HEIGHT) {
            return Err(ConfigError::HeightOutOfRange {
                height: max_height,
                max: MAX_WORLD_HEIGHT,
            });
        }
        if !(0.0..=1.0).contains(&self.surface_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.surface_threshold,
            });
        }

        if self.ores.len() > usize::from(u16::MAX) {
            return Err(ConfigError::TooManyOres(self.ores.len()));
        }
        let mut labels = FxHashSet::default();
        for ore in &self.ores {
            let checks = [
                ("rarity", ore.rarity),
                ("size", ore.size),
                ("min_depth", f64::from(ore.min_depth)),
            ];
            for (field, value) in checks {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidOre {
                        label: ore.label.clone(),
                        field,
                        value,
                    });
                }
            }
            if !labels.insert(ore.label.as_str()) {
                return Err(ConfigError::DuplicateOreLabel(ore.label.clone()));
            }
        }

        Ok(())
    }

    /// Number of chunks covering the world: `ceil(world_size / chunk_size)`.
    pub fn chunk_count(&self) -> u32 {
        self.world_size.div_ceil(self.chunk_size.max(1))
    }

    /// Returns the profile behind `id`, if any.
    pub fn ore(&self, id: OreId) -> Option<&OreProfile> {
        self.ores.get(usize::from(id.0))
    }

    /// Tile name of a material, as an atlas collaborator would look it up.
    pub fn tile_name(&self, material: Material) -> &str {
        match material {
            Material::Surface => "grass",
            Material::Subsurface => "dirt",
            Material::Fill => "stone",
            Material::Ore(id) => self.ore(id).map_or("stone", |ore| ore.label.as_str()),
        }
    }
}
