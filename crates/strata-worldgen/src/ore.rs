//! Ore vein distribution for the fill layer.
//!
//! Each ore profile gets its own noise field, thresholded into a vein mask
//! over the whole world rectangle before classification starts.

use crate::config::OreProfile;
use crate::material::OreId;
use crate::noise_field::{NoiseField, NoiseMask};
use crate::seed::{Seed, salt};

/// Pre-computed veins of one ore profile.
struct OreVeins {
    id: OreId,
    min_depth: i32,
    mask: NoiseMask,
}

/// Replaces fill cells with ore where a profile's vein and depth checks pass.
pub struct OreDistributor {
    /// In configuration order; the first match wins.
    ores: Vec<OreVeins>,
}

impl OreDistributor {
    /// Build vein masks for every profile over `[0, width) × [0, height)`.
    ///
    /// Profile `i` samples frequency `size` with seed salt `ORE_BASE + i` and
    /// is a vein wherever the noise exceeds `rarity`.
    pub fn new(seed: Seed, profiles: &[OreProfile], width: u32, height: u32) -> Self {
        let ores = profiles
            .iter()
            .enumerate()
            .map(|(i, profile)| {
                let field = NoiseField::new(seed, salt::ORE_BASE + i as u64, profile.size);
                OreVeins {
                    id: OreId(i as u16),
                    min_depth: profile.min_depth,
                    mask: NoiseMask::from_field(&field, profile.rarity, width, height),
                }
            })
            .collect();

        Self { ores }
    }

    /// Build a distributor from explicit `(min_depth, vein mask)` pairs.
    ///
    /// Ids are assigned in order, as for configured profiles.
    #[cfg(test)]
    pub(crate) fn from_masks(masks: Vec<(i32, NoiseMask)>) -> Self {
        let ores = masks
            .into_iter()
            .enumerate()
            .map(|(i, (min_depth, mask))| OreVeins {
                id: OreId(i as u16),
                min_depth,
                mask,
            })
            .collect();

        Self { ores }
    }

    /// A distributor that never places ore.
    pub fn empty() -> Self {
        Self { ores: Vec::new() }
    }

    /// Which ore (if any) replaces the fill cell at `(x, y)`.
    ///
    /// A profile qualifies when its vein mask is set at `(x, y)` and
    /// `column_height - y > min_depth`.
    pub fn sample_ore(&self, x: i32, y: i32, column_height: f64) -> Option<OreId> {
        let depth = column_height - f64::from(y);

        self.ores
            .iter()
            .find(|ore| depth > f64::from(ore.min_depth) && ore.mask.get(x, y))
            .map(|ore| ore.id)
    }

    /// Vein mask of the ore with `id`.
    pub fn vein_mask(&self, id: OreId) -> Option<&NoiseMask> {
        self.ores.get(usize::from(id.0)).map(|ore| &ore.mask)
    }

    /// Count the number of registered ore types.
    pub fn ore_count(&self) -> usize {
        self.ores.len()
    }
}
