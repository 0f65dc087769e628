//! Cave carving via a thresholded 2D noise mask.
//!
//! The mask decides presence only. Cells are classified first and the mask
//! then hollows out any layer, surface and ore included.

use crate::noise_field::{NoiseField, NoiseMask};
use crate::seed::{Seed, salt};

/// Configuration for cave generation.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveConfig {
    /// Disable to keep every cell solid.
    pub enabled: bool,
    /// Frequency of the cave noise.
    pub frequency: f64,
    /// Cells are solid where the noise exceeds this value.
    pub surface_threshold: f64,
}

/// Solid/void decision for every cell of the world rectangle.
pub struct CaveMask {
    /// `None` when caves are disabled.
    solid: Option<NoiseMask>,
}

impl CaveMask {
    /// Pre-compute the mask over `[0, width) × [0, height)`.
    pub fn new(seed: Seed, config: &CaveConfig, width: u32, height: u32) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        let field = NoiseField::new(seed, salt::CAVE, config.frequency);
        Self {
            solid: Some(NoiseMask::from_field(
                &field,
                config.surface_threshold,
                width,
                height,
            )),
        }
    }

    /// A mask that keeps every cell.
    pub fn disabled() -> Self {
        Self { solid: None }
    }

    /// Wrap an explicit solidity mask (set bit = solid).
    #[cfg(test)]
    pub(crate) fn from_mask(solid: NoiseMask) -> Self {
        Self { solid: Some(solid) }
    }

    /// Returns `true` if the cell at `(x, y)` is emitted.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.solid.as_ref().is_none_or(|mask| mask.get(x, y))
    }

    /// Returns `true` if caves are carved at all.
    pub fn is_enabled(&self) -> bool {
        self.solid.is_some()
    }

    /// The underlying solidity mask, if caves are enabled.
    pub fn mask(&self) -> Option<&NoiseMask> {
        self.solid.as_ref()
    }
}
