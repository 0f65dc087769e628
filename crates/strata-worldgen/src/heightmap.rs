//! Per-column terrain height.
//!
//! The terrain field is read along a single horizontal slice: the noise
//! y-coordinate is pinned to the seed, so height varies with x only.

use crate::noise_field::NoiseField;
use crate::seed::{Seed, salt};

/// Parameters mapping terrain noise to a column height in rows.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    /// Frequency of the terrain noise.
    pub frequency: f64,
    /// Scale applied to the `[0, 1]` noise value.
    pub multiplier: f64,
    /// Base height added after scaling.
    pub base: f64,
}

/// Samples real-valued column heights from a seeded noise field.
pub struct HeightmapSampler {
    field: NoiseField,
    params: HeightmapParams,
}

impl HeightmapSampler {
    /// Create a sampler for `seed`.
    pub fn new(seed: Seed, params: HeightmapParams) -> Self {
        let field = NoiseField::new(seed, salt::TERRAIN, params.frequency);
        Self { field, params }
    }

    /// Height of column `x`: `noise((x + seed) * f, seed * f) * multiplier + base`.
    ///
    /// A row `y` is part of the column iff `y < height`.
    pub fn height(&self, x: i32) -> f64 {
        self.field.sample(f64::from(x), 0.0) * self.params.multiplier + self.params.base
    }

    /// Heights of columns `0..width`, in order.
    pub fn column_heights(&self, width: u32) -> Vec<f64> {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        (0..width).map(|x| self.height(x)).collect()
    }
}

/// Number of rows in a column of height `h`: the count of integers in `[0, h)`.
pub fn row_count(height: f64) -> u32 {
    if height.is_nan() || height <= 0.0 {
        0
    } else {
        height.ceil() as u32
    }
}

/// Topmost row of a column of height `h`.
///
/// `None` for an empty column, or one with more rows than `i32` can address.
pub fn top_row(height: f64) -> Option<i32> {
    match row_count(height) {
        0 => None,
        rows => i32::try_from(rows).ok().map(|rows| rows - 1),
    }
}
