//! Seeded 2D Perlin noise fields and the boolean masks pre-computed from them.
//!
//! Every noise-driven decision in the generator (terrain height, caves, ore
//! veins) reads a [`NoiseField`]. Caves and veins are thresholded once per run
//! into a [`NoiseMask`] covering the world rectangle before any cell is
//! classified.

use noise::{NoiseFn, Perlin};

use crate::seed::Seed;

/// Value returned everywhere by a field whose frequency is not positive.
pub const DEGENERATE_VALUE: f64 = 0.5;

/// A deterministic 2D coherent-noise sampler with values in `[0, 1]`.
///
/// Samples Perlin noise at `((x + offset_x) * frequency, (y + offset_y) * frequency)`.
/// A frequency `<= 0` (or NaN/infinite) collapses the field to the constant
/// [`DEGENERATE_VALUE`]; this is a configuration choice, never an error.
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
    frequency: f64,
    offset: (f64, f64),
}

impl NoiseField {
    /// Create a field for the stream `salt` of `seed`.
    ///
    /// Both coordinate offsets default to the seed's coordinate offset.
    pub fn new(seed: Seed, salt: u64, frequency: f64) -> Self {
        let offset = seed.coordinate_offset();
        Self {
            perlin: Perlin::new(seed.noise_seed(salt)),
            frequency,
            offset: (offset, offset),
        }
    }

    /// Replace the coordinate offset.
    #[cfg(test)]
    pub(crate) fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset = (offset_x, offset_y);
        self
    }

    /// Returns `true` if this field degenerates to a constant.
    pub fn is_constant(&self) -> bool {
        !(self.frequency.is_finite() && self.frequency > 0.0)
    }

    /// Sample the field at `(x, y)`, returning a value in `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        if self.is_constant() {
            return DEGENERATE_VALUE;
        }

        let nx = (x + self.offset.0) * self.frequency;
        let ny = (y + self.offset.1) * self.frequency;
        let raw = self.perlin.get([nx, ny]);

        // Perlin output is roughly [-1, 1]; remap and clamp the overshoot.
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// A row-major boolean grid over `[0, width) × [0, height)`.
///
/// Reads outside the grid return `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl NoiseMask {
    /// Threshold `field` over the grid: a bit is set iff `sample > threshold`.
    pub fn from_field(field: &NoiseField, threshold: f64, width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |x, y| {
            field.sample(f64::from(x), f64::from(y)) > threshold
        })
    }

    /// Build a mask from an arbitrary predicate, evaluated row by row.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// A mask with every bit set to `value`.
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            bits: vec![value; width as usize * height as usize],
        }
    }

    /// Returns the bit at `(x, y)`, or `false` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of set bits.
    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}
