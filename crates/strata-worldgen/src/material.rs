//! Cell materials and the layer classifier.

use serde::{Deserialize, Serialize};

/// Index of an ore profile in configuration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OreId(pub u16);

/// Material of an emitted cell.
///
/// Cave voids are not a material: a void cell is simply never emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Topmost row of a column (grass).
    Surface,
    /// The dirt band below the surface.
    Subsurface,
    /// Everything deeper (stone).
    Fill,
    /// Fill replaced by the ore profile with this id.
    Ore(OreId),
}

impl Material {
    /// Returns `true` for [`Material::Ore`].
    pub fn is_ore(self) -> bool {
        matches!(self, Material::Ore(_))
    }
}

/// A terrain cell at column `x`, row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row, counted upwards from the bottom of the world.
    pub y: i32,
    /// Material.
    pub material: Material,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(x: i32, y: i32, material: Material) -> Self {
        Self { x, y, material }
    }
}

/// Assigns the base layer of a row before ore and cave overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialClassifier {
    dirt_layer_height: u32,
}

impl MaterialClassifier {
    /// Create a classifier with the given dirt band depth.
    pub fn new(dirt_layer_height: u32) -> Self {
        Self { dirt_layer_height }
    }

    /// Base layer of row `y` in a column of height `height`.
    ///
    /// Boundaries are tested top-down and a row lying exactly on one belongs
    /// to the upper layer. Changing either comparison changes the visible
    /// grass and dirt thickness.
    pub fn classify(&self, y: i32, height: f64) -> Material {
        let row = f64::from(y);
        if row >= height - 1.0 {
            Material::Surface
        } else if row >= height - f64::from(self.dirt_layer_height) {
            Material::Subsurface
        } else {
            Material::Fill
        }
    }
}
