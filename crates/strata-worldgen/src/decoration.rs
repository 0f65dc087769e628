//! Decoration placement: trees and ground cover on top of surface cells.
//!
//! Draws come from a per-run [`ChaCha8Rng`] derived from the world seed, so
//! the same seed always decorates the same columns.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::seed::Seed;

/// The draw value that triggers a spawn. A "1 in N" chance rolls `[0, N)`.
pub const SPAWN_OUTCOME: u32 = 1;

/// Leaf cells relative to the cell directly above the trunk:
///
/// ```text
///   c
///  bcb
/// abcba
///   d
/// ```
const LEAF_OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (-1, 0),
    (-1, 1),
    (1, 0),
    (1, 1),
    (-2, 0),
    (2, 0),
];

/// Shape of a decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationKind {
    /// A tree with a trunk of `height` log cells.
    Tree {
        /// Trunk height.
        height: u32,
    },
    /// A single tall-grass cell.
    GroundCover,
}

/// Role of one cell in a decoration's footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationPart {
    /// Tree trunk.
    Log,
    /// Tree canopy.
    Leaf,
    /// Tall grass.
    GroundCover,
}

/// One cell occupied by a decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationCell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// What this cell is.
    pub part: DecorationPart,
}

/// A placed decoration, anchored on the cell above a surface cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decoration {
    /// Anchor column.
    pub x: i32,
    /// Anchor row.
    pub y: i32,
    /// Shape.
    pub kind: DecorationKind,
}

impl Decoration {
    /// Every cell this decoration occupies, logs bottom-up then leaves.
    ///
    /// Leaves may extend up to two columns past the world edge.
    pub fn footprint(&self) -> Vec<DecorationCell> {
        match self.kind {
            DecorationKind::GroundCover => vec![DecorationCell {
                x: self.x,
                y: self.y,
                part: DecorationPart::GroundCover,
            }],
            DecorationKind::Tree { height } => {
                let height = height as i32;
                let logs = (0..height).map(|dy| DecorationCell {
                    x: self.x,
                    y: self.y + dy,
                    part: DecorationPart::Log,
                });
                let leaves = LEAF_OFFSETS.iter().map(|&(dx, dy)| DecorationCell {
                    x: self.x + dx,
                    y: self.y + height + dy,
                    part: DecorationPart::Leaf,
                });
                logs.chain(leaves).collect()
            }
        }
    }
}

/// Spawn rules for decorations.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationRules {
    /// Tree chance as "1 in N"; 0 disables trees.
    pub tree_spawn_chance: u32,
    /// Shortest trunk.
    pub min_tree_height: u32,
    /// Tallest trunk (inclusive).
    pub max_tree_height: u32,
    /// Ground cover chance as "1 in N"; 0 disables it.
    pub tall_grass_chance: u32,
}

/// Decides, column by column, whether a tree or ground cover is placed.
pub struct DecorationPlacer {
    rules: DecorationRules,
    rng: ChaCha8Rng,
}

impl DecorationPlacer {
    /// Create a placer whose draws are fixed by `seed`.
    pub fn new(seed: Seed, rules: DecorationRules) -> Self {
        Self {
            rules,
            rng: seed.decoration_rng(),
        }
    }

    /// Run the draws for one column whose topmost row is `top_row`.
    ///
    /// The tree draw happens first. Ground cover is only drawn when no tree
    /// was placed. Either needs `surface_solid`, i.e. a cell was emitted at
    /// `(x, top_row)`; the decoration is anchored at `(x, top_row + 1)`.
    /// Overlap with earlier decorations is not checked.
    pub fn place(&mut self, x: i32, top_row: i32, surface_solid: bool) -> Option<Decoration> {
        let anchor_y = top_row + 1;

        if self.roll(self.rules.tree_spawn_chance) && surface_solid {
            let height = self
                .rng
                .random_range(self.rules.min_tree_height..=self.rules.max_tree_height);
            return Some(Decoration {
                x,
                y: anchor_y,
                kind: DecorationKind::Tree { height },
            });
        }

        if self.roll(self.rules.tall_grass_chance) && surface_solid {
            return Some(Decoration {
                x,
                y: anchor_y,
                kind: DecorationKind::GroundCover,
            });
        }

        None
    }

    /// One "1 in `chance`" draw. A chance of 0 consumes no randomness.
    fn roll(&mut self, chance: u32) -> bool {
        chance > 0 && self.rng.random_range(0..chance) == SPAWN_OUTCOME
    }
}
