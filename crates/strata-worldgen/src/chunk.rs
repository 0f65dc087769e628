//! Fixed-width column chunks holding emitted cells.
//!
//! The [`ChunkIndex`] owns one [`Chunk`] per `chunk_size` columns, created up
//! front for the whole world. Chunk membership depends on a cell's column
//! only, so a column is never split across chunks.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::material::Cell;

/// The cells of one contiguous column range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chunk {
    index: u32,
    columns: Range<i32>,
    cells: Vec<Cell>,
    /// `(x, y)` → position in `cells`.
    lookup: FxHashMap<(i32, i32), usize>,
}

impl Chunk {
    fn new(index: u32, columns: Range<i32>) -> Self {
        Self {
            index,
            columns,
            cells: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    /// Position of this chunk, counted from the left edge of the world.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Columns covered by this chunk.
    pub fn columns(&self) -> Range<i32> {
        self.columns.clone()
    }

    /// Cells in insertion order (column-major, rows ascending).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the chunk.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the chunk holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `(x, y)`, if one was emitted.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.lookup.get(&(x, y)).map(|&i| &self.cells[i])
    }

    /// Insert `cell`, replacing any cell already at the same position.
    fn insert(&mut self, cell: Cell) {
        match self.lookup.get(&(cell.x, cell.y)) {
            Some(&i) => self.cells[i] = cell,
            None => {
                self.lookup.insert((cell.x, cell.y), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.lookup.clear();
    }
}

/// Partitions cells into `ceil(world_size / chunk_size)` column chunks.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkIndex {
    world_size: u32,
    chunk_size: u32,
    chunks: Vec<Chunk>,
}

impl ChunkIndex {
    /// Creates every chunk for a world of `world_size` columns.
    ///
    /// `chunk_size` must be positive; zero is treated as one.
    pub fn new(world_size: u32, chunk_size: u32) -> Self {
        debug_assert!(chunk_size > 0, "chunk_size must be positive");
        let chunk_size = chunk_size.max(1);
        let count = world_size.div_ceil(chunk_size);

        let column = |c: u64| i32::try_from(c).unwrap_or(i32::MAX);
        let chunks = (0..count)
            .map(|index| {
                let start = u64::from(index) * u64::from(chunk_size);
                let end = (start + u64::from(chunk_size)).min(u64::from(world_size));
                Chunk::new(index, column(start)..column(end))
            })
            .collect();

        Self {
            world_size,
            chunk_size,
            chunks,
        }
    }

    /// Chunk index of column `x`: `floor(x / chunk_size)`, or `None` outside the world.
    pub fn chunk_of(&self, x: i32) -> Option<usize> {
        if x < 0 || x as u32 >= self.world_size {
            return None;
        }
        Some((x as u32 / self.chunk_size) as usize)
    }

    /// Append `cell` to the chunk of its column.
    ///
    /// Returns `false` (and drops the cell) if its column lies outside the world.
    pub fn insert(&mut self, cell: Cell) -> bool {
        match self.chunk_of(cell.x) {
            Some(index) => {
                self.chunks[index].insert(cell);
                true
            }
            None => {
                tracing::warn!("cell outside world dropped: ({}, {})", cell.x, cell.y);
                false
            }
        }
    }

    /// The chunk at `index`.
    pub fn chunk(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// The chunk owning column `x`.
    pub fn chunk_for_column(&self, x: i32) -> Option<&Chunk> {
        self.chunk_of(x).map(|index| &self.chunks[index])
    }

    /// The cell at `(x, y)`, if one was emitted.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.chunk_for_column(x)?.cell_at(x, y)
    }

    /// Iterates over chunks left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Iterates over every cell, chunk by chunk.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.chunks.iter().flat_map(|chunk| chunk.cells.iter())
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if the index has no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total number of cells across all chunks.
    pub fn cell_count(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    /// Columns per chunk.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Number of columns in the world.
    pub fn world_size(&self) -> u32 {
        self.world_size
    }

    /// Drops every cell while keeping the chunk containers.
    pub fn clear(&mut self) {
        self.chunks.iter_mut().for_each(Chunk::clear);
    }

    /// Consumes the index, yielding its chunks in order.
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}
