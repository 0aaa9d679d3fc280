//! Tile layers

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{Cell, MapError, Path, TileSize};

/// One rectangular grid of cells within a [`Map2D`](crate::Map2D).
///
/// The cell vector always holds exactly `width * height` cells, stored
/// row-major with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayer")]
pub struct Layer {
    pub name: String,
    /// Size of one tile in pixels. `None` defers to the map default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<TileSize>,
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<Path>,
}

impl Layer {
    /// Create a layer filled with [`Cell::EMPTY`]
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            tile_size: None,
            width,
            height,
            cells: vec![Cell::EMPTY; grid_len(width, height)],
            paths: Vec::new(),
        }
    }

    /// Create a layer from existing row-major cells
    pub fn from_cells(
        name: impl Into<String>,
        width: u32,
        height: u32,
        cells: Vec<Cell>,
    ) -> Result<Self, MapError> {
        let expected = grid_len(width, height);
        if cells.len() != expected {
            return Err(MapError::GridSize {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            tile_size: None,
            width,
            height,
            cells,
            paths: Vec::new(),
        })
    }

    /// Declare this layer's own tile size
    pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    pub fn with_paths(mut self, paths: Vec<Path>) -> Self {
        self.paths = paths;
        self
    }

    /// Width in tiles
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in tiles
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable cell access. The slice length is fixed, so the grid cannot
    /// be resized through it.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Row-major index of `(x, y)`, or `None` when outside the grid
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, x: u32, y: u32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Replace the cell at `(x, y)`
    pub fn set_cell(&mut self, x: u32, y: u32, cell: impl Into<Cell>) -> Result<(), MapError> {
        let index = self.index(x, y).ok_or(MapError::CellOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.cells[index] = cell.into();
        Ok(())
    }

    /// Set every cell to `cell`
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Change the grid size. Cells inside both the old and new grid keep their
    /// position; new cells are set to `fill`.
    pub fn resize(&mut self, width: u32, height: u32, fill: Cell) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        let mut cells = vec![fill; grid_len(width, height)];
        let copy_w = self.width.min(width) as usize;
        for y in 0..self.height.min(height) as usize {
            let src = y * self.width as usize;
            let dst = y * width as usize;
            cells[dst..dst + copy_w].copy_from_slice(&self.cells[src..src + copy_w]);
        }
        self.cells = cells;
        self.width = width;
        self.height = height;
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on 0, and a zero-width grid has no cells anyway
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Iterate all cells as `(x, y, cell)`
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i as u32) % width, (i as u32) / width, cell))
    }

    /// Distinct tile codes present in this layer
    pub fn used_codes(&self) -> BTreeSet<u32> {
        self.cells.iter().map(|c| c.code).collect()
    }

    pub fn path(&self, index: usize) -> Result<&Path, MapError> {
        self.paths.get(index).ok_or(MapError::PathIndex {
            index,
            count: self.paths.len(),
        })
    }
}

fn grid_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[derive(Deserialize)]
struct RawLayer {
    name: String,
    #[serde(default)]
    tile_size: Option<TileSize>,
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    #[serde(default)]
    paths: Vec<Path>,
}

impl TryFrom<RawLayer> for Layer {
    type Error = MapError;

    fn try_from(raw: RawLayer) -> Result<Self, Self::Error> {
        let mut layer = Layer::from_cells(raw.name, raw.width, raw.height, raw.cells)?;
        layer.tile_size = raw.tile_size;
        layer.paths = raw.paths;
        Ok(layer)
    }
}
