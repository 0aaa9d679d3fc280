//! Effective layer dimensions
//!
//! Formats disagree on where tile size is stored: some put it on every layer,
//! some once for the whole map, and many not at all. [`resolve_layer_dims`]
//! hides this by walking a fixed fallback chain:
//!
//! 1. the layer's own `tile_size`
//! 2. the map's default `tile_size`
//! 3. the constant the codec supplied when it built the map
//!
//! The grid size always comes from the layer itself.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Map2D, MapError};

/// Size of one tile in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which level of the fallback chain supplied a tile size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimSource {
    Layer,
    Map,
    Format,
}

/// Resolved dimensions of one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDims {
    /// `(width, height)` in tiles
    pub grid: (u32, u32),
    pub tile: TileSize,
    pub source: DimSource,
}

impl LayerDims {
    /// `(width, height)` of the whole layer in pixels
    pub fn pixel_size(&self) -> (u64, u64) {
        (
            u64::from(self.grid.0) * u64::from(self.tile.width),
            u64::from(self.grid.1) * u64::from(self.tile.height),
        )
    }
}

/// Resolve the grid and tile size of layer `index` in `map`
pub fn resolve_layer_dims(map: &Map2D, index: usize) -> Result<LayerDims, MapError> {
    let layer = map.layer(index)?;
    let (tile, source) = match (layer.tile_size, map.tile_size) {
        (Some(size), _) => (size, DimSource::Layer),
        (None, Some(size)) => (size, DimSource::Map),
        (None, None) => (map.format_tile_size(), DimSource::Format),
    };
    Ok(LayerDims {
        grid: layer.size(),
        tile,
        source,
    })
}
