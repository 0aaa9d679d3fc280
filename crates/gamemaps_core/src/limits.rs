//! Hard structural limits of a target format
//!
//! Codecs describe what their byte layout can hold with [`FormatLimits`] and
//! call [`validate_map`] before encoding anything, so a map that cannot be
//! written fails before any output exists.

use serde::{Deserialize, Serialize};

use crate::{Map, Map2D, ValidationError};

/// Limits a map must satisfy to be written in a format. `None` means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatLimits {
    #[serde(default)]
    pub min_layers: usize,
    #[serde(default)]
    pub max_layers: Option<usize>,
    #[serde(default)]
    pub max_tile_code: Option<u32>,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub max_height: Option<u32>,
    /// Total across map-level and layer paths
    #[serde(default)]
    pub max_paths: Option<usize>,
    #[serde(default)]
    pub max_path_points: Option<usize>,
    /// Every layer must resolve to exactly this tile size
    #[serde(default)]
    pub fixed_tile_size: Option<crate::TileSize>,
}

impl FormatLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require exactly `count` layers
    pub fn layers(mut self, count: usize) -> Self {
        self.min_layers = count;
        self.max_layers = Some(count);
        self
    }

    pub fn max_layers(mut self, max: usize) -> Self {
        self.max_layers = Some(max);
        self
    }

    pub fn max_tile_code(mut self, max: u32) -> Self {
        self.max_tile_code = Some(max);
        self
    }

    pub fn max_size(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn max_paths(mut self, paths: usize, points: usize) -> Self {
        self.max_paths = Some(paths);
        self.max_path_points = Some(points);
        self
    }

    pub fn fixed_tile_size(mut self, size: crate::TileSize) -> Self {
        self.fixed_tile_size = Some(size);
        self
    }
}

/// Check `map` against `limits`, reporting the first violation found
pub fn validate_map(map: &Map, limits: &FormatLimits) -> Result<(), ValidationError> {
    let grid = map.as_map2d().ok_or(ValidationError::NotGridMap)?;
    validate_map2d(grid, limits)
}

/// Check a tile-grid map against `limits`
pub fn validate_map2d(map: &Map2D, limits: &FormatLimits) -> Result<(), ValidationError> {
    let count = map.layer_count();
    if count < limits.min_layers {
        return Err(ValidationError::TooFewLayers {
            count,
            min: limits.min_layers,
        });
    }
    if let Some(max) = limits.max_layers {
        if count > max {
            return Err(ValidationError::TooManyLayers { count, max });
        }
    }

    for (index, layer) in map.layers().iter().enumerate() {
        let max_width = limits.max_width.unwrap_or(u32::MAX);
        let max_height = limits.max_height.unwrap_or(u32::MAX);
        if layer.width() > max_width || layer.height() > max_height {
            return Err(ValidationError::LayerTooLarge {
                layer: index,
                width: layer.width(),
                height: layer.height(),
                max_width,
                max_height,
            });
        }

        if let Some(max) = limits.max_tile_code {
            if let Some((x, y, cell)) = layer.iter_cells().find(|(_, _, c)| c.code > max) {
                return Err(ValidationError::TileCodeOutOfRange {
                    layer: index,
                    x,
                    y,
                    code: cell.code,
                    max,
                });
            }
        }

        if let Some(expected) = limits.fixed_tile_size {
            // Index comes from enumerate(), so resolution cannot fail
            let tile = crate::resolve_layer_dims(map, index)
                .map(|d| d.tile)
                .unwrap_or(expected);
            if tile != expected {
                return Err(ValidationError::TileSize {
                    layer: index,
                    width: tile.width,
                    height: tile.height,
                    expected_width: expected.width,
                    expected_height: expected.height,
                });
            }
        }
    }

    let all_paths = map
        .paths
        .iter()
        .chain(map.layers().iter().flat_map(|l| l.paths.iter()));

    if let Some(max) = limits.max_paths {
        let count = all_paths.clone().count();
        if count > max {
            return Err(ValidationError::TooManyPaths { count, max });
        }
    }
    if let Some(max) = limits.max_path_points {
        if let Some((path, p)) = all_paths.enumerate().find(|(_, p)| p.len() > max) {
            return Err(ValidationError::PathTooLong {
                path,
                count: p.len(),
                max,
            });
        }
    }

    Ok(())
}
