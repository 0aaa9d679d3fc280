//! Error types for the map data model

use thiserror::Error;

/// Rejection of an attribute construction or mutation.
///
/// A rejected `set` never changes the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("value {value} is outside the range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: i64, max: i64 },

    #[error("option index {index} is invalid for a list of {len} options")]
    InvalidIndex { index: usize, len: usize },

    #[error("text of {len} characters exceeds the maximum of {max}")]
    TooLong { len: usize, max: usize },

    #[error("expected a {expected} value, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("no attribute at index {index} (map has {len})")]
    NoSuchAttribute { index: usize, len: usize },
}

/// Errors raised while navigating or mutating a map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("layer index {index} is out of bounds (map has {count} layers)")]
    LayerIndex { index: usize, count: usize },

    #[error("path index {index} is out of bounds ({count} paths)")]
    PathIndex { index: usize, count: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("grid holds {found} cells but the declared size needs {expected}")]
    GridSize { expected: usize, found: usize },

    #[error("path cannot take more points (limit {limit})")]
    PathFull { limit: usize },

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

/// A map violates the hard structural limits of a target format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("map has {count} layers but the format allows at most {max}")]
    TooManyLayers { count: usize, max: usize },

    #[error("map has {count} layers but the format requires at least {min}")]
    TooFewLayers { count: usize, min: usize },

    #[error("layer {layer}: tile code {code:#x} at ({x}, {y}) exceeds the maximum {max:#x}")]
    TileCodeOutOfRange {
        layer: usize,
        x: u32,
        y: u32,
        code: u32,
        max: u32,
    },

    #[error("layer {layer}: {width}x{height} tiles exceeds the format limit of {max_width}x{max_height}")]
    LayerTooLarge {
        layer: usize,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("layer {layer}: tile size {width}x{height} is not the {expected_width}x{expected_height} the format stores")]
    TileSize {
        layer: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("{count} paths exceeds the format limit of {max}")]
    TooManyPaths { count: usize, max: usize },

    #[error("path {path} has {count} points but the format allows at most {max}")]
    PathTooLong { path: usize, count: usize, max: usize },

    #[error("map is not a tile-grid map")]
    NotGridMap,
}
