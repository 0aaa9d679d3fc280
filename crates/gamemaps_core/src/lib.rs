//! Core data structures for gamemaps
//!
//! This crate provides a uniform in-memory representation of tile-based
//! game levels, independent of how any particular game stores them:
//! - `Map` - A level with ordered attributes and kind-specific content
//! - `Map2D` - Tile-grid content: layers, default tile size, map paths
//! - `Layer` - A rectangular grid of `Cell`s with optional paths
//! - `Attribute` - Typed, validated metadata (int, enum, filename, text)
//! - `resolve_layer_dims` - Effective tile size through the fallback chain
//! - `FormatLimits` - Structural limits checked before a map is written

mod attribute;
mod cell;
mod dims;
mod error;
mod layer;
mod limits;
mod map;
mod path;

pub use attribute::{
    AttrValue, Attribute, AttributeKind, AttributeList, EnumAttribute, FilenameAttribute,
    IntAttribute, TextAttribute,
};
pub use cell::{Cell, CellFlags};
pub use dims::{resolve_layer_dims, DimSource, LayerDims, TileSize};
pub use error::{AttributeError, MapError, ValidationError};
pub use layer::Layer;
pub use limits::{validate_map, validate_map2d, FormatLimits};
pub use map::{Map, Map2D, MapKind};
pub use path::{Path, Point};
