//! gamemaps - tile-based maps from classic games through one interface
//!
//! This crate re-exports the gamemaps data model and codec layer:
//! - [`gamemaps_core`] - `Map`, `Layer`, `Cell`, `Path`, typed attributes
//! - [`gamemaps_formats`] - the `MapType` codec contract, `FormatRegistry`
//!   and file helpers
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gamemaps::prelude::*;
//!
//! let registry = FormatRegistry::from_constructors(&[my_format], &RegistryConfig::load_default()?)?;
//! let opened = open_map_file(&registry, "LEVEL1.MAP".as_ref(), None, &RegistryConfig::default())?;
//! let dims = resolve_layer_dims(opened.map.as_map2d().unwrap(), 0)?;
//! ```
//!
//! # Features
//!
//! - `bevy` - Load maps as Bevy assets through [`GameMapsPlugin`]

pub use gamemaps_core;
pub use gamemaps_formats;

pub use gamemaps_core::*;
pub use gamemaps_formats::{
    open_checked, open_map_file, probe, save_map_file, Certainty, CodecConstructor, DetectSettings,
    Detection, EncodedMap, FormatError, FormatRegistry, MapType, OpenedMap, ReadSeek,
    RegistryConfig, RegistryError, RegistrySettings, SuppFilenames, SuppKind, SuppStreams,
    SuppWriters,
};

#[cfg(feature = "bevy")]
mod bevy_loader;

#[cfg(feature = "bevy")]
pub use bevy_loader::{GameMapLoadError, GameMapLoader, GameMapsPlugin};

/// Prelude for convenient imports
pub mod prelude {
    pub use gamemaps_core::{
        resolve_layer_dims, AttrValue, Attribute, AttributeList, Cell, FormatLimits, Layer, Map,
        Map2D, Path, TileSize,
    };
    pub use gamemaps_formats::{
        open_map_file, save_map_file, Certainty, FormatError, FormatRegistry, MapType,
        RegistryConfig, SuppKind, SuppStreams,
    };

    #[cfg(feature = "bevy")]
    pub use crate::{GameMapLoader, GameMapsPlugin};
}
