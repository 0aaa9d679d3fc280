//! Codec contract and format registry for gamemaps
//!
//! Each binary map format is a [`MapType`]: a stateless translator between
//! bytes and a [`gamemaps_core::Map`]. A [`FormatRegistry`] holds the known
//! formats, looks them up by code, and ranks them against unknown input.
//!
//! # Example
//!
//! ```rust,ignore
//! use gamemaps_formats::{FormatRegistry, RegistryConfig, SuppStreams};
//!
//! let config = RegistryConfig::load_default()?;
//! let registry = FormatRegistry::from_constructors(&[my_format::codec], &config)?;
//!
//! let mut file = std::fs::File::open("level1.dat")?;
//! if let Some(codec) = registry.best_match(&mut file, config.detect.accept_possibly)? {
//!     let map = codec.open(&mut file, &mut SuppStreams::new())?;
//! }
//! ```

mod codec;
mod config;
mod error;
mod fs;
mod registry;
mod supp;

pub use codec::{open_checked, probe, Certainty, MapType, ReadSeek};
pub use config::{DetectSettings, RegistryConfig, RegistrySettings};
pub use error::{FormatError, RegistryError, Result};
pub use fs::{open_map_file, save_map_file, OpenedMap};
pub use registry::{CodecConstructor, Detection, FormatRegistry};
pub use supp::{EncodedMap, SuppFilenames, SuppKind, SuppStreams, SuppWriters};
