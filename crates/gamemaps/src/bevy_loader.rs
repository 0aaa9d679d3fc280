//! Bevy asset loader for every registered map format
//!
//! The loader detects the format of each file it is handed, reads any
//! supplementary files from the same asset directory, and produces a
//! [`Map`] asset.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use gamemaps::{FormatRegistry, GameMapsPlugin, Map};
//!
//! fn main() {
//!     let registry = FormatRegistry::from_constructors(&[my_format], &Default::default()).unwrap();
//!     App::new()
//!         .add_plugins((DefaultPlugins, GameMapsPlugin::new(registry)))
//!         .add_systems(Startup, |server: Res<AssetServer>| {
//!             let _map: Handle<Map> = server.load("levels/LEVEL1.MAP");
//!         })
//!         .run();
//! }
//! ```

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext, ReadAssetBytesError};
use bevy::prelude::*;
use gamemaps_core::Map;
use gamemaps_formats::{open_checked, FormatError, FormatRegistry, SuppStreams};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Error type for map loading failures
#[derive(Debug, Error)]
pub enum GameMapLoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read supplementary file: {0}")]
    Supplement(#[from] ReadAssetBytesError),
    #[error("No registered format recognises {0}")]
    UnknownFormat(String),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Asset loader backed by a [`FormatRegistry`]
///
/// Claims every extension declared by a registered codec. Files are always
/// auto-detected, since several formats often share one extension.
pub struct GameMapLoader {
    registry: Arc<FormatRegistry>,
    extensions: Vec<&'static str>,
    accept_possibly: bool,
}

impl GameMapLoader {
    pub fn new(registry: Arc<FormatRegistry>) -> Self {
        let mut extensions: Vec<&'static str> = registry
            .iter()
            .flat_map(|c| c.extensions().iter().copied())
            .collect();
        extensions.sort_unstable();
        extensions.dedup();
        Self {
            registry,
            extensions,
            accept_possibly: true,
        }
    }

    /// Only load files some codec is `definitely` sure about
    pub fn strict(mut self) -> Self {
        self.accept_possibly = false;
        self
    }
}

impl AssetLoader for GameMapLoader {
    type Asset = Map;
    type Settings = ();
    type Error = GameMapLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let path = load_context.asset_path().path().to_path_buf();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut input = Cursor::new(bytes);
        let codec = self
            .registry
            .best_match(&mut input, self.accept_possibly)?
            .ok_or_else(|| GameMapLoadError::UnknownFormat(path.display().to_string()))?;

        let mut supps = SuppStreams::new();
        for (kind, name) in codec.required_supplements(&mut input, &filename)? {
            let data = load_context.read_asset_bytes(dir.join(&name)).await?;
            supps.insert(kind, Cursor::new(data));
        }
        input.set_position(0);

        let map = open_checked(codec, &mut input, &filename, &mut supps)?;
        debug!("Loaded {} as '{}'", path.display(), codec.code());
        Ok(map)
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }
}

/// Registers [`Map`] as an asset and a [`GameMapLoader`] for it
pub struct GameMapsPlugin {
    registry: Arc<FormatRegistry>,
}

impl GameMapsPlugin {
    pub fn new(registry: FormatRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn shared(registry: Arc<FormatRegistry>) -> Self {
        Self { registry }
    }
}

impl Plugin for GameMapsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<Map>()
            .register_asset_loader(GameMapLoader::new(Arc::clone(&self.registry)));
    }
}
