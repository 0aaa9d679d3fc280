//! The root map types

use serde::{Deserialize, Serialize};

use crate::{AttrValue, AttributeError, AttributeList, Layer, LayerDims, MapError, Path, TileSize};

/// One game level, as produced by a codec.
///
/// A map owns its attributes and its kind-specific content. Nothing in a map
/// is shared with another map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "bevy",
    derive(bevy::asset::Asset, bevy::reflect::TypePath)
)]
pub struct Map {
    #[serde(default)]
    attributes: AttributeList,
    kind: MapKind,
}

/// Kind-specific map content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MapKind {
    /// Tile-grid layers
    Grid(Map2D),
}

impl Map {
    pub fn new(attributes: AttributeList, kind: MapKind) -> Self {
        Self { attributes, kind }
    }

    /// Create a tile-grid map
    pub fn grid(attributes: AttributeList, map: Map2D) -> Self {
        Self::new(attributes, MapKind::Grid(map))
    }

    pub fn kind(&self) -> &MapKind {
        &self.kind
    }

    /// The tile-grid view of this map, if it is one
    pub fn as_map2d(&self) -> Option<&Map2D> {
        match &self.kind {
            MapKind::Grid(map) => Some(map),
        }
    }

    pub fn as_map2d_mut(&mut self) -> Option<&mut Map2D> {
        match &mut self.kind {
            MapKind::Grid(map) => Some(map),
        }
    }

    /// Attributes in the order the codec defined them
    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// Validate and set the attribute at `index`
    pub fn set_attribute(&mut self, index: usize, value: AttrValue) -> Result<(), AttributeError> {
        self.attributes.set(index, value)
    }
}

/// A map made of tile-grid layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map2D {
    layers: Vec<Layer>,
    /// Tile size used by layers that do not declare their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<TileSize>,
    /// Tile size the codec falls back to when neither layer nor map has one
    format_tile_size: TileSize,
    /// Visible area in pixels, for formats that define one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<(u32, u32)>,
    /// Paths that belong to the map rather than to one layer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<Path>,
}

impl Map2D {
    /// Create an empty map. `format_tile_size` is the codec's own constant.
    pub fn new(format_tile_size: TileSize) -> Self {
        Self {
            layers: Vec::new(),
            tile_size: None,
            format_tile_size,
            viewport: None,
            paths: Vec::new(),
        }
    }

    pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    pub fn with_paths(mut self, paths: Vec<Path>) -> Self {
        self.paths = paths;
        self
    }

    pub fn format_tile_size(&self) -> TileSize {
        self.format_tile_size
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Get a layer by index. Out of range is an error, never clamped.
    pub fn layer(&self, index: usize) -> Result<&Layer, MapError> {
        let count = self.layers.len();
        self.layers
            .get(index)
            .ok_or(MapError::LayerIndex { index, count })
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, MapError> {
        let count = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(MapError::LayerIndex { index, count })
    }

    /// Append a layer and return its index
    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// Remove a layer. Map-level paths pointing at later layers are renumbered;
    /// paths pointing at the removed layer lose their layer reference.
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer, MapError> {
        self.layer(index)?;
        let removed = self.layers.remove(index);
        for path in &mut self.paths {
            path.layer = match path.layer {
                Some(i) if i == index => None,
                Some(i) if i > index => Some(i - 1),
                other => other,
            };
        }
        Ok(removed)
    }

    /// Effective grid and tile size for the layer at `index`
    pub fn layer_dims(&self, index: usize) -> Result<LayerDims, MapError> {
        crate::resolve_layer_dims(self, index)
    }

    /// Size of the whole map in tiles: the largest layer width and height
    pub fn size_in_tiles(&self) -> (u32, u32) {
        self.layers.iter().fold((0, 0), |(w, h), layer| {
            (w.max(layer.width()), h.max(layer.height()))
        })
    }
}
