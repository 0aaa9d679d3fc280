//! Supplementary files
//!
//! Many formats split a level across several files: tile layers stored
//! separately, a tileset or attribute file next to the main one. A codec
//! reports what it needs through [`SuppFilenames`]; the caller opens those
//! files and hands them back as [`SuppStreams`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use crate::{FormatError, ReadSeek};

/// What a supplementary file holds. The meaning of each kind is per format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppKind {
    /// Tile data for the layer with this number
    Layer(u8),
    /// Format-specific extra data
    Extra(u8),
    Tileset,
    Attributes,
    /// Anything a format wants to name itself
    Custom(String),
}

impl fmt::Display for SuppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuppKind::Layer(n) => write!(f, "layer{n}"),
            SuppKind::Extra(n) => write!(f, "extra{n}"),
            SuppKind::Tileset => write!(f, "tileset"),
            SuppKind::Attributes => write!(f, "attributes"),
            SuppKind::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Expected filename for each supplementary file a format needs
pub type SuppFilenames = BTreeMap<SuppKind, String>;

/// Open supplementary streams passed into `open`.
///
/// The caller keeps ownership; codecs only borrow the streams for the
/// duration of the call.
#[derive(Default)]
pub struct SuppStreams {
    streams: BTreeMap<SuppKind, Box<dyn ReadSeek>>,
}

impl SuppStreams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: SuppKind, stream: impl ReadSeek + 'static) {
        self.streams.insert(kind, Box::new(stream));
    }

    pub fn with(mut self, kind: SuppKind, stream: impl ReadSeek + 'static) -> Self {
        self.insert(kind, stream);
        self
    }

    pub fn contains(&self, kind: &SuppKind) -> bool {
        self.streams.contains_key(kind)
    }

    pub fn get_mut(&mut self, kind: &SuppKind) -> Option<&mut (dyn ReadSeek + 'static)> {
        self.streams.get_mut(kind).map(|stream| stream.as_mut())
    }

    /// Borrow a supplement the format cannot do without
    pub fn require(
        &mut self,
        kind: &SuppKind,
    ) -> Result<&mut (dyn ReadSeek + 'static), FormatError> {
        self.get_mut(kind)
            .ok_or_else(|| FormatError::MissingSupplement(kind.clone()))
    }

    /// Fail with the first kind in `wanted` that has no stream
    pub fn check(&self, wanted: &SuppFilenames) -> Result<(), FormatError> {
        match wanted.keys().find(|kind| !self.contains(kind)) {
            Some(kind) => Err(FormatError::MissingSupplement(kind.clone())),
            None => Ok(()),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = &SuppKind> {
        self.streams.keys()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl fmt::Debug for SuppStreams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.streams.keys()).finish()
    }
}

/// Destinations for supplementary output in [`MapType::write_to`](crate::MapType::write_to)
pub type SuppWriters<'a> = BTreeMap<SuppKind, &'a mut dyn Write>;

/// Fully encoded output of a `write`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedMap {
    pub primary: Vec<u8>,
    pub supplements: BTreeMap<SuppKind, Vec<u8>>,
}

impl EncodedMap {
    /// Output consisting of the primary file only
    pub fn primary(bytes: Vec<u8>) -> Self {
        Self {
            primary: bytes,
            supplements: BTreeMap::new(),
        }
    }

    pub fn with_supplement(mut self, kind: SuppKind, bytes: Vec<u8>) -> Self {
        self.supplements.insert(kind, bytes);
        self
    }
}
