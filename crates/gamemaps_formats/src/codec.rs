//! The codec contract every map format implements

use gamemaps_core::{Map, TileSize};
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::{EncodedMap, FormatError, SuppFilenames, SuppStreams, SuppWriters};

/// A readable, seekable byte stream
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// How sure a codec is that a stream is in its format.
///
/// Ordered so that `DefinitelyNot < Possibly < Definitely`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Certainty {
    DefinitelyNot,
    /// Nothing contradicts the format, but there is no signature to confirm it
    Possibly,
    Definitely,
}

impl fmt::Display for Certainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Certainty::DefinitelyNot => "definitely not",
            Certainty::Possibly => "possibly",
            Certainty::Definitely => "definitely",
        };
        f.write_str(text)
    }
}

/// One binary map format.
///
/// A codec translates between its byte layout and a [`Map`]. It holds no
/// per-file state, so one instance can serve any number of calls from any
/// number of threads.
pub trait MapType: Send + Sync {
    /// Short, stable, unique identifier such as `"map-cosmo"`
    fn code(&self) -> &str;

    /// Human-readable format name
    fn friendly_name(&self) -> &str;

    /// File extensions, lowercase and without the leading dot
    fn extensions(&self) -> &'static [&'static str];

    /// Games known to use this format
    fn games(&self) -> &'static [&'static str] {
        &[]
    }

    /// Tile size used when neither a layer nor the map declares one
    fn default_tile_size(&self) -> TileSize;

    /// Guess whether `input` is in this format.
    ///
    /// Must leave the stream position where it found it; see [`probe`].
    fn is_instance(&self, input: &mut dyn ReadSeek) -> io::Result<Certainty>;

    /// Supplementary files needed to open `input`, keyed by kind.
    ///
    /// `filename` is the name of the primary file, which many formats derive
    /// their supplement names from.
    fn required_supplements(
        &self,
        input: &mut dyn ReadSeek,
        filename: &str,
    ) -> io::Result<SuppFilenames> {
        let _ = (input, filename);
        Ok(SuppFilenames::new())
    }

    /// Parse `input` and its supplements into a map.
    ///
    /// Implementations fetch required supplements before parsing so a missing
    /// one is reported as [`FormatError::MissingSupplement`].
    fn open(&self, input: &mut dyn ReadSeek, supps: &mut SuppStreams) -> Result<Map, FormatError>;

    /// Encode `map` into this format. Never modifies the map.
    fn write(&self, map: &Map) -> Result<EncodedMap, FormatError>;

    /// Encode `map` and write it out.
    ///
    /// Everything is encoded in memory first and every supplement must have
    /// a destination, so an encoding failure leaves all writers untouched.
    /// An I/O error from a writer itself can still leave earlier writers
    /// filled; use [`crate::save_map_file`] for all-or-nothing saves to disk.
    fn write_to(
        &self,
        map: &Map,
        out: &mut dyn Write,
        supps: &mut SuppWriters<'_>,
    ) -> Result<(), FormatError> {
        let encoded = self.write(map)?;
        if let Some(kind) = encoded.supplements.keys().find(|k| !supps.contains_key(*k)) {
            return Err(FormatError::MissingSupplement(kind.clone()));
        }
        out.write_all(&encoded.primary)?;
        for (kind, bytes) in &encoded.supplements {
            if let Some(writer) = supps.get_mut(kind) {
                writer.write_all(bytes)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for dyn MapType + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapType")
            .field("code", &self.code())
            .field("name", &self.friendly_name())
            .finish()
    }
}

/// Run `f` against `input`, then seek back to where the stream started.
///
/// The position is restored whether `f` succeeds or not.
pub fn probe<T>(
    input: &mut dyn ReadSeek,
    f: impl FnOnce(&mut dyn ReadSeek) -> io::Result<T>,
) -> io::Result<T> {
    let start = input.stream_position()?;
    let result = f(&mut *input);
    input.seek(SeekFrom::Start(start))?;
    result
}

/// Ask `codec` for its supplements, check they were all supplied, then open.
///
/// This guarantees a missing supplement is reported before any parse error,
/// whatever order the codec itself checks things in.
pub fn open_checked(
    codec: &dyn MapType,
    input: &mut dyn ReadSeek,
    filename: &str,
    supps: &mut SuppStreams,
) -> Result<Map, FormatError> {
    let wanted = probe(input, |s| codec.required_supplements(s, filename))?;
    supps.check(&wanted)?;
    codec.open(input, supps)
}
