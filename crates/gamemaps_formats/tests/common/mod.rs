//! Small synthetic formats used to drive the codec contract in tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use gamemaps_core::{
    validate_map, AttrValue, Attribute, AttributeList, Cell, FormatLimits, Layer, Map, Map2D,
    TileSize,
};
use gamemaps_formats::{
    probe, Certainty, EncodedMap, FormatError, FormatRegistry, MapType, ReadSeek, SuppFilenames,
    SuppKind, SuppStreams,
};
use std::io;

// ─── Byte helpers ────────────────────────────────────────────────────────────

/// Running out of bytes means the file is malformed, not that I/O failed
fn truncated(e: io::Error) -> FormatError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => FormatError::invalid("file is truncated"),
        _ => FormatError::Io(e),
    }
}

fn read_bytes(input: &mut dyn ReadSeek, len: usize) -> Result<Vec<u8>, FormatError> {
    let mut buf = vec![0u8; len];
    input.read_exact(&mut buf).map_err(truncated)?;
    Ok(buf)
}

fn read_magic(input: &mut dyn ReadSeek) -> io::Result<Option<[u8; 4]>> {
    probe(input, |s| {
        let mut magic = [0u8; 4];
        match s.read_exact(&mut magic) {
            Ok(()) => Ok(Some(magic)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    })
}

fn grid(map: &Map) -> Result<&Map2D, FormatError> {
    map.as_map2d()
        .ok_or(FormatError::Validation(gamemaps_core::ValidationError::NotGridMap))
}

// ─── map-a ───────────────────────────────────────────────────────────────────

/// Canonical multi-layer format:
///
/// ```text
/// "MAPA" | level:u8 | flags:u8 [tw:u8 th:u8] | layers:u8
///   per layer: flags:u8 [tw:u8 th:u8] | width:u16le | height:u16le | codes:u8[w*h]
/// ```
///
/// Flag bit 0 means a tile size follows.
pub struct MapA;

pub const MAP_A_FORMAT_TILE: TileSize = TileSize::square(32);

impl MapA {
    fn limits() -> FormatLimits {
        FormatLimits::new()
            .max_layers(4)
            .max_tile_code(0xff)
            .max_size(0xffff, 0xffff)
    }
}

fn read_tile_size(input: &mut dyn ReadSeek) -> Result<Option<TileSize>, FormatError> {
    match input.read_u8().map_err(truncated)? {
        0 => Ok(None),
        1 => {
            let width = input.read_u8().map_err(truncated)?;
            let height = input.read_u8().map_err(truncated)?;
            Ok(Some(TileSize::new(width.into(), height.into())))
        }
        other => Err(FormatError::invalid(format!("unknown flags {other:#x}"))),
    }
}

fn write_tile_size(out: &mut Vec<u8>, size: Option<TileSize>) -> Result<(), FormatError> {
    match size {
        None => out.push(0),
        Some(size) => {
            let width = u8::try_from(size.width)
                .map_err(|_| FormatError::invalid("tile width does not fit in a byte"))?;
            let height = u8::try_from(size.height)
                .map_err(|_| FormatError::invalid("tile height does not fit in a byte"))?;
            out.extend_from_slice(&[1, width, height]);
        }
    }
    Ok(())
}

impl MapType for MapA {
    fn code(&self) -> &str {
        "map-a"
    }

    fn friendly_name(&self) -> &str {
        "Test format A"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["mpa"]
    }

    fn games(&self) -> &'static [&'static str] {
        &["Test Game"]
    }

    fn default_tile_size(&self) -> TileSize {
        MAP_A_FORMAT_TILE
    }

    fn is_instance(&self, input: &mut dyn ReadSeek) -> io::Result<Certainty> {
        Ok(match read_magic(input)? {
            Some(magic) if &magic == b"MAPA" => Certainty::Definitely,
            _ => Certainty::DefinitelyNot,
        })
    }

    fn open(&self, input: &mut dyn ReadSeek, _: &mut SuppStreams) -> Result<Map, FormatError> {
        let magic = read_bytes(input, 4)?;
        if magic != b"MAPA" {
            return Err(FormatError::invalid("bad signature"));
        }

        let level = input.read_u8().map_err(truncated)?;
        let level = Attribute::int("Level", "Level number", 0, 99, level.into())?;
        let default_tile = read_tile_size(input)?;

        let count = input.read_u8().map_err(truncated)?;
        let mut layers = Vec::with_capacity(count.into());
        for i in 0..count {
            let tile_size = read_tile_size(input)?;
            let width = input.read_u16::<LittleEndian>().map_err(truncated)?;
            let height = input.read_u16::<LittleEndian>().map_err(truncated)?;
            let codes = read_bytes(input, usize::from(width) * usize::from(height))?;
            let cells = codes.into_iter().map(|c| Cell::new(c.into())).collect();
            let mut layer = Layer::from_cells(format!("Layer {}", i + 1), width.into(), height.into(), cells)?;
            layer.tile_size = tile_size;
            layers.push(layer);
        }

        let mut map2d = Map2D::new(MAP_A_FORMAT_TILE).with_layers(layers);
        map2d.tile_size = default_tile;
        Ok(Map::grid(AttributeList::new(vec![level]), map2d))
    }

    fn write(&self, map: &Map) -> Result<EncodedMap, FormatError> {
        validate_map(map, &Self::limits())?;
        let map2d = grid(map)?;

        let level = map.attributes().value(0)?;
        let level = level
            .as_int()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| FormatError::invalid("level attribute is not a byte"))?;

        let mut out = b"MAPA".to_vec();
        out.push(level);
        write_tile_size(&mut out, map2d.tile_size)?;
        out.push(map2d.layer_count() as u8);
        for layer in map2d.layers() {
            write_tile_size(&mut out, layer.tile_size)?;
            out.write_u16::<LittleEndian>(layer.width() as u16)?;
            out.write_u16::<LittleEndian>(layer.height() as u16)?;
            out.extend(layer.cells().iter().map(|c| c.code as u8));
        }
        Ok(EncodedMap::primary(out))
    }
}

/// Build a map-a file from parts
pub fn map_a_bytes(level: u8, default_tile: Option<(u8, u8)>, layers: &[MapALayer]) -> Vec<u8> {
    let mut out = b"MAPA".to_vec();
    out.push(level);
    push_tile(&mut out, default_tile);
    out.push(layers.len() as u8);
    for layer in layers {
        push_tile(&mut out, layer.tile);
        out.write_u16::<LittleEndian>(layer.width).unwrap();
        out.write_u16::<LittleEndian>(layer.height).unwrap();
        out.extend_from_slice(&layer.codes);
    }
    out
}

fn push_tile(out: &mut Vec<u8>, tile: Option<(u8, u8)>) {
    match tile {
        None => out.push(0),
        Some((w, h)) => out.extend_from_slice(&[1, w, h]),
    }
}

pub struct MapALayer {
    pub tile: Option<(u8, u8)>,
    pub width: u16,
    pub height: u16,
    pub codes: Vec<u8>,
}

impl MapALayer {
    pub fn new(tile: Option<(u8, u8)>, width: u16, height: u16) -> Self {
        let codes = (0..usize::from(width) * usize::from(height))
            .map(|i| (i % 251) as u8)
            .collect();
        Self {
            tile,
            width,
            height,
            codes,
        }
    }
}

// ─── map-b ───────────────────────────────────────────────────────────────────

/// Single-layer format whose tile size lives in a separate tileset file:
///
/// ```text
/// primary: "MAPB" | width:u8 | height:u8 | codes:u8[w*h]
/// tileset: tile_size:u8
/// ```
///
/// The tileset shares the primary file's stem with a `.til` extension.
pub struct MapB;

impl MapType for MapB {
    fn code(&self) -> &str {
        "map-b"
    }

    fn friendly_name(&self) -> &str {
        "Test format B"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["mpb"]
    }

    fn default_tile_size(&self) -> TileSize {
        TileSize::square(8)
    }

    fn is_instance(&self, input: &mut dyn ReadSeek) -> io::Result<Certainty> {
        Ok(match read_magic(input)? {
            Some(magic) if &magic == b"MAPB" => Certainty::Definitely,
            _ => Certainty::DefinitelyNot,
        })
    }

    fn required_supplements(
        &self,
        _: &mut dyn ReadSeek,
        filename: &str,
    ) -> io::Result<SuppFilenames> {
        let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
        Ok([(SuppKind::Tileset, format!("{stem}.til"))].into_iter().collect())
    }

    fn open(&self, input: &mut dyn ReadSeek, supps: &mut SuppStreams) -> Result<Map, FormatError> {
        let tile = supps
            .require(&SuppKind::Tileset)?
            .read_u8()
            .map_err(truncated)?;

        let magic = read_bytes(input, 4)?;
        if magic != b"MAPB" {
            return Err(FormatError::invalid("bad signature"));
        }
        let width = input.read_u8().map_err(truncated)?;
        let height = input.read_u8().map_err(truncated)?;
        let codes = read_bytes(input, usize::from(width) * usize::from(height))?;
        let cells = codes.into_iter().map(|c| Cell::new(c.into())).collect();
        let layer = Layer::from_cells("Tiles", width.into(), height.into(), cells)?;

        let map2d = Map2D::new(self.default_tile_size())
            .with_tile_size(TileSize::square(tile.into()))
            .with_layers(vec![layer]);
        let music = Attribute::enumeration("Music", "Background song", ["None", "Theme"], 0)?;
        Ok(Map::grid(AttributeList::new(vec![music]), map2d))
    }

    fn write(&self, map: &Map) -> Result<EncodedMap, FormatError> {
        let limits = FormatLimits::new().layers(1).max_tile_code(0xff).max_size(0xff, 0xff);
        validate_map(map, &limits)?;
        let map2d = grid(map)?;
        let layer = map2d.layer(0)?;

        let mut out = b"MAPB".to_vec();
        out.extend_from_slice(&[layer.width() as u8, layer.height() as u8]);
        out.extend(layer.cells().iter().map(|c| c.code as u8));

        let tile = map2d.layer_dims(0)?.tile.width;
        let tile = u8::try_from(tile).map_err(|_| FormatError::invalid("tile size too large"))?;
        Ok(EncodedMap::primary(out).with_supplement(SuppKind::Tileset, vec![tile]))
    }
}

pub fn map_b_bytes(width: u8, height: u8, codes: &[u8]) -> Vec<u8> {
    let mut out = b"MAPB".to_vec();
    out.extend_from_slice(&[width, height]);
    out.extend_from_slice(codes);
    out
}

// ─── map-raw ─────────────────────────────────────────────────────────────────

/// Headerless 16x16 grid. Any stream of exactly 256 bytes might be one.
pub struct MapRaw;

impl MapType for MapRaw {
    fn code(&self) -> &str {
        "map-raw"
    }

    fn friendly_name(&self) -> &str {
        "Raw 16x16 grid"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["raw", "mpa"]
    }

    fn default_tile_size(&self) -> TileSize {
        TileSize::square(16)
    }

    fn is_instance(&self, input: &mut dyn ReadSeek) -> io::Result<Certainty> {
        let len = probe(input, |s| {
            let mut buf = Vec::new();
            s.read_to_end(&mut buf)?;
            Ok(buf.len())
        })?;
        Ok(if len == 256 {
            Certainty::Possibly
        } else {
            Certainty::DefinitelyNot
        })
    }

    fn open(&self, input: &mut dyn ReadSeek, _: &mut SuppStreams) -> Result<Map, FormatError> {
        let codes = read_bytes(input, 256)?;
        let cells = codes.into_iter().map(|c| Cell::new(c.into())).collect();
        let layer = Layer::from_cells("Raw", 16, 16, cells)?;
        let map2d = Map2D::new(self.default_tile_size()).with_layers(vec![layer]);
        Ok(Map::grid(AttributeList::default(), map2d))
    }

    fn write(&self, map: &Map) -> Result<EncodedMap, FormatError> {
        validate_map(map, &FormatLimits::new().layers(1).max_tile_code(0xff).max_size(16, 16))?;
        let layer = grid(map)?.layer(0)?;
        if layer.size() != (16, 16) {
            return Err(FormatError::invalid("raw grids are always 16x16"));
        }
        Ok(EncodedMap::primary(
            layer.cells().iter().map(|c| c.code as u8).collect(),
        ))
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

pub fn map_a() -> Box<dyn MapType> {
    Box::new(MapA)
}

pub fn map_b() -> Box<dyn MapType> {
    Box::new(MapB)
}

pub fn map_raw() -> Box<dyn MapType> {
    Box::new(MapRaw)
}

pub fn registry() -> FormatRegistry {
    FormatRegistry::from_constructors(&[map_a, map_b, map_raw], &Default::default())
        .expect("test codes are unique")
}

/// Value of the first attribute as an int, for terse assertions
pub fn level(map: &Map) -> Option<i64> {
    map.attributes().value(0).ok().and_then(|v| v.as_int())
}

pub fn set_level(map: &mut Map, level: i64) -> Result<(), gamemaps_core::AttributeError> {
    map.set_attribute(0, AttrValue::Int(level))
}
