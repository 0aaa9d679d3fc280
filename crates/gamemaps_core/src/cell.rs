//! A single tile position in a layer grid

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Per-cell flag bits.
///
/// Only the low byte carries the named flags below. Codecs may keep their
/// own bits in the high byte; they are preserved untouched by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellFlags(u16);

impl CellFlags {
    pub const NONE: CellFlags = CellFlags(0);
    /// Tile is mirrored horizontally
    pub const FLIP_X: CellFlags = CellFlags(1 << 0);
    /// Tile is mirrored vertically
    pub const FLIP_Y: CellFlags = CellFlags(1 << 1);
    /// Solid regardless of what the tile graphic looks like
    pub const BLOCKING: CellFlags = CellFlags(1 << 2);
    /// Player start position
    pub const PLAYER_START: CellFlags = CellFlags(1 << 3);

    pub const fn from_bits(bits: u16) -> Self {
        CellFlags(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CellFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CellFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: CellFlags) {
        self.0 &= !other.0;
    }
}

impl BitOr for CellFlags {
    type Output = CellFlags;

    fn bitor(self, rhs: CellFlags) -> CellFlags {
        CellFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellFlags {
    fn bitor_assign(&mut self, rhs: CellFlags) {
        self.0 |= rhs.0;
    }
}

/// Tile code plus flags at one grid position.
///
/// What a code means is up to the format; the core treats it as opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub code: u32,
    #[serde(default, skip_serializing_if = "CellFlags::is_empty")]
    pub flags: CellFlags,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        code: 0,
        flags: CellFlags::NONE,
    };

    pub const fn new(code: u32) -> Self {
        Self {
            code,
            flags: CellFlags::NONE,
        }
    }

    pub const fn with_flags(code: u32, flags: CellFlags) -> Self {
        Self { code, flags }
    }
}

impl From<u32> for Cell {
    fn from(code: u32) -> Self {
        Cell::new(code)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            write!(f, "{:#06x}", self.code)
        } else {
            write!(f, "{:#06x}[{:#x}]", self.code, self.flags.bits())
        }
    }
}
