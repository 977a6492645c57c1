//! Tile values

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One cell of the cave grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    Open = 0,
    #[default]
    Wall = 1,
}

impl Tile {
    /// Numeric value handed to the mesh collaborator (0 = open, 1 = wall)
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    /// Parse a numeric tile value
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Tile::Open),
            1 => Some(Tile::Wall),
            _ => None,
        }
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// The opposite tile value, used when filtering regions away
    pub const fn flipped(&self) -> Self {
        match self {
            Tile::Open => Tile::Wall,
            Tile::Wall => Tile::Open,
        }
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Open => '.',
            Tile::Wall => '#',
        }
    }

    /// Parse a display character
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' | ' ' | '0' => Some(Tile::Open),
            '#' | '1' => Some(Tile::Wall),
            _ => None,
        }
    }
}
