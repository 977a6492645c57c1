//! Cave grid and tile coordinates

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Tile;
use crate::ConfigError;

/// Cardinal neighbour offsets, in the order flood fills visit them
pub(crate) const CARDINAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Integer tile coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another tile
    pub const fn distance_squared(&self, other: Coord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Centre of this tile in a world space centred on a `width` x `height` map
    pub fn to_world_point(&self, width: usize, height: usize) -> (f32, f32) {
        let half_w = (width / 2) as f32;
        let half_h = (height / 2) as f32;
        (
            -half_w + 0.5 + self.x as f32,
            -half_h + 0.5 + self.y as f32,
        )
    }

    /// The four edge-sharing neighbours (may be out of bounds)
    pub fn cardinal_neighbours(&self) -> impl Iterator<Item = Coord> + '_ {
        CARDINAL_OFFSETS
            .iter()
            .map(move |&(dx, dy)| Coord::new(self.x + dx, self.y + dy))
    }
}

/// Binary tile grid, indexed `cells[x][y]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Tile>>,
}

impl Grid {
    /// Create a solid grid
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Tile::Wall)
    }

    /// Create a grid with every tile set to `tile`
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![tile; height]; width],
        }
    }

    /// Parse a grid from text rows, row `i` being `y = i`
    ///
    /// `#`/`1` are walls, `.`/`0`/space are open. Rows must share one length.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }

        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ConfigError::Parse(format!(
                    "row {} has {} tiles, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let tile = Tile::from_symbol(c)
                    .ok_or_else(|| ConfigError::Parse(format!("unknown tile '{}' at ({}, {})", c, x, y)))?;
                grid.cells[x][y] = tile;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position is inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.in_bounds(coord.x, coord.y)
    }

    /// Tile at a position, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.cells[x as usize][y as usize])
        } else {
            None
        }
    }

    pub fn tile(&self, coord: Coord) -> Option<Tile> {
        self.get(coord.x, coord.y)
    }

    /// Set a tile. Returns false (and changes nothing) outside the grid.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> bool {
        if !self.contains(coord) {
            return false;
        }
        self.cells[coord.x as usize][coord.y as usize] = tile;
        true
    }

    /// Walls and out-of-grid positions both count as wall
    pub fn is_wall_or_outside(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_none_or(|tile| tile.is_wall())
    }

    /// Check if a position lies on the outer ring
    pub fn is_border(&self, coord: Coord) -> bool {
        self.contains(coord)
            && (coord.x == 0
                || coord.y == 0
                || coord.x as usize == self.width - 1
                || coord.y as usize == self.height - 1)
    }

    /// Count walls among the 8 neighbours; out-of-grid neighbours count as wall
    pub fn surrounding_wall_count(&self, x: i32, y: i32) -> usize {
        let mut count = 0;
        for nx in x - 1..=x + 1 {
            for ny in y - 1..=y + 1 {
                if (nx != x || ny != y) && self.is_wall_or_outside(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of tiles with the given value
    pub fn count(&self, tile: Tile) -> usize {
        self.cells
            .iter()
            .flat_map(|col| col.iter())
            .filter(|&&t| t == tile)
            .count()
    }

    /// All coordinates in row-major order (y outer, x inner)
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x as i32, y as i32)))
    }

    /// Check the outer ring is solid
    pub fn border_is_solid(&self) -> bool {
        self.coords()
            .filter(|&c| self.is_border(c))
            .all(|c| self.tile(c) == Some(Tile::Wall))
    }

    /// Numeric form for the mesh collaborator, `[x][y]` with 0 = open, 1 = wall
    pub fn values(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|col| col.iter().map(Tile::value).collect())
            .collect()
    }

    /// Walkability classification for the pathfinding collaborator, `[x][y]`
    pub fn walkable_mask(&self) -> Vec<Vec<bool>> {
        self.cells
            .iter()
            .map(|col| col.iter().map(|t| !t.is_wall()).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.cells[x][y].symbol())?;
            }
            if y + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
