//! Connected-component labelling
//!
//! A region is a maximal set of same-valued tiles joined through shared
//! edges. Regions are snapshots: once tiles are flipped they are stale.

#[cfg(not(feature = "std"))]
use crate::compat::*;

#[cfg(feature = "std")]
use std::collections::VecDeque;

use super::{Coord, Grid, Tile};

/// One flood-filled region, tiles in visit order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Value shared by every tile at extraction time
    pub tile: Tile,
    pub tiles: Vec<Coord>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check if any tile lies on the outer ring of `grid`
    pub fn touches_border(&self, grid: &Grid) -> bool {
        self.tiles.iter().any(|&c| grid.is_border(c))
    }
}

/// Row-major visited flags for one extraction run
struct VisitedMap {
    width: usize,
    flags: Vec<bool>,
}

impl VisitedMap {
    fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            flags: vec![false; grid.width() * grid.height()],
        }
    }

    fn index(&self, coord: Coord) -> usize {
        coord.y as usize * self.width + coord.x as usize
    }

    fn is_visited(&self, coord: Coord) -> bool {
        self.flags[self.index(coord)]
    }

    /// Mark a tile; returns false if it was already marked
    fn visit(&mut self, coord: Coord) -> bool {
        let idx = self.index(coord);
        !core::mem::replace(&mut self.flags[idx], true)
    }
}

/// Breadth-first flood fill from `start` over 4-connected tiles of its value
fn flood_region(grid: &Grid, start: Coord, visited: &mut VisitedMap) -> Region {
    let tile = grid.tile(start).unwrap_or_default();
    let mut tiles = Vec::new();
    let mut queue = VecDeque::new();

    visited.visit(start);
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        tiles.push(coord);
        for next in coord.cardinal_neighbours() {
            if grid.tile(next) == Some(tile) && visited.visit(next) {
                queue.push_back(next);
            }
        }
    }

    Region { tile, tiles }
}

/// Label every region of `tile` in the grid
///
/// Tiles are scanned row-major; each unvisited matching tile seeds a new
/// region. Every matching tile ends up in exactly one region, tiles of the
/// other value are never visited.
pub fn extract_regions(grid: &Grid, tile: Tile) -> Vec<Region> {
    let mut visited = VisitedMap::new(grid);
    let mut regions = Vec::new();

    for coord in grid.coords() {
        if grid.tile(coord) == Some(tile) && !visited.is_visited(coord) {
            regions.push(flood_region(grid, coord, &mut visited));
        }
    }

    log::debug!("extracted {} {} regions", regions.len(), tile);
    regions
}
