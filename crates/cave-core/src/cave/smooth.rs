//! Cellular automaton smoothing

use crate::consts::SMOOTH_PIVOT;

use super::{Coord, Grid, Tile};

/// Run one smoothing pass and return the new grid
///
/// Every tile is decided from the input snapshot: more than four wall
/// neighbours makes a wall, fewer makes it open, exactly four leaves it.
pub fn smooth_step(grid: &Grid) -> Grid {
    let mut next = grid.clone();

    for coord in grid.coords() {
        let walls = grid.surrounding_wall_count(coord.x, coord.y);
        if walls > SMOOTH_PIVOT {
            next.set(coord, Tile::Wall);
        } else if walls < SMOOTH_PIVOT {
            next.set(coord, Tile::Open);
        }
    }

    next
}

/// Run `iterations` smoothing passes in sequence
pub fn smooth(grid: Grid, iterations: u32) -> Grid {
    let mut grid = grid;
    for i in 0..iterations {
        grid = smooth_step(&grid);
        log::debug!("smoothing pass {}: {} walls", i + 1, grid.count(Tile::Wall));
    }
    grid
}

/// Count tiles whose value differs between two grids of equal size
pub fn changed_tiles(before: &Grid, after: &Grid) -> usize {
    before
        .coords()
        .filter(|&c: &Coord| before.tile(c) != after.tile(c))
        .count()
}
