//! Small region removal
//!
//! Walls are filtered first: opening small wall pockets can merge open
//! regions, so open regions must be extracted again afterwards.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use super::region::{Region, extract_regions};
use super::{Grid, Tile};

/// Flip every tile of a region to the opposite value
fn flip_region(grid: &mut Grid, region: &Region) {
    let flipped = region.tile.flipped();
    for &coord in &region.tiles {
        grid.set(coord, flipped);
    }
}

/// Open up wall regions smaller than `threshold`
///
/// Regions touching the outer ring are kept whatever their size so the
/// border stays solid. Returns the number of regions removed.
pub fn filter_wall_regions(grid: &mut Grid, threshold: usize) -> usize {
    let mut removed = 0;
    for region in extract_regions(grid, Tile::Wall) {
        if region.len() < threshold && !region.touches_border(grid) {
            flip_region(grid, &region);
            removed += 1;
        }
    }
    log::debug!("removed {} wall regions below {} tiles", removed, threshold);
    removed
}

/// Fill in open regions smaller than `threshold` and return the survivors
///
/// Must run after [`filter_wall_regions`]; the survivors are extracted from
/// the grid as it stands after wall filtering.
pub fn filter_room_regions(grid: &mut Grid, threshold: usize) -> Vec<Region> {
    let mut survivors = Vec::new();
    let mut removed = 0;
    for region in extract_regions(grid, Tile::Open) {
        if region.len() < threshold {
            flip_region(grid, &region);
            removed += 1;
        } else {
            survivors.push(region);
        }
    }
    log::debug!(
        "removed {} open regions below {} tiles, {} survive",
        removed,
        threshold,
        survivors.len()
    );
    survivors
}
