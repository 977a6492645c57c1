//! Random initial fill

use crate::rng::CaveRng;

use super::{Coord, Grid, Tile};

/// Fill a fresh grid with noise
///
/// The outer ring is always wall; every interior tile is wall with
/// probability `fill_percent / 100`. Tiles are drawn column by column so
/// the same seed and dimensions always give the same grid.
pub fn random_fill(width: usize, height: usize, fill_percent: u32, rng: &mut CaveRng) -> Grid {
    let mut grid = Grid::new(width, height);

    for x in 0..width {
        for y in 0..height {
            let coord = Coord::new(x as i32, y as i32);
            if grid.is_border(coord) {
                continue;
            }
            let tile = if rng.percent(fill_percent) {
                Tile::Wall
            } else {
                Tile::Open
            };
            grid.set(coord, tile);
        }
    }

    log::debug!(
        "random fill {}x{} at {}%: {} walls",
        width,
        height,
        fill_percent,
        grid.count(Tile::Wall)
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_wall() {
        let mut rng = CaveRng::new(1);
        let grid = random_fill(20, 15, 0, &mut rng);
        assert!(grid.border_is_solid());
        // With 0% fill the interior is entirely open
        assert_eq!(grid.count(Tile::Open), 18 * 13);
    }

    #[test]
    fn test_full_fill_is_solid() {
        let mut rng = CaveRng::new(1);
        let grid = random_fill(10, 10, 100, &mut rng);
        assert_eq!(grid.count(Tile::Open), 0);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = random_fill(40, 30, 45, &mut CaveRng::from_seed_text("test1"));
        let b = random_fill(40, 30, 45, &mut CaveRng::from_seed_text("test1"));
        let c = random_fill(40, 30, 45, &mut CaveRng::from_seed_text("test2"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fill_ratio_roughly_matches() {
        let mut rng = CaveRng::new(99);
        let grid = random_fill(102, 102, 45, &mut rng);
        let interior = 100 * 100;
        let walls = grid.count(Tile::Wall) - (4 * 101);
        let ratio = walls as f64 / interior as f64;
        assert!(ratio > 0.40 && ratio < 0.50, "wall ratio {}", ratio);
    }

    #[test]
    fn test_tiny_grid_is_all_border() {
        let mut rng = CaveRng::new(3);
        let grid = random_fill(2, 2, 0, &mut rng);
        assert_eq!(grid.count(Tile::Wall), 4);
    }
}
