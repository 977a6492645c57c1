use cave_core::cave::{extract_regions, process_regions};
use cave_core::{CaveConfig, ConfigError, Coord, Grid, Tile, generate_cave};

fn scenario_config() -> CaveConfig {
    CaveConfig {
        width: 50,
        height: 50,
        seed: "test1".to_string(),
        use_random_seed: false,
        fill_percent: 45,
        smooth_iterations: 5,
        wall_threshold: 50,
        room_threshold: 50,
        process_regions: true,
        ..CaveConfig::default()
    }
}

/// Solid grid with open rectangles carved in
fn grid_with_rooms(width: usize, height: usize, rooms: &[(i32, i32, i32, i32)]) -> Grid {
    let mut grid = Grid::new(width, height);
    for &(x0, y0, w, h) in rooms {
        for x in x0..x0 + w {
            for y in y0..y0 + h {
                grid.set(Coord::new(x, y), Tile::Open);
            }
        }
    }
    grid
}

#[test]
fn test_seeded_cave_is_reproducible() {
    let config = scenario_config();
    let first = generate_cave(&config).unwrap();

    for _ in 0..3 {
        let again = generate_cave(&config).unwrap();
        assert_eq!(again.grid, first.grid);
        assert_eq!(again.grid.values(), first.grid.values());
        assert_eq!(again.passages, first.passages);
    }

    assert_eq!(first.grid.width(), 50);
    assert_eq!(first.grid.height(), 50);
    assert_eq!(first.border_size, 1);
    assert!(first.grid.border_is_solid());
    assert!(first.is_fully_connected());
}

#[test]
fn test_different_seed_changes_cave() {
    let a = generate_cave(&scenario_config()).unwrap();
    let b = generate_cave(&CaveConfig {
        seed: "test2".to_string(),
        ..scenario_config()
    })
    .unwrap();
    assert_ne!(a.grid, b.grid);
}

#[test]
fn test_two_distant_rooms_get_one_passage() {
    let mut grid = grid_with_rooms(30, 30, &[(2, 2, 5, 5), (22, 22, 5, 5)]);
    assert_eq!(extract_regions(&grid, Tile::Open).len(), 2);

    let (rooms, passages) = process_regions(&mut grid, 50, 10, 1);

    assert_eq!(rooms.len(), 2);
    assert_eq!(passages.len(), 1);
    assert!(rooms.rooms().iter().all(|r| r.accessible_from_main));
    assert!(rooms.rooms().iter().all(|r| r.connected_rooms.len() == 1));
    assert!(rooms.is_symmetric());

    // The passage is physically carved
    assert_eq!(extract_regions(&grid, Tile::Open).len(), 1);
    let passage = passages[0];
    assert_eq!(grid.tile(passage.tile_a), Some(Tile::Open));
    assert_eq!(grid.tile(passage.tile_b), Some(Tile::Open));
    // Nearest corners face each other
    assert_eq!(passage.length_squared(), 16 * 16 * 2);
    assert!(grid.border_is_solid());
}

#[test]
fn test_tiny_region_becomes_wall() {
    let mut grid = grid_with_rooms(20, 20, &[(5, 5, 3, 1)]);
    assert_eq!(grid.count(Tile::Open), 3);

    let (rooms, passages) = process_regions(&mut grid, 50, 10, 1);

    assert!(rooms.is_empty());
    assert!(passages.is_empty());
    assert_eq!(grid.count(Tile::Open), 0);
}

#[test]
fn test_main_room_is_largest() {
    let mut grid = grid_with_rooms(
        40,
        20,
        &[(2, 2, 4, 4), (10, 2, 8, 8), (25, 10, 5, 5)],
    );
    let (rooms, passages) = process_regions(&mut grid, 0, 1, 1);

    let main = rooms.main_room().unwrap();
    assert_eq!(main.size, 64);
    assert!(rooms.rooms().iter().all(|r| r.size <= main.size));
    assert!(rooms.all_accessible());
    assert!(passages.len() >= 2);
    assert_eq!(rooms.reachable_from_main().len(), 3);
}

#[test]
fn test_invalid_configs_fail_before_generation() {
    let cases = [
        (
            CaveConfig {
                width: 0,
                ..scenario_config()
            },
            ConfigError::InvalidDimensions { width: 0, height: 50 },
        ),
        (
            CaveConfig {
                fill_percent: 150,
                ..scenario_config()
            },
            ConfigError::FillPercentOutOfRange(150),
        ),
        (
            CaveConfig {
                room_threshold: 48 * 48 + 1,
                ..scenario_config()
            },
            ConfigError::UnsatisfiableRoomThreshold {
                threshold: 48 * 48 + 1,
                interior: 48 * 48,
            },
        ),
    ];

    for (config, expected) in cases {
        assert_eq!(generate_cave(&config), Err(expected));
    }
}

#[test]
fn test_solid_fill_yields_no_rooms() {
    // Full fill leaves nothing open
    let config = CaveConfig {
        width: 20,
        height: 20,
        fill_percent: 100,
        room_threshold: 300,
        ..scenario_config()
    };
    let map = generate_cave(&config).unwrap();
    assert!(map.rooms.is_empty());
    assert!(map.passages.is_empty());
    assert_eq!(map.grid.count(Tile::Open), 0);
}

#[test]
fn test_random_seed_is_reported() {
    let config = CaveConfig {
        use_random_seed: true,
        ..scenario_config()
    };
    let map = generate_cave(&config).unwrap();
    assert_ne!(map.seed, "test1");

    // Replaying the reported seed reproduces the map
    let replay = generate_cave(&CaveConfig {
        seed: map.seed.clone(),
        use_random_seed: false,
        ..scenario_config()
    })
    .unwrap();
    assert_eq!(replay.grid, map.grid);
}

#[test]
fn test_walkable_mask_matches_grid() {
    let map = generate_cave(&scenario_config()).unwrap();
    let mask = map.grid.walkable_mask();
    for coord in map.grid.coords() {
        let walkable = mask[coord.x as usize][coord.y as usize];
        assert_eq!(walkable, map.grid.tile(coord) == Some(Tile::Open));
    }
}
