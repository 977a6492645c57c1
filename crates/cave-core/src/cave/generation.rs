//! Cave generation pipeline
//!
//! noise -> smoothing -> (wall filter -> room filter -> room graph ->
//! connectivity repair) -> finished grid for the mesh collaborator.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use crate::config::CaveConfig;
use crate::consts::BORDER_SIZE;
use crate::error::ConfigError;
use crate::rng::CaveRng;

use super::connect::{Passage, connect_rooms};
use super::filter::{filter_room_regions, filter_wall_regions};
use super::noise::random_fill;
use super::room::{Room, RoomGraph};
use super::smooth::smooth;
use super::{Grid, Tile};

/// Consumer of finished maps, e.g. a mesh builder or a renderer
pub trait MapSink {
    fn receive(&mut self, grid: &Grid, border_size: usize);
}

/// Result of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveMap {
    /// Seed text actually used, so random-seed runs can be replayed
    pub seed: String,
    pub grid: Grid,
    pub border_size: usize,
    pub rooms: RoomGraph,
    pub passages: Vec<Passage>,
}

impl CaveMap {
    /// Pass `(grid, border_size)` to the collaborator
    pub fn hand_off<S: MapSink + ?Sized>(&self, sink: &mut S) {
        sink.receive(&self.grid, self.border_size);
    }

    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.main_room()
    }

    /// Check every room is reachable from the main room
    pub fn is_fully_connected(&self) -> bool {
        self.rooms.all_accessible()
    }
}

/// Filter small regions and connect the surviving rooms
///
/// Walls go first so that removed wall pockets can merge open areas before
/// rooms are extracted. With no surviving rooms the connectivity phase is
/// skipped. After carving, wall regions below `wall_threshold` that no
/// longer reach the border are opened as well.
pub fn process_regions(
    grid: &mut Grid,
    wall_threshold: usize,
    room_threshold: usize,
    passage_radius: u32,
) -> (RoomGraph, Vec<Passage>) {
    filter_wall_regions(grid, wall_threshold);
    let survivors = filter_room_regions(grid, room_threshold);

    let mut graph = RoomGraph::from_regions(survivors, grid);
    if graph.is_empty() {
        log::debug!("no rooms survived filtering");
        return (graph, Vec::new());
    }

    let passages = connect_rooms(&mut graph, grid, passage_radius);

    // Passages can seal off slivers of wall between rooms
    let sealed = filter_wall_regions(grid, wall_threshold);
    if sealed > 0 {
        log::debug!("opened {} wall pockets sealed off by passages", sealed);
    }
    (graph, passages)
}

/// Generate a cave from an explicit configuration
///
/// Fails only if the configuration is invalid; identical configs with
/// random-seed mode off always produce identical maps.
pub fn generate_cave(config: &CaveConfig) -> Result<CaveMap, ConfigError> {
    config.validate()?;
    let seed = config.resolve_seed()?;
    let mut rng = CaveRng::from_seed_text(&seed);

    let grid = random_fill(config.width, config.height, config.fill_percent, &mut rng);
    let mut grid = smooth(grid, config.smooth_iterations);

    let (rooms, passages) = if config.process_regions {
        process_regions(
            &mut grid,
            config.wall_threshold,
            config.room_threshold,
            config.passage_radius,
        )
    } else {
        (RoomGraph::default(), Vec::new())
    };

    log::info!(
        "generated {}x{} cave from seed '{}': {} open tiles, {} rooms, {} passages",
        config.width,
        config.height,
        seed,
        grid.count(Tile::Open),
        rooms.len(),
        passages.len()
    );

    Ok(CaveMap {
        seed,
        grid,
        border_size: BORDER_SIZE,
        rooms,
        passages,
    })
}
