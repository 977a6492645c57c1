//! Cave system
//!
//! Contains the tile grid, the generation stages and the room graph.

mod connect;
mod filter;
mod generation;
mod grid;
mod noise;
mod region;
mod room;
mod smooth;
mod tile;

pub use connect::{Passage, carve_passage, connect_rooms, line};
pub use filter::{filter_room_regions, filter_wall_regions};
pub use generation::{CaveMap, MapSink, generate_cave, process_regions};
pub use grid::{Coord, Grid};
pub use noise::random_fill;
pub use region::{Region, extract_regions};
pub use room::{Room, RoomGraph, RoomId, is_edge_tile};
pub use smooth::{changed_tiles, smooth, smooth_step};
pub use tile::Tile;
