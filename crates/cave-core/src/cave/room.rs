//! Rooms and the room connectivity graph
//!
//! Rooms live in an arena and refer to each other by [`RoomId`]. The graph
//! keeps connections symmetric and spreads main-room accessibility through
//! it with an explicit worklist, so deep graphs cannot overflow the stack.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::cmp::Reverse;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::region::Region;
use super::{Coord, Grid};

/// Index of a room in its [`RoomGraph`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct RoomId(pub usize);

/// A surviving open region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub tiles: Vec<Coord>,
    /// Tiles with a wall on at least one cardinal side, each listed once
    pub edge_tiles: Vec<Coord>,
    /// Tile count at construction
    pub size: usize,
    pub connected_rooms: Vec<RoomId>,
    pub is_main_room: bool,
    pub accessible_from_main: bool,
}

impl Room {
    /// Build a room from its tiles and the grid they were extracted from
    pub fn new(id: RoomId, tiles: Vec<Coord>, grid: &Grid) -> Self {
        let edge_tiles = tiles
            .iter()
            .copied()
            .filter(|&c| is_edge_tile(grid, c))
            .collect();
        Self {
            id,
            size: tiles.len(),
            tiles,
            edge_tiles,
            connected_rooms: Vec::new(),
            is_main_room: false,
            accessible_from_main: false,
        }
    }

    pub fn is_connected(&self, other: RoomId) -> bool {
        self.connected_rooms.contains(&other)
    }
}

/// Check if an open tile borders a wall along a row or column
///
/// Diagonal walls do not count. Out-of-grid neighbours count as wall.
pub fn is_edge_tile(grid: &Grid, coord: Coord) -> bool {
    coord
        .cardinal_neighbours()
        .any(|n| grid.is_wall_or_outside(n.x, n.y))
}

/// Arena of rooms plus their connections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    /// Wrap surviving open regions as rooms
    ///
    /// Rooms are ordered by descending size (stable, so ties keep extraction
    /// order); the first becomes the main room and starts accessible.
    pub fn from_regions(mut regions: Vec<Region>, grid: &Grid) -> Self {
        regions.sort_by_key(|region| Reverse(region.len()));

        let mut rooms: Vec<Room> = regions
            .into_iter()
            .enumerate()
            .map(|(i, region)| Room::new(RoomId(i), region.tiles, grid))
            .collect();

        if let Some(main) = rooms.first_mut() {
            main.is_main_room = true;
            main.accessible_from_main = true;
        }

        log::debug!(
            "built {} rooms, main room size {}",
            rooms.len(),
            rooms.first().map_or(0, |r| r.size)
        );
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.is_main_room)
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.rooms.iter().map(|r| r.id)
    }

    pub fn is_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.room(a).is_some_and(|room| room.is_connected(b))
    }

    /// Link two rooms in both directions
    ///
    /// If either side is accessible from the main room, the other side and
    /// everything already linked to it become accessible too. Self-links,
    /// unknown ids and existing links are ignored.
    pub fn connect(&mut self, a: RoomId, b: RoomId) {
        if a == b || a.0 >= self.rooms.len() || b.0 >= self.rooms.len() || self.is_connected(a, b) {
            return;
        }

        if self.rooms[a.0].accessible_from_main {
            self.set_accessible_from_main(b);
        } else if self.rooms[b.0].accessible_from_main {
            self.set_accessible_from_main(a);
        }

        self.rooms[a.0].connected_rooms.push(b);
        self.rooms[b.0].connected_rooms.push(a);
    }

    /// Mark a room and everything transitively linked to it as accessible
    pub fn set_accessible_from_main(&mut self, id: RoomId) {
        let mut worklist = vec![id];
        while let Some(current) = worklist.pop() {
            let Some(room) = self.rooms.get_mut(current.0) else {
                continue;
            };
            if room.accessible_from_main {
                continue;
            }
            room.accessible_from_main = true;
            worklist.extend(room.connected_rooms.iter().copied());
        }
    }

    pub fn all_accessible(&self) -> bool {
        self.rooms.iter().all(|r| r.accessible_from_main)
    }

    pub fn inaccessible_count(&self) -> usize {
        self.rooms.iter().filter(|r| !r.accessible_from_main).count()
    }

    /// Rooms reachable from the main room by walking connections
    pub fn reachable_from_main(&self) -> HashSet<RoomId> {
        let mut seen = HashSet::new();
        let Some(main) = self.main_room() else {
            return seen;
        };

        let mut worklist = vec![main.id];
        seen.insert(main.id);
        while let Some(current) = worklist.pop() {
            for &next in &self.rooms[current.0].connected_rooms {
                if seen.insert(next) {
                    worklist.push(next);
                }
            }
        }
        seen
    }

    /// Check every link is mirrored and no room links to itself
    pub fn is_symmetric(&self) -> bool {
        self.rooms.iter().all(|room| {
            room.connected_rooms.iter().all(|&other| {
                other != room.id && self.room(other).is_some_and(|o| o.is_connected(room.id))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave::region::extract_regions;
    use crate::Tile;

    fn graph_of(rows: &[&str]) -> (Grid, RoomGraph) {
        let grid = Grid::from_rows(rows).unwrap();
        let regions = extract_regions(&grid, Tile::Open);
        let graph = RoomGraph::from_regions(regions, &grid);
        (grid, graph)
    }

    fn room_chain(n: usize) -> RoomGraph {
        let grid = Grid::new(3, 3);
        let rooms: Vec<Room> = (0..n)
            .map(|i| Room::new(RoomId(i), vec![Coord::new(1, 1)], &grid))
            .collect();
        let mut graph = RoomGraph { rooms };
        graph.rooms[0].is_main_room = true;
        graph.rooms[0].accessible_from_main = true;
        graph
    }

    #[test]
    fn test_edge_tiles() {
        let (_, graph) = graph_of(&[
            "#####",
            "#...#",
            "#...#",
            "#...#",
            "#####",
        ]);
        let room = &graph.rooms()[0];
        assert_eq!(room.size, 9);
        // Everything but the centre touches a wall
        assert_eq!(room.edge_tiles.len(), 8);
        assert!(!room.edge_tiles.contains(&Coord::new(2, 2)));
    }

    #[test]
    fn test_diagonal_wall_is_not_edge() {
        let grid = Grid::from_rows(&[
            ".....",
            ".....",
            ".....",
            "...#.",
            ".....",
        ])
        .unwrap();
        assert!(!is_edge_tile(&grid, Coord::new(2, 2)));
        assert!(is_edge_tile(&grid, Coord::new(3, 2)));
        // Out-of-grid neighbours count as wall
        assert!(is_edge_tile(&grid, Coord::new(0, 2)));
    }

    #[test]
    fn test_edge_tiles_listed_once() {
        let (_, graph) = graph_of(&["###", "#.#", "###"]);
        assert_eq!(graph.rooms()[0].edge_tiles, vec![Coord::new(1, 1)]);
    }

    #[test]
    fn test_largest_room_is_main() {
        let (_, graph) = graph_of(&[
            "##########",
            "#..#.....#",
            "#..#.....#",
            "##########",
        ]);
        assert_eq!(graph.len(), 2);
        let main = graph.main_room().unwrap();
        assert_eq!(main.id, RoomId(0));
        assert_eq!(main.size, 10);
        assert!(main.accessible_from_main);
        assert!(!graph.rooms()[1].is_main_room);
        assert!(!graph.rooms()[1].accessible_from_main);
        assert_eq!(graph.rooms().iter().filter(|r| r.is_main_room).count(), 1);
    }

    #[test]
    fn test_equal_sizes_keep_extraction_order() {
        let (_, graph) = graph_of(&[
            "#######",
            "#..#..#",
            "#######",
        ]);
        assert_eq!(graph.rooms()[0].tiles[0], Coord::new(1, 1));
        assert_eq!(graph.rooms()[1].tiles[0], Coord::new(4, 1));
    }

    #[test]
    fn test_empty_graph() {
        let graph = RoomGraph::from_regions(Vec::new(), &Grid::new(3, 3));
        assert!(graph.is_empty());
        assert!(graph.main_room().is_none());
        assert!(graph.all_accessible());
        assert!(graph.reachable_from_main().is_empty());
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut graph = room_chain(3);
        graph.connect(RoomId(1), RoomId(2));
        assert!(graph.is_connected(RoomId(1), RoomId(2)));
        assert!(graph.is_connected(RoomId(2), RoomId(1)));
        assert!(graph.is_symmetric());

        // Duplicates and self links are ignored
        graph.connect(RoomId(2), RoomId(1));
        graph.connect(RoomId(1), RoomId(1));
        assert_eq!(graph.rooms()[1].connected_rooms, vec![RoomId(2)]);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn test_accessibility_propagates_through_existing_links() {
        let mut graph = room_chain(4);
        graph.connect(RoomId(1), RoomId(2));
        graph.connect(RoomId(2), RoomId(3));
        assert_eq!(graph.inaccessible_count(), 3);

        graph.connect(RoomId(3), RoomId(0));
        assert!(graph.all_accessible());
        assert_eq!(graph.reachable_from_main().len(), 4);
    }

    #[test]
    fn test_long_chain_propagation() {
        let n = 50_000;
        let mut graph = room_chain(n);
        for i in 1..n - 1 {
            graph.connect(RoomId(i), RoomId(i + 1));
        }
        assert_eq!(graph.inaccessible_count(), n - 1);
        graph.connect(RoomId(0), RoomId(1));
        assert!(graph.all_accessible());
    }
}
