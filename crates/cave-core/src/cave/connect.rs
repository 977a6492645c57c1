//! Room connection and passage carving
//!
//! Implements the two-phase greedy repair:
//! 1. Every room without connections links to its nearest other room
//! 2. The nearest (inaccessible, accessible) pair is linked, repeatedly,
//!    until every room is reachable from the main room
//!
//! Distances are squared euclidean distances between edge tiles. Ties go to
//! the first pair found in room order, then edge-tile order.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::room::{Room, RoomGraph, RoomId};
use super::{Coord, Grid, Tile};

/// A carved link between two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub room_a: RoomId,
    pub room_b: RoomId,
    /// Edge tile of `room_a` the passage starts from
    pub tile_a: Coord,
    /// Edge tile of `room_b` the passage ends at
    pub tile_b: Coord,
}

impl Passage {
    pub fn length_squared(&self) -> i64 {
        self.tile_a.distance_squared(self.tile_b)
    }
}

/// Best pair found so far during a search
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: i64,
    passage: Passage,
}

/// Fold every edge-tile pair of two rooms into `best`
///
/// Only a strictly shorter distance replaces the current candidate.
fn consider_pair(room_a: &Room, room_b: &Room, best: &mut Option<Candidate>) {
    for &tile_a in &room_a.edge_tiles {
        for &tile_b in &room_b.edge_tiles {
            let distance = tile_a.distance_squared(tile_b);
            if best.is_none_or(|b| distance < b.distance) {
                *best = Some(Candidate {
                    distance,
                    passage: Passage {
                        room_a: room_a.id,
                        room_b: room_b.id,
                        tile_a,
                        tile_b,
                    },
                });
            }
        }
    }
}

/// Nearest room to `room` that it is not already linked to
fn nearest_unlinked(graph: &RoomGraph, room: &Room) -> Option<Candidate> {
    let mut best = None;
    for other in graph.rooms() {
        if other.id == room.id || room.is_connected(other.id) {
            continue;
        }
        consider_pair(room, other, &mut best);
    }
    best
}

/// Nearest pair with one room inaccessible and the other accessible
fn nearest_accessibility_bridge(graph: &RoomGraph) -> Option<Candidate> {
    let (accessible, inaccessible): (Vec<&Room>, Vec<&Room>) =
        graph.rooms().iter().partition(|r| r.accessible_from_main);

    let mut best = None;
    for room_a in &inaccessible {
        for room_b in &accessible {
            if room_a.is_connected(room_b.id) {
                continue;
            }
            consider_pair(room_a, room_b, &mut best);
        }
    }
    best
}

/// Tiles on a straight line between two points, both ends included
///
/// Steps along the longer axis and accumulates the shorter one, so every
/// consecutive pair of tiles touches.
pub fn line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let inverted = dx.abs() < dy.abs();
    let (longest, shortest, step, gradient_step) = if inverted {
        (dy.abs(), dx.abs(), dy.signum(), dx.signum())
    } else {
        (dx.abs(), dy.abs(), dx.signum(), dy.signum())
    };

    let mut tiles = Vec::with_capacity(longest as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut accumulation = longest / 2;

    for _ in 0..=longest {
        tiles.push(Coord::new(x, y));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        accumulation += shortest;
        if accumulation >= longest && longest > 0 {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
    }

    tiles
}

/// Open a disc of `radius` around `centre`, leaving the outer ring intact
fn open_disc(grid: &mut Grid, centre: Coord, radius: i32) -> usize {
    let mut opened = 0;
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let coord = Coord::new(centre.x + dx, centre.y + dy);
            if grid.is_border(coord) || grid.tile(coord) != Some(Tile::Wall) {
                continue;
            }
            grid.set(coord, Tile::Open);
            opened += 1;
        }
    }
    opened
}

/// Carve a straight passage between two tiles
///
/// Every tile on the line, plus a disc of `radius` around each, becomes
/// open. Returns the number of wall tiles opened.
pub fn carve_passage(grid: &mut Grid, from: Coord, to: Coord, radius: u32) -> usize {
    let radius = radius as i32;
    line(from, to)
        .into_iter()
        .map(|tile| open_disc(grid, tile, radius))
        .sum()
}

/// Carve the candidate into the grid, link its rooms and record it
fn create_passage(
    graph: &mut RoomGraph,
    grid: &mut Grid,
    candidate: Candidate,
    radius: u32,
    passages: &mut Vec<Passage>,
) {
    let passage = candidate.passage;
    let opened = carve_passage(grid, passage.tile_a, passage.tile_b, radius);
    graph.connect(passage.room_a, passage.room_b);
    log::debug!(
        "passage {:?} -> {:?} from ({}, {}) to ({}, {}), {} tiles opened",
        passage.room_a,
        passage.room_b,
        passage.tile_a.x,
        passage.tile_a.y,
        passage.tile_b.x,
        passage.tile_b.y,
        opened
    );
    passages.push(passage);
}

/// Connect every room to the main room, carving passages as needed
///
/// Returns the passages in creation order. An empty graph or a single room
/// needs nothing.
pub fn connect_rooms(graph: &mut RoomGraph, grid: &mut Grid, passage_radius: u32) -> Vec<Passage> {
    let mut passages = Vec::new();
    if graph.is_empty() {
        return passages;
    }

    // Phase 1: rooms with no links reach for their nearest neighbour
    let ids: Vec<RoomId> = graph.ids().collect();
    for id in ids {
        let Some(room) = graph.room(id) else {
            continue;
        };
        if !room.connected_rooms.is_empty() {
            continue;
        }
        if let Some(candidate) = nearest_unlinked(graph, room) {
            create_passage(graph, grid, candidate, passage_radius, &mut passages);
        }
    }
    log::debug!("nearest-neighbour pass made {} passages", passages.len());

    // Phase 2: bridge the accessible and inaccessible sets until one is empty
    while !graph.all_accessible() {
        let Some(candidate) = nearest_accessibility_bridge(graph) else {
            log::warn!(
                "{} rooms cannot be connected to the main room",
                graph.inaccessible_count()
            );
            break;
        };
        create_passage(graph, grid, candidate, passage_radius, &mut passages);
    }

    passages
}
