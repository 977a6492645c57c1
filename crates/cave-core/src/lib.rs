//! cave-core: Seeded cave map generation
//!
//! Turns a seed into a fully navigable 2-D cave: random fill, cellular
//! smoothing, region filtering and a connectivity repair pass that carves
//! passages until every room is reachable from the main room.
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! Time-derived seeds and config file loading are gated behind
//! `cfg(feature = "std")`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::borrow::ToOwned;
    pub use alloc::collections::VecDeque;
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod cave;
pub mod config;

mod consts;
mod error;
mod rng;

pub use cave::{
    CaveMap, Coord, Grid, MapSink, Passage, Room, RoomGraph, RoomId, Tile, generate_cave,
};
pub use config::CaveConfig;
pub use consts::*;
pub use error::ConfigError;
pub use rng::{CaveRng, seed_from_text};
