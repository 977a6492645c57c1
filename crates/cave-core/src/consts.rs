//! Generation constants and defaults

/// Width of the solid ring handed to the mesh collaborator with each map
pub const BORDER_SIZE: usize = 1;

/// Default map dimensions
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 60;

/// Default seed text
pub const DEFAULT_SEED: &str = "cave";

/// Default wall probability (percent)
pub const DEFAULT_FILL_PERCENT: u32 = 45;

/// Default number of cellular smoothing passes
pub const DEFAULT_SMOOTH_ITERATIONS: u32 = 5;

/// Wall regions smaller than this are opened up
pub const DEFAULT_WALL_THRESHOLD: usize = 50;

/// Open regions smaller than this are filled in
pub const DEFAULT_ROOM_THRESHOLD: usize = 50;

/// Radius carved around each tile of a passage line
pub const DEFAULT_PASSAGE_RADIUS: u32 = 1;

/// Wall neighbour count at which a tile keeps its current value
pub const SMOOTH_PIVOT: usize = 4;
