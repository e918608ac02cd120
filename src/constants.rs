//! Generation constants organized by pipeline stage.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

// =============================================================================
// ROOM PLACEMENT
// =============================================================================

/// Grid-area divisor when deriving a room budget from density
pub const ROOM_BUDGET_AREA_DIVISOR: f32 = 80.0;
/// Lower clamp on a derived room budget
pub const ROOM_BUDGET_MIN: usize = 5;
/// Upper clamp on a derived room budget
pub const ROOM_BUDGET_MAX: usize = 100;
/// Rejection-sampling attempts allowed per budgeted room
pub const PLACEMENT_ATTEMPTS_PER_ROOM: usize = 50;
/// Buffer (in cells) kept clear around every room
pub const ROOM_BUFFER: i32 = 1;
/// Separation passes for the relaxation placement strategy
pub const RELAXATION_PASSES: usize = 50;

// =============================================================================
// ENVELOPE MASK
// =============================================================================

/// Cells shaved off the disk radius for the round envelope
pub const ROUND_RADIUS_MARGIN: f32 = 2.0;
/// Padding between cross-shaped bands and the grid edge
pub const CROSS_EDGE_PADDING: i32 = 2;
/// Padding between the keep envelope and the grid edge
pub const KEEP_EDGE_PADDING: i32 = 4;
/// Initial fill probability for the cavernous envelope
pub const CAVE_FILL_CHANCE: f64 = 0.55;
/// Smoothing iterations for the cavernous envelope
pub const CAVE_SMOOTHING_PASSES: usize = 5;
/// A live cell survives with at least this many live neighbors (of 8)
pub const CAVE_SURVIVE_MIN: usize = 4;
/// A dead cell is born with at least this many live neighbors (of 8)
pub const CAVE_BIRTH_MIN: usize = 5;

// =============================================================================
// CONNECTIVITY
// =============================================================================

/// Acceptance probability per candidate loop edge (mst_loops strategy)
pub const LOOP_EDGE_CHANCE: f64 = 0.3;
/// Minimum number of loop edges allowed by the cap
pub const LOOP_EDGE_MIN: usize = 2;
/// Loop-edge cap as a fraction of room count (cap = rooms / this)
pub const LOOP_EDGE_ROOM_DIVISOR: usize = 5;
/// A* step cost when walking existing floor
pub const TUNNEL_REUSE_COST: i32 = 1;
/// A* step cost when carving new floor
pub const TUNNEL_CARVE_COST: i32 = 5;
/// A* penalty for stepping adjacent to a room that is not an endpoint
pub const TUNNEL_FOREIGN_ROOM_PENALTY: i32 = 50;

// =============================================================================
// DEAD-END PRUNING
// =============================================================================

/// Erasure probability per dead-end cell under the `some` policy
pub const PARTIAL_PRUNE_CHANCE: f64 = 0.5;

// =============================================================================
// WALL GEOMETRY
// =============================================================================

/// Default perpendicular outset pushing wall segments into the wall band,
/// as a fraction of one cell
pub const WALL_OUTSET_DEFAULT: f32 = 0.15;
/// Default pixel size of one grid cell when scaling wall segments
pub const WALL_CELL_SIZE_DEFAULT: f32 = 32.0;
/// Tolerance (in grid units) when merging collinear wall segments
pub const WALL_MERGE_EPSILON: f32 = 1e-3;
