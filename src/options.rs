//! Pipeline configuration.
//!
//! Every strategy the generator dispatches on is a closed enum selected once
//! up front; the options struct is plain data with serde derives so embedding
//! applications can persist or transmit presets.

use serde::{Deserialize, Serialize};

/// Shape of the carvable envelope stamped onto the grid before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskShape {
    /// Full interior minus a 1-cell border
    Rectangle,
    /// Euclidean disk centered on the grid
    Round,
    /// Two perpendicular bands
    Cross,
    /// Large centered rectangle with generous edge padding
    Keep,
    /// Cellular-automaton cave outline
    Cavernous,
}

/// How rooms are allocated inside the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Rejection sampling against mask and accepted rooms
    Standard,
    /// Scatter freely, then iteratively push overlapping pairs apart
    Relaxation,
    /// Place in one half, mirror across the vertical centerline
    Symmetric,
}

/// Which edges of the room graph get corridors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityStrategy {
    /// Minimum spanning tree only
    Mst,
    /// Spanning tree plus a capped number of random loop edges
    MstLoops,
    /// Every edge of the complete graph
    Full,
}

/// Geometry of an individual carved corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorStyle {
    /// Digital straight line between room centers
    Straight,
    /// One orthogonal bend, axis order chosen per corridor
    LPath,
    /// A* tunneling search with a noise term
    Errant,
}

/// How aggressively corridor dead ends are eroded after routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadEndPolicy {
    /// Leave dead ends alone
    None,
    /// Single pass, each tip erased with 50% probability
    Some,
    /// Re-scan until no degree-1 floor cells remain
    All,
}

/// Full configuration for one generation run.
///
/// `room_count` wins over `room_density` when set. A `seed` makes the run
/// deterministic end-to-end; `None` draws fresh entropy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub seed: Option<u64>,
    pub mask: MaskShape,
    pub room_count: Option<usize>,
    /// Rooms per unit area when no explicit count is given, in `[0, 1]`
    pub room_density: f32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    /// Size skew in `[-1, 1]`: negative favors small rooms, positive large
    pub room_size_bias: f32,
    pub placement: PlacementStrategy,
    pub connectivity: ConnectivityStrategy,
    pub corridor: CorridorStyle,
    /// Extra uniform cost in `[0, n]` added per A* step by the errant style
    pub corridor_noise: i32,
    pub dead_ends: DeadEndPolicy,
    /// Carve up to four corridors from the grid boundary to the nearest floor
    pub peripheral_exits: bool,
    /// Probability in `[0, 1]` that a door candidate is kept
    pub door_density: f32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            seed: None,
            mask: MaskShape::Rectangle,
            room_count: None,
            room_density: 0.5,
            room_min_size: 4,
            room_max_size: 10,
            room_size_bias: 0.0,
            placement: PlacementStrategy::Standard,
            connectivity: ConnectivityStrategy::MstLoops,
            corridor: CorridorStyle::LPath,
            corridor_noise: 3,
            dead_ends: DeadEndPolicy::None,
            peripheral_exits: false,
            door_density: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let opts = GeneratorOptions::default();
        assert!(opts.room_min_size <= opts.room_max_size);
        assert!((0.0..=1.0).contains(&opts.room_density));
        assert!((0.0..=1.0).contains(&opts.door_density));
    }

    #[test]
    fn test_strategy_names_round_trip() {
        let json = serde_json::to_string(&CorridorStyle::LPath).unwrap();
        assert_eq!(json, "\"l_path\"");
        let back: CorridorStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CorridorStyle::LPath);

        let mask: MaskShape = serde_json::from_str("\"cavernous\"").unwrap();
        assert_eq!(mask, MaskShape::Cavernous);
    }
}
