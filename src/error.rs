//! Configuration errors
//!
//! The simulation itself never fails at runtime; only building an engine
//! from a config can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lane count must be at least 1 (got {0})")]
    NoLanes(u32),

    #[error("max_lanes ({max}) is below initial_lanes ({initial})")]
    LaneCap { initial: u32, max: u32 },

    #[error("{field} ({lanes}) exceeds the lane limit of {limit}")]
    TooManyLanes {
        field: &'static str,
        lanes: u32,
        limit: u32,
    },

    #[error("{points} points per catch crosses more than {max} levels at threshold {threshold}")]
    PointsPerLevel { points: u64, threshold: u64, max: u64 },

    #[error("{field} must be in (0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("min_width ({min}) exceeds initial_width ({initial})")]
    WidthFloor { min: f32, initial: f32 },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("level_threshold must be positive")]
    ZeroThreshold,

    #[error("kind probabilities must each be in [0, 1] and sum to at most 1 (hazard {hazard}, bonus {bonus})")]
    KindTable { hazard: f32, bonus: f32 },

    #[error("spawn_height must be above the field (negative, got {0})")]
    SpawnHeight(f32),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}
