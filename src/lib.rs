//! Fall Catch - A lane-based falling-item catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring, difficulty)
//! - `settings`: Engine configuration and presets
//! - `platform`: Control sources and browser bindings

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{EngineConfig, HazardPolicy, LanePolicy, Preset, Termination};
pub use sim::{Engine, GameEvent, Item, ItemKind, Remaining, ScoreUpdate};

/// Game configuration constants
pub mod consts {
    /// Host loop timestep used by the native demo (60 Hz)
    pub const HOST_DT: f32 = 1.0 / 60.0;

    /// Bottom edge of the normalized play-field
    pub const FIELD_BOTTOM: f32 = 1.0;

    /// Lane defaults
    pub const INITIAL_LANES: u32 = 3;
    pub const MAX_LANES: u32 = 7;
    /// Hard cap on any configured lane count
    pub const MAX_LANE_LIMIT: u32 = 64;

    /// Collector defaults (fractions of field width)
    pub const COLLECTOR_WIDTH: f32 = 0.2;
    pub const COLLECTOR_MIN_WIDTH: f32 = 0.08;
    pub const COLLECTOR_SHRINK_STEP: f32 = 0.02;

    /// Item defaults
    pub const ITEM_HALF_WIDTH: f32 = 0.04;
    pub const SPAWN_HEIGHT: f32 = -0.05;
    /// Height of the collection band above the bottom edge
    pub const COLLECTION_ZONE: f32 = 0.12;

    /// Fall speed in field heights per second
    pub const BASE_SPEED: f32 = 0.35;
    /// Per-level growth applied to new items' fall speed
    pub const SPEED_GROWTH_RATE: f32 = 0.1;
    /// `base_speed` multiplier applied once per level gained
    pub const LEVEL_SPEED_FACTOR: f32 = 1.15;

    /// Spawn pacing (seconds)
    pub const SPAWN_INTERVAL: f32 = 1.0;
    pub const SPAWN_INTERVAL_FACTOR: f32 = 0.92;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.35;

    /// Scoring
    pub const LEVEL_THRESHOLD: u64 = 1000;
    pub const REGULAR_POINTS: u64 = 100;
    pub const BONUS_POINTS: u64 = 300;
    /// Most levels a single catch may gain
    pub const MAX_LEVELS_PER_CATCH: u64 = 100;

    /// Kind probabilities (remainder is the regular beneficial item)
    pub const HAZARD_CHANCE: f32 = 0.1;
    pub const BONUS_CHANCE: f32 = 0.3;

    /// Run length defaults
    pub const INITIAL_LIVES: u32 = 3;
    pub const TIMER_SECONDS: f32 = 60.0;
}

/// Clamp a horizontal position into the normalized field
#[inline]
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() { 0.5 } else { x.clamp(0.0, 1.0) }
}
