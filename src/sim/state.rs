//! Run state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here.

use serde::{Deserialize, Serialize};

use crate::clamp_unit;
use crate::settings::{EngineConfig, Termination};

/// Lifecycle phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, or after the run ended
    #[default]
    Inactive,
    /// Between `start` and termination
    Active,
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Common beneficial item
    Regular,
    /// Rarer beneficial item worth more points
    Bonus,
    /// Penalizes or ends the run when caught
    Hazard,
}

impl ItemKind {
    pub fn is_beneficial(&self) -> bool {
        !matches!(self, ItemKind::Hazard)
    }
}

/// A falling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Lane chosen at spawn
    pub lane: u32,
    /// Normalized x of the lane center at spawn time (never migrates)
    pub horizontal_center: f32,
    /// Normalized y; negative while above the field
    pub vertical_position: f32,
    pub kind: ItemKind,
    /// Field heights per second
    pub fall_speed: f32,
}

impl Item {
    /// Advance by `fall_speed * dt`
    pub fn fall(&mut self, dt: f32) {
        self.vertical_position += self.fall_speed * dt;
    }
}

/// The player-controlled collector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    /// Normalized horizontal center
    pub position: f32,
    /// Width as a fraction of the field
    pub width: f32,
}

impl Collector {
    pub fn new(width: f32) -> Self {
        Self {
            position: 0.5,
            width,
        }
    }

    pub fn set_position(&mut self, x: f32) {
        self.position = clamp_unit(x);
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// What remains of the run: lives or seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Remaining {
    Lives(u32),
    Seconds(f32),
}

impl Remaining {
    pub fn lives(&self) -> Option<u32> {
        match *self {
            Remaining::Lives(lives) => Some(lives),
            Remaining::Seconds(_) => None,
        }
    }

    pub fn seconds(&self) -> Option<f32> {
        match *self {
            Remaining::Seconds(secs) => Some(secs),
            Remaining::Lives(_) => None,
        }
    }

    /// Nothing left: the run must end
    pub fn is_exhausted(&self) -> bool {
        match *self {
            Remaining::Lives(lives) => lives == 0,
            Remaining::Seconds(secs) => secs <= 0.0,
        }
    }
}

impl From<Termination> for Remaining {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::Lives { initial } => Remaining::Lives(initial),
            Termination::Timer { seconds } => Remaining::Seconds(seconds),
        }
    }
}

/// Complete run state, reset on every start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: u64,
    /// Always `level_for_score(score)`
    pub level: u32,
    pub remaining: Remaining,
    pub collector: Collector,
    pub lane_count: u32,
    /// Current `base_speed`, grows with each level gained
    pub base_speed: f32,
    /// Seconds between spawns at the current level
    pub spawn_interval: f32,
    /// Seconds since the last spawn
    pub spawn_accumulator: f32,
    /// Oldest first
    pub items: Vec<Item>,
}

impl RunState {
    /// Fresh (inactive) state built from config
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            phase: GamePhase::Inactive,
            score: 0,
            level: 1,
            remaining: config.termination.into(),
            collector: Collector::new(config.initial_width),
            lane_count: config.initial_lanes,
            base_speed: config.base_speed,
            spawn_interval: config.spawn_interval,
            spawn_accumulator: 0.0,
            items: Vec::new(),
        }
    }

    /// Reset to a new active run
    pub fn reset(&mut self, config: &EngineConfig) {
        *self = Self::new(config);
        self.phase = GamePhase::Active;
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn lives(&self) -> Option<u32> {
        self.remaining.lives()
    }

    pub fn time_remaining(&self) -> Option<f32> {
        self.remaining.seconds()
    }
}
