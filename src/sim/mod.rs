//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Elapsed-time driven, advanced only by the host
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod difficulty;
pub mod engine;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ItemZone, classify, collector_hits_item, crossed_band};
pub use difficulty::level_for_score;
pub use engine::{Engine, GameEndedCallback, ScoreCallback};
pub use spawn::{KindTable, lane_center};
pub use state::{Collector, GamePhase, Item, ItemKind, Remaining, RunState};
pub use tick::{GameEvent, ScoreUpdate, tick};
