//! Simulation engine: lifecycle, control input and observers
//!
//! The engine owns the run state, the config and a seeded RNG. Hosts drive it
//! with `update` once per frame and `set_position` whenever a control sample
//! arrives, then read the accessors to draw.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, Item, Remaining, RunState};
use super::tick::{GameEvent, ScoreUpdate, end_run, tick};
use crate::error::ConfigError;
use crate::settings::{EngineConfig, HazardPolicy};

/// Called with the new score, level and remaining lives/time
pub type ScoreCallback = Box<dyn FnMut(ScoreUpdate)>;
/// Called with the final score and level
pub type GameEndedCallback = Box<dyn FnMut(u64, u32)>;

/// Undrained events kept for hosts that poll instead of registering callbacks
pub const MAX_PENDING_EVENTS: usize = 1024;

pub struct Engine {
    config: EngineConfig,
    state: RunState,
    seed: u64,
    rng: Pcg32,
    pending: Vec<GameEvent>,
    on_score_changed: Option<ScoreCallback>,
    on_game_ended: Option<GameEndedCallback>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("seed", &self.seed)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Build an engine from a validated config. The engine starts inactive.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Ok(Self {
            state: RunState::new(&config),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            pending: Vec::new(),
            on_score_changed: None,
            on_game_ended: None,
        })
    }

    /// Register the score/level/lives/time observer (replaces any previous one)
    pub fn on_score_changed(&mut self, callback: impl FnMut(ScoreUpdate) + 'static) {
        self.on_score_changed = Some(Box::new(callback));
    }

    /// Register the end-of-run observer (replaces any previous one)
    pub fn on_game_ended(&mut self, callback: impl FnMut(u64, u32) + 'static) {
        self.on_game_ended = Some(Box::new(callback));
    }

    /// Begin a fresh run. An active run is ended first, so its observers
    /// still see exactly one end notification.
    pub fn start(&mut self) {
        let mut events = Vec::new();
        end_run(&mut self.state, &mut events);

        self.state.reset(&self.config);
        log::info!(
            "Run started: lanes={}, {:?}, hazard={:?}",
            self.state.lane_count,
            self.state.remaining,
            self.config.hazard_policy
        );
        events.push(GameEvent::ScoreChanged(ScoreUpdate::of(&self.state)));
        self.dispatch(events);
    }

    /// End the run. Idempotent: a second call fires nothing.
    pub fn stop(&mut self) {
        let mut events = Vec::new();
        if end_run(&mut self.state, &mut events) {
            self.dispatch(events);
        }
    }

    /// Move the collector (clamped to [0, 1]). Ignored while inactive.
    pub fn set_position(&mut self, x: f32) {
        if self.state.is_active() {
            self.state.collector.set_position(x);
        }
    }

    /// Advance the run by `elapsed_secs`. Ignored while inactive.
    pub fn update(&mut self, elapsed_secs: f32) {
        if !self.state.is_active() {
            return;
        }
        let mut events = Vec::new();
        tick(
            &mut self.state,
            &self.config,
            &mut self.rng,
            elapsed_secs,
            &mut events,
        );
        self.dispatch(events);
    }

    /// Take every event produced since the last drain (oldest first)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    fn dispatch(&mut self, events: Vec<GameEvent>) {
        for event in &events {
            match *event {
                GameEvent::ScoreChanged(update) => {
                    if let Some(callback) = self.on_score_changed.as_mut() {
                        callback(update);
                    }
                }
                GameEvent::GameEnded { score, level } => {
                    if let Some(callback) = self.on_game_ended.as_mut() {
                        callback(score, level);
                    }
                }
                _ => {}
            }
        }

        self.pending.extend(events);
        if self.pending.len() > MAX_PENDING_EVENTS {
            let excess = self.pending.len() - MAX_PENDING_EVENTS;
            self.pending.drain(..excess);
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hazard_policy(&self) -> HazardPolicy {
        self.config.hazard_policy
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn remaining(&self) -> Remaining {
        self.state.remaining
    }

    /// `None` in timer mode
    pub fn lives(&self) -> Option<u32> {
        self.state.lives()
    }

    /// `None` in lives mode
    pub fn time_remaining(&self) -> Option<f32> {
        self.state.time_remaining()
    }

    pub fn collector_position(&self) -> f32 {
        self.state.collector.position
    }

    pub fn collector_width(&self) -> f32 {
        self.state.collector.width
    }

    pub fn lane_count(&self) -> u32 {
        self.state.lane_count
    }

    pub fn base_speed(&self) -> f32 {
        self.state.base_speed
    }

    pub fn spawn_interval(&self) -> f32 {
        self.state.spawn_interval
    }

    /// Falling items, oldest first
    pub fn items(&self) -> &[Item] {
        &self.state.items
    }
}
