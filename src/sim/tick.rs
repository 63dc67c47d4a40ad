//! Per-frame simulation step
//!
//! Advances the run by an elapsed time, in order: countdown, spawn, fall,
//! then boundary resolution (catch before miss). Effects are reported as
//! `GameEvent`s; callers decide how to dispatch them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{ItemZone, classify, collector_hits_item, crossed_band};
use super::difficulty::add_score;
use super::spawn::spawn_item;
use super::state::{GamePhase, ItemKind, Remaining, RunState};
use crate::settings::{EngineConfig, HazardPolicy};

/// Payload of the score-changed notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub score: u64,
    pub level: u32,
    pub remaining: Remaining,
}

impl ScoreUpdate {
    pub fn of(state: &RunState) -> Self {
        Self {
            score: state.score,
            level: state.level,
            remaining: state.remaining,
        }
    }
}

/// Something observable that happened during a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score, level, lives or time changed
    ScoreChanged(ScoreUpdate),
    ItemSpawned { lane: u32, kind: ItemKind },
    ItemCollected { kind: ItemKind, points: u64 },
    ItemMissed { kind: ItemKind },
    LifeLost { lives: u32 },
    LevelUp { level: u32 },
    /// Active -> Inactive; emitted once per run
    GameEnded { score: u64, level: u32 },
}

/// Advance an active run by `dt` seconds. No-op when inactive.
pub fn tick<R: Rng>(
    state: &mut RunState,
    config: &EngineConfig,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if !state.is_active() {
        return;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    // Countdown runs first; an expired clock ends the frame
    if let Remaining::Seconds(secs) = state.remaining {
        if dt > 0.0 {
            let left = (secs - dt).max(0.0);
            state.remaining = Remaining::Seconds(left);
            events.push(GameEvent::ScoreChanged(ScoreUpdate::of(state)));
            if left <= 0.0 {
                end_run(state, events);
                return;
            }
        }
    }

    // At most one spawn per step, no catch-up
    state.spawn_accumulator += dt;
    if state.spawn_accumulator >= state.spawn_interval {
        let item = spawn_item(rng, state, config);
        log::trace!(
            "Spawned {:?} in lane {}/{} at speed {:.3}",
            item.kind,
            item.lane,
            state.lane_count,
            item.fall_speed
        );
        events.push(GameEvent::ItemSpawned {
            lane: item.lane,
            kind: item.kind,
        });
        state.items.push(item);
        state.spawn_accumulator = 0.0;
    }

    let previous: Vec<f32> = state.items.iter().map(|i| i.vertical_position).collect();
    for item in &mut state.items {
        item.fall(dt);
    }

    // Newest to oldest so removal never skips an item
    let mut idx = state.items.len();
    while idx > 0 && state.is_active() {
        idx -= 1;
        let item = &state.items[idx];
        let caught = crossed_band(previous[idx], item.vertical_position, config.collection_zone)
            && collector_hits_item(&state.collector, item, config.item_half_width);
        if caught {
            let item = state.items.remove(idx);
            collect(state, config, item.kind, events);
        } else if classify(item.vertical_position, config.collection_zone) == ItemZone::Missed {
            let item = state.items.remove(idx);
            miss(state, config, item.kind, events);
        }
    }
}

/// Apply the effect of catching an item
fn collect(state: &mut RunState, config: &EngineConfig, kind: ItemKind, events: &mut Vec<GameEvent>) {
    let points = match kind {
        ItemKind::Regular => config.points.regular,
        ItemKind::Bonus => config.points.bonus,
        ItemKind::Hazard => 0,
    };
    events.push(GameEvent::ItemCollected { kind, points });

    if kind == ItemKind::Hazard {
        match config.hazard_policy {
            HazardPolicy::InstantKill => {
                log::debug!("Hazard caught: run over");
                if let Remaining::Lives(_) = state.remaining {
                    state.remaining = Remaining::Lives(0);
                    events.push(GameEvent::ScoreChanged(ScoreUpdate::of(state)));
                }
                end_run(state, events);
            }
            HazardPolicy::CostLife => {
                log::debug!("Hazard caught: costs a life");
                lose_life(state, events);
            }
        }
        return;
    }

    for level in add_score(state, config, points) {
        events.push(GameEvent::LevelUp { level });
    }
    events.push(GameEvent::ScoreChanged(ScoreUpdate::of(state)));
}

/// Apply the effect of an item leaving the field uncaught
fn miss(state: &mut RunState, config: &EngineConfig, kind: ItemKind, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::ItemMissed { kind });
    if kind.is_beneficial() && config.uses_lives() {
        lose_life(state, events);
    }
}

/// Lives mode only: drop a life, end the run at zero
fn lose_life(state: &mut RunState, events: &mut Vec<GameEvent>) {
    let Remaining::Lives(lives) = state.remaining else {
        return;
    };
    let lives = lives.saturating_sub(1);
    state.remaining = Remaining::Lives(lives);
    log::debug!("Life lost, {} left", lives);
    events.push(GameEvent::LifeLost { lives });
    events.push(GameEvent::ScoreChanged(ScoreUpdate::of(state)));
    if lives == 0 {
        end_run(state, events);
    }
}

/// The single Active -> Inactive transition. Returns false if already inactive.
pub fn end_run(state: &mut RunState, events: &mut Vec<GameEvent>) -> bool {
    if !state.is_active() {
        return false;
    }
    state.phase = GamePhase::Inactive;
    log::info!("Run ended: score {} at level {}", state.score, state.level);
    events.push(GameEvent::GameEnded {
        score: state.score,
        level: state.level,
    });
    true
}
