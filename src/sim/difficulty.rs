//! Score-driven difficulty curve
//!
//! Level is a pure function of score. Each level gained speeds items up,
//! may add a lane, narrows the collector and shortens the spawn interval.

use std::ops::RangeInclusive;

use super::state::RunState;
use crate::settings::{EngineConfig, LanePolicy};

/// `floor(score / threshold) + 1`
#[inline]
pub fn level_for_score(score: u64, threshold: u64) -> u32 {
    let tier = score / threshold.max(1);
    u32::try_from(tier).unwrap_or(u32::MAX).saturating_add(1)
}

/// Collector width at `level`, floored at `min_width`
pub fn collector_width_for_level(config: &EngineConfig, level: u32) -> f32 {
    let shrink = level.saturating_sub(1) as f32 * config.width_shrink_step;
    (config.initial_width - shrink).max(config.min_width)
}

/// Spawn interval at `level`, floored at `min_spawn_interval`
pub fn spawn_interval_for_level(config: &EngineConfig, level: u32) -> f32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (config.spawn_interval * config.spawn_interval_factor.powi(exponent))
        .max(config.min_spawn_interval)
}

/// Lane count after reaching `level` from `current`
pub fn lanes_after_level(policy: LanePolicy, current: u32, level: u32) -> u32 {
    match policy {
        LanePolicy::Fixed => current,
        LanePolicy::GrowOnOddLevels { max_lanes } => {
            if level % 2 == 1 && current < max_lanes {
                current + 1
            } else {
                current
            }
        }
    }
}

/// Apply the effects of reaching `level` (one level step)
pub fn apply_level_up(state: &mut RunState, config: &EngineConfig, level: u32) {
    state.base_speed *= config.level_speed_factor;
    state.lane_count = lanes_after_level(config.lane_policy, state.lane_count, level);
    state.collector.width = collector_width_for_level(config, level);
    state.spawn_interval = spawn_interval_for_level(config, level);
}

/// Add points and apply one level-up step per level gained.
///
/// Returns the levels reached, in order (empty when no threshold was crossed).
/// A validated config bounds the range to `MAX_LEVELS_PER_CATCH` per catch.
pub fn add_score(state: &mut RunState, config: &EngineConfig, points: u64) -> RangeInclusive<u32> {
    state.score = state.score.saturating_add(points);
    let new_level = level_for_score(state.score, config.level_threshold);
    if new_level <= state.level {
        return RangeInclusive::new(1, 0);
    }

    let gained = state.level + 1..=new_level;
    for level in gained.clone() {
        apply_level_up(state, config, level);
        log::info!(
            "Level {} reached: speed={:.3}, lanes={}, width={:.3}",
            level,
            state.base_speed,
            state.lane_count,
            state.collector.width
        );
    }
    state.level = new_level;
    gained
}
