//! Item spawning policy
//!
//! Lane is uniform over the current lane count, kind comes from a cumulative
//! probability table, and fall speed scales with level.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Item, ItemKind, RunState};
use crate::consts::{BONUS_CHANCE, HAZARD_CHANCE};
use crate::settings::EngineConfig;

/// Cumulative kind probabilities; whatever is left over spawns `Regular`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindTable {
    pub hazard: f32,
    pub bonus: f32,
}

impl Default for KindTable {
    fn default() -> Self {
        Self {
            hazard: HAZARD_CHANCE,
            bonus: BONUS_CHANCE,
        }
    }
}

impl KindTable {
    pub fn is_valid(&self) -> bool {
        let in_unit = |p: f32| (0.0..=1.0).contains(&p);
        in_unit(self.hazard) && in_unit(self.bonus) && self.hazard + self.bonus <= 1.0 + 1e-6
    }

    /// Map a uniform roll in [0, 1) to a kind
    pub fn pick(&self, roll: f32) -> ItemKind {
        if roll < self.hazard {
            ItemKind::Hazard
        } else if roll < self.hazard + self.bonus {
            ItemKind::Bonus
        } else {
            ItemKind::Regular
        }
    }
}

/// Normalized center of `lane` out of `lane_count`
#[inline]
pub fn lane_center(lane: u32, lane_count: u32) -> f32 {
    ((2.0 * lane as f64 + 1.0) / (2.0 * lane_count.max(1) as f64)) as f32
}

/// Fall speed for an item spawned at `level`
#[inline]
pub fn fall_speed(base_speed: f32, level: u32, growth_rate: f32) -> f32 {
    base_speed * (1.0 + level.saturating_sub(1) as f32 * growth_rate)
}

/// Build a new item for the current state
pub fn spawn_item<R: Rng>(rng: &mut R, state: &RunState, config: &EngineConfig) -> Item {
    let lane_count = state.lane_count.max(1);
    let lane = rng.random_range(0..lane_count);
    let kind = config.kinds.pick(rng.random::<f32>());

    Item {
        lane,
        horizontal_center: lane_center(lane, lane_count),
        vertical_position: config.spawn_height,
        kind,
        fall_speed: fall_speed(state.base_speed, state.level, config.speed_growth_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_lane_center_first_of_three() {
        assert!((lane_center(0, 3) - 1.0 / 6.0).abs() < 1e-6);
        assert!((lane_center(0, 3) - 0.1667).abs() < 1e-4);
        assert!((lane_center(1, 3) - 0.5).abs() < 1e-6);
        assert!((lane_center(2, 3) - 5.0 / 6.0).abs() < 1e-6);
        assert!((lane_center(0, 1) - 0.5).abs() < 1e-6);
        let last = lane_center(u32::MAX - 1, u32::MAX);
        assert!(last > 0.99 && last <= 1.0);
    }

    #[test]
    fn test_kind_table_boundaries() {
        let table = KindTable::default();
        assert_eq!(table.pick(0.0), ItemKind::Hazard);
        assert_eq!(table.pick(0.09), ItemKind::Hazard);
        assert_eq!(table.pick(0.1), ItemKind::Bonus);
        assert_eq!(table.pick(0.39), ItemKind::Bonus);
        assert_eq!(table.pick(0.4), ItemKind::Regular);
        assert_eq!(table.pick(0.999), ItemKind::Regular);
    }

    #[test]
    fn test_kind_table_distribution() {
        let table = KindTable::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match table.pick(rng.random::<f32>()) {
                ItemKind::Hazard => counts[0] += 1,
                ItemKind::Bonus => counts[1] += 1,
                ItemKind::Regular => counts[2] += 1,
            }
        }
        assert!((800..1200).contains(&counts[0]), "hazards: {}", counts[0]);
        assert!((2700..3300).contains(&counts[1]), "bonus: {}", counts[1]);
        assert!((5600..6400).contains(&counts[2]), "regular: {}", counts[2]);
    }

    #[test]
    fn test_fall_speed_scales_with_level() {
        assert_eq!(fall_speed(0.5, 1, 0.1), 0.5);
        assert!((fall_speed(0.5, 3, 0.1) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_spawned_item_stays_in_lane_bounds() {
        let config = EngineConfig::default();
        let mut state = RunState::new(&config);
        state.lane_count = 5;
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let item = spawn_item(&mut rng, &state, &config);
            assert!(item.lane < 5);
            assert!((0.0..=1.0).contains(&item.horizontal_center));
            assert_eq!(item.vertical_position, config.spawn_height);
            assert!(item.fall_speed > 0.0);
        }
    }
}
