//! Control sources that produce normalized collector positions
//!
//! Whatever drives the collector (keys, a pose classifier, the demo AI)
//! ends up as a single `x` in [0, 1] handed to `Engine::set_position`.

use crate::clamp_unit;
use crate::sim::collision::overlaps;
use crate::sim::{Item, ItemKind};

/// Default keyboard step per key press (fraction of field width)
pub const KEY_STEP: f32 = 0.05;

/// Horizontal direction of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Accumulates left/right presses into a clamped position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardControl {
    position: f32,
    step: f32,
}

impl Default for KeyboardControl {
    fn default() -> Self {
        Self::new(KEY_STEP)
    }
}

impl KeyboardControl {
    pub fn new(step: f32) -> Self {
        Self {
            position: 0.5,
            step: step.abs(),
        }
    }

    /// Apply one key press and return the new position
    pub fn nudge(&mut self, direction: Direction) -> f32 {
        let delta = match direction {
            Direction::Left => -self.step,
            Direction::Right => self.step,
        };
        self.position = clamp_unit(self.position + delta);
        self.position
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Back to center (on run start)
    pub fn reset(&mut self) {
        self.position = 0.5;
    }
}

/// Demo control source: chases the lowest catchable item, dodging hazards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    position: f32,
    /// Field widths per second
    max_speed: f32,
}

impl Autopilot {
    pub fn new(max_speed: f32) -> Self {
        Self {
            position: 0.5,
            max_speed,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Pick a target x for the current frame
    pub fn target(items: &[Item], collector_width: f32, item_half_width: f32) -> Option<f32> {
        let hazards: Vec<&Item> = items.iter().filter(|i| i.kind == ItemKind::Hazard).collect();

        let mut beneficial: Vec<&Item> = items.iter().filter(|i| i.kind.is_beneficial()).collect();
        // Lowest (closest to the collector) first
        beneficial.sort_by(|a, b| {
            b.vertical_position
                .partial_cmp(&a.vertical_position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        beneficial
            .into_iter()
            .find(|candidate| {
                // Skip targets with a hazard landing first in the same spot
                !hazards.iter().any(|hazard| {
                    hazard.vertical_position > candidate.vertical_position
                        && overlaps(
                            candidate.horizontal_center,
                            collector_width,
                            hazard.horizontal_center,
                            item_half_width,
                        )
                })
            })
            .map(|item| item.horizontal_center)
    }

    /// Move toward the target at bounded speed and return the new position
    pub fn steer(&mut self, items: &[Item], collector_width: f32, item_half_width: f32, dt: f32) -> f32 {
        let target = Self::target(items, collector_width, item_half_width).unwrap_or(0.5);
        let max_delta = self.max_speed * dt.max(0.0);
        let delta = (target - self.position).clamp(-max_delta, max_delta);
        self.position = clamp_unit(self.position + delta);
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ItemKind, x: f32, y: f32) -> Item {
        Item {
            lane: 0,
            horizontal_center: x,
            vertical_position: y,
            kind,
            fall_speed: 0.3,
        }
    }

    #[test]
    fn test_keyboard_accumulates_and_clamps() {
        let mut keys = KeyboardControl::new(0.2);
        assert_eq!(keys.position(), 0.5);
        keys.nudge(Direction::Right);
        let x = keys.nudge(Direction::Right);
        assert!((x - 0.9).abs() < 1e-6);
        assert_eq!(keys.nudge(Direction::Right), 1.0);
        for _ in 0..10 {
            keys.nudge(Direction::Left);
        }
        assert_eq!(keys.position(), 0.0);
        keys.reset();
        assert_eq!(keys.position(), 0.5);
    }

    #[test]
    fn test_autopilot_targets_lowest_beneficial() {
        let items = [
            item(ItemKind::Regular, 0.2, 0.3),
            item(ItemKind::Bonus, 0.8, 0.7),
        ];
        assert_eq!(Autopilot::target(&items, 0.2, 0.04), Some(0.8));
    }

    #[test]
    fn test_autopilot_avoids_hazard_below_target() {
        let items = [
            item(ItemKind::Regular, 0.2, 0.3),
            item(ItemKind::Bonus, 0.8, 0.7),
            item(ItemKind::Hazard, 0.8, 0.8),
        ];
        assert_eq!(Autopilot::target(&items, 0.2, 0.04), Some(0.2));
        assert_eq!(Autopilot::target(&[], 0.2, 0.04), None);
    }

    #[test]
    fn test_autopilot_speed_is_bounded() {
        let mut pilot = Autopilot::new(1.0);
        let items = [item(ItemKind::Regular, 1.0, 0.5)];
        let x = pilot.steer(&items, 0.2, 0.04, 0.1);
        assert!((x - 0.6).abs() < 1e-6);
    }
}
