//! Collector/item collision
//!
//! Collision is a 1-D interval overlap along x. The vertical check is a band
//! just above the bottom edge, swept over the frame's fall so a fast item
//! can't step over it.

use super::state::{Collector, Item};
use crate::consts::FIELD_BOTTOM;

/// Where an item sits relative to the bottom of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemZone {
    /// Still falling above the collection band
    InFlight,
    /// Inside the collection band, eligible for a catch
    Collectable,
    /// Past the bottom edge
    Missed,
}

/// Classify a vertical position against a collection band of height `zone`
pub fn classify(vertical_position: f32, zone: f32) -> ItemZone {
    if vertical_position > FIELD_BOTTOM {
        ItemZone::Missed
    } else if vertical_position >= FIELD_BOTTOM - zone {
        ItemZone::Collectable
    } else {
        ItemZone::InFlight
    }
}

/// Whether a fall from `previous` to `current` touched the collection band
#[inline]
pub fn crossed_band(previous: f32, current: f32, zone: f32) -> bool {
    previous <= FIELD_BOTTOM && current >= FIELD_BOTTOM - zone
}

/// Horizontal overlap test between two centers and their half widths
#[inline]
pub fn overlaps(collector_x: f32, collector_width: f32, item_x: f32, item_half_width: f32) -> bool {
    (collector_x - item_x).abs() < collector_width / 2.0 + item_half_width
}

/// Whether the collector catches `item`
pub fn collector_hits_item(collector: &Collector, item: &Item, item_half_width: f32) -> bool {
    overlaps(
        collector.position,
        collector.width,
        item.horizontal_center,
        item_half_width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ItemKind;

    fn item_at(x: f32) -> Item {
        Item {
            lane: 0,
            horizontal_center: x,
            vertical_position: 0.95,
            kind: ItemKind::Regular,
            fall_speed: 0.3,
        }
    }

    #[test]
    fn test_overlap_within_reach() {
        let collector = Collector {
            position: 0.5,
            width: 0.2,
        };
        // 0.05 < 0.1 + 0.04
        assert!(collector_hits_item(&collector, &item_at(0.55), 0.04));
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(!overlaps(0.0, 0.5, 0.5, 0.25));
        assert!(!overlaps(0.2, 0.2, 0.8, 0.04));
    }

    #[test]
    fn test_zone_classification() {
        assert_eq!(classify(-0.05, 0.1), ItemZone::InFlight);
        assert_eq!(classify(0.85, 0.1), ItemZone::InFlight);
        assert_eq!(classify(0.91, 0.1), ItemZone::Collectable);
        assert_eq!(classify(1.0, 0.1), ItemZone::Collectable);
        assert_eq!(classify(1.0001, 0.1), ItemZone::Missed);
    }

    #[test]
    fn test_band_is_swept_across_the_frame() {
        // Above the band before, past the bottom after
        assert!(crossed_band(0.85, 1.015, 0.12));
        assert!(crossed_band(0.85, 0.9, 0.12));
        assert!(!crossed_band(0.5, 0.85, 0.12));
        assert!(!crossed_band(1.01, 1.2, 0.12));
    }
}
