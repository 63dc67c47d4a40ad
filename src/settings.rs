//! Engine configuration and presets
//!
//! Every variant behavior of the game (lanes, termination, hazard handling)
//! is a field here rather than a separate code path.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::spawn::KindTable;

/// How a run ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Termination {
    /// Run ends when lives reach zero
    Lives { initial: u32 },
    /// Run ends when the countdown reaches zero
    Timer { seconds: f32 },
}

impl Default for Termination {
    fn default() -> Self {
        Termination::Lives {
            initial: INITIAL_LIVES,
        }
    }
}

/// What catching a hazard does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardPolicy {
    /// Run ends immediately (lives drop to zero)
    #[default]
    InstantKill,
    /// Hazard costs one life, same as a missed beneficial item
    CostLife,
}

/// How lane count evolves with level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LanePolicy {
    /// Lane count never changes (the classic three-lane layout)
    Fixed,
    /// One extra lane on every odd level reached, up to `max_lanes`
    GrowOnOddLevels { max_lanes: u32 },
}

impl Default for LanePolicy {
    fn default() -> Self {
        LanePolicy::GrowOnOddLevels {
            max_lanes: MAX_LANES,
        }
    }
}

/// Points awarded per beneficial item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub regular: u64,
    pub bonus: u64,
}

impl Default for Points {
    fn default() -> Self {
        Self {
            regular: REGULAR_POINTS,
            bonus: BONUS_POINTS,
        }
    }
}

/// Named configurations matching the deployed game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Three fixed lanes, three lives, hazards end the run
    Classic,
    /// Growing lanes, three lives, hazards cost a life
    #[default]
    Endless,
    /// Growing lanes against a 60 second clock
    Timed,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Endless => "Endless",
            Preset::Timed => "Timed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "lanes" => Some(Preset::Classic),
            "endless" | "lives" => Some(Preset::Endless),
            "timed" | "timer" => Some(Preset::Timed),
            _ => None,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub termination: Termination,
    pub hazard_policy: HazardPolicy,
    pub lane_policy: LanePolicy,
    pub initial_lanes: u32,

    // === Collector ===
    pub initial_width: f32,
    pub min_width: f32,
    pub width_shrink_step: f32,

    // === Falling speed ===
    /// Field heights per second at level 1
    pub base_speed: f32,
    /// Per-level growth applied when an item spawns
    pub speed_growth_rate: f32,
    /// `base_speed` multiplier per level gained
    pub level_speed_factor: f32,

    // === Scoring ===
    pub level_threshold: u64,
    pub points: Points,

    // === Spawning ===
    /// Seconds between spawns at level 1
    pub spawn_interval: f32,
    pub spawn_interval_factor: f32,
    pub min_spawn_interval: f32,
    pub kinds: KindTable,

    // === Geometry (normalized field units) ===
    pub item_half_width: f32,
    pub collection_zone: f32,
    pub spawn_height: f32,

    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            termination: Termination::default(),
            hazard_policy: HazardPolicy::default(),
            lane_policy: LanePolicy::default(),
            initial_lanes: INITIAL_LANES,

            initial_width: COLLECTOR_WIDTH,
            min_width: COLLECTOR_MIN_WIDTH,
            width_shrink_step: COLLECTOR_SHRINK_STEP,

            base_speed: BASE_SPEED,
            speed_growth_rate: SPEED_GROWTH_RATE,
            level_speed_factor: LEVEL_SPEED_FACTOR,

            level_threshold: LEVEL_THRESHOLD,
            points: Points::default(),

            spawn_interval: SPAWN_INTERVAL,
            spawn_interval_factor: SPAWN_INTERVAL_FACTOR,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            kinds: KindTable::default(),

            item_half_width: ITEM_HALF_WIDTH,
            collection_zone: COLLECTION_ZONE,
            spawn_height: SPAWN_HEIGHT,

            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a config from a preset (other fields keep their defaults)
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a preset's mode choices
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Classic => {
                self.lane_policy = LanePolicy::Fixed;
                self.initial_lanes = INITIAL_LANES;
                self.termination = Termination::Lives {
                    initial: INITIAL_LIVES,
                };
                self.hazard_policy = HazardPolicy::InstantKill;
            }
            Preset::Endless => {
                self.lane_policy = LanePolicy::default();
                self.termination = Termination::Lives {
                    initial: INITIAL_LIVES,
                };
                self.hazard_policy = HazardPolicy::CostLife;
            }
            Preset::Timed => {
                self.lane_policy = LanePolicy::default();
                self.termination = Termination::Timer {
                    seconds: TIMER_SECONDS,
                };
                self.hazard_policy = HazardPolicy::InstantKill;
            }
        }
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a preset by name
    pub fn from_preset_name(name: &str) -> Result<Self, ConfigError> {
        Preset::from_str(name)
            .map(Self::from_preset)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    /// Whether the run is lives-based
    pub fn uses_lives(&self) -> bool {
        matches!(self.termination, Termination::Lives { .. })
    }

    /// Reject configs that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_lanes == 0 {
            return Err(ConfigError::NoLanes(self.initial_lanes));
        }
        lane_limit("initial_lanes", self.initial_lanes)?;
        if let LanePolicy::GrowOnOddLevels { max_lanes } = self.lane_policy {
            lane_limit("max_lanes", max_lanes)?;
            if max_lanes < self.initial_lanes {
                return Err(ConfigError::LaneCap {
                    initial: self.initial_lanes,
                    max: max_lanes,
                });
            }
        }

        unit_range("initial_width", self.initial_width)?;
        unit_range("min_width", self.min_width)?;
        unit_range("collection_zone", self.collection_zone)?;
        if self.min_width > self.initial_width {
            return Err(ConfigError::WidthFloor {
                min: self.min_width,
                initial: self.initial_width,
            });
        }

        positive("base_speed", self.base_speed)?;
        positive("level_speed_factor", self.level_speed_factor)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("spawn_interval_factor", self.spawn_interval_factor)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        non_negative("speed_growth_rate", self.speed_growth_rate)?;
        non_negative("width_shrink_step", self.width_shrink_step)?;
        non_negative("item_half_width", self.item_half_width)?;
        if let Termination::Timer { seconds } = self.termination {
            positive("timer seconds", seconds)?;
        }

        if self.level_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        let points = self.points.regular.max(self.points.bonus);
        if points / self.level_threshold > MAX_LEVELS_PER_CATCH {
            return Err(ConfigError::PointsPerLevel {
                points,
                threshold: self.level_threshold,
                max: MAX_LEVELS_PER_CATCH,
            });
        }
        if !self.kinds.is_valid() {
            return Err(ConfigError::KindTable {
                hazard: self.kinds.hazard,
                bonus: self.kinds.bonus,
            });
        }
        if self.spawn_height >= 0.0 || self.spawn_height.is_nan() {
            return Err(ConfigError::SpawnHeight(self.spawn_height));
        }
        Ok(())
    }
}

fn lane_limit(field: &'static str, lanes: u32) -> Result<(), ConfigError> {
    if lanes <= MAX_LANE_LIMIT {
        Ok(())
    } else {
        Err(ConfigError::TooManyLanes {
            field,
            lanes,
            limit: MAX_LANE_LIMIT,
        })
    }
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        for preset in [Preset::Classic, Preset::Endless, Preset::Timed] {
            assert!(EngineConfig::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_str("CLASSIC"), Some(Preset::Classic));
        assert_eq!(Preset::from_str("timer"), Some(Preset::Timed));
        assert_eq!(Preset::from_str("nope"), None);
        assert!(matches!(
            EngineConfig::from_preset_name("nope"),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_classic_preset_is_fixed_three_lanes() {
        let config = EngineConfig::from_preset(Preset::Classic);
        assert_eq!(config.lane_policy, LanePolicy::Fixed);
        assert_eq!(config.initial_lanes, 3);
        assert_eq!(config.hazard_policy, HazardPolicy::InstantKill);
        assert!(config.uses_lives());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(
            r#"{
                "termination": { "mode": "timer", "seconds": 30.0 },
                "hazard_policy": "cost_life",
                "lane_policy": { "kind": "fixed" },
                "level_threshold": 500
            }"#,
        )
        .unwrap();
        assert_eq!(config.termination, Termination::Timer { seconds: 30.0 });
        assert_eq!(config.hazard_policy, HazardPolicy::CostLife);
        assert_eq!(config.lane_policy, LanePolicy::Fixed);
        assert_eq!(config.level_threshold, 500);
        assert_eq!(config.initial_lanes, INITIAL_LANES);
        assert_eq!(config.points, Points::default());
    }

    #[test]
    fn test_json_roundtrip_of_default() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(
            EngineConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = EngineConfig::default();
        config.initial_lanes = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoLanes(0))));

        let mut config = EngineConfig::default();
        config.lane_policy = LanePolicy::GrowOnOddLevels { max_lanes: 2 };
        assert!(matches!(config.validate(), Err(ConfigError::LaneCap { .. })));

        let mut config = EngineConfig::default();
        config.lane_policy = LanePolicy::Fixed;
        config.initial_lanes = 3_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyLanes { field: "initial_lanes", .. })
        ));

        let mut config = EngineConfig::default();
        config.lane_policy = LanePolicy::GrowOnOddLevels {
            max_lanes: MAX_LANE_LIMIT + 1,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyLanes { field: "max_lanes", .. })
        ));

        let mut config = EngineConfig::default();
        config.lane_policy = LanePolicy::Fixed;
        config.initial_lanes = MAX_LANE_LIMIT;
        assert!(config.validate().is_ok());

        let mut config = EngineConfig::default();
        config.level_threshold = 1;
        config.points.bonus = u64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::PointsPerLevel { .. })));

        let mut config = EngineConfig::default();
        config.min_width = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::WidthFloor { .. })));

        let mut config = EngineConfig::default();
        config.initial_width = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { field: "initial_width", .. })
        ));

        let mut config = EngineConfig::default();
        config.base_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "base_speed", .. })
        ));

        let mut config = EngineConfig::default();
        config.termination = Termination::Timer { seconds: -1.0 };
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive { .. })));

        let mut config = EngineConfig::default();
        config.level_threshold = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroThreshold)));

        let mut config = EngineConfig::default();
        config.kinds = KindTable {
            hazard: 0.7,
            bonus: 0.6,
        };
        assert!(matches!(config.validate(), Err(ConfigError::KindTable { .. })));

        let mut config = EngineConfig::default();
        config.spawn_height = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::SpawnHeight(_))));
    }
}
