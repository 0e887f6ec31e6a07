//! Data-driven game balance
//!
//! Everything that controls difficulty lives here so it can be tweaked from
//! JSON without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Balance parameters for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a session
    pub start_lives: u8,
    /// Seconds of play per level
    pub level_duration_secs: f32,

    /// River current at level 1 (units/s)
    pub base_speed: f32,
    /// Extra current per level
    pub speed_per_level: f32,
    /// Current never exceeds this
    pub max_speed: f32,

    /// Obstacle spawn interval at level 1 (seconds)
    pub obstacle_interval_secs: f32,
    /// Interval reduction per level
    pub obstacle_interval_step: f32,
    /// Interval floor
    pub min_obstacle_interval_secs: f32,

    /// Collectible spawn interval at level 1 (seconds)
    pub collectible_interval_secs: f32,
    pub collectible_interval_step: f32,
    pub min_collectible_interval_secs: f32,

    /// Spawn intervals are scaled by a random factor in [1 - j, 1 + j]
    pub interval_jitter: f32,

    /// Player/entity distance that counts as contact
    pub collision_distance: f32,
    /// Player swim speed (units/s)
    pub player_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: 3,
            level_duration_secs: 30.0,

            base_speed: 12.0,
            speed_per_level: 2.0,
            max_speed: 30.0,

            obstacle_interval_secs: 1.2,
            obstacle_interval_step: 0.1,
            min_obstacle_interval_secs: 0.4,

            collectible_interval_secs: 2.0,
            collectible_interval_step: 0.1,
            min_collectible_interval_secs: 0.8,

            interval_jitter: 0.25,

            collision_distance: 1.5,
            player_speed: 10.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the game loop
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.start_lives == 0 {
            return Err(invalid("start_lives", "must be at least 1"));
        }
        if self.level_duration_secs <= 0.0 {
            return Err(invalid("level_duration_secs", "must be positive"));
        }
        if self.base_speed <= 0.0 || self.max_speed < self.base_speed {
            return Err(invalid(
                "max_speed",
                format!("must be >= base_speed ({})", self.base_speed),
            ));
        }
        if self.min_obstacle_interval_secs <= 0.0
            || self.obstacle_interval_secs < self.min_obstacle_interval_secs
        {
            return Err(invalid(
                "obstacle_interval_secs",
                "must be >= min_obstacle_interval_secs > 0",
            ));
        }
        if self.min_collectible_interval_secs <= 0.0
            || self.collectible_interval_secs < self.min_collectible_interval_secs
        {
            return Err(invalid(
                "collectible_interval_secs",
                "must be >= min_collectible_interval_secs > 0",
            ));
        }
        if !(0.0..1.0).contains(&self.interval_jitter) {
            return Err(invalid("interval_jitter", "must be in [0, 1)"));
        }
        if self.collision_distance <= 0.0 {
            return Err(invalid("collision_distance", "must be positive"));
        }
        if self.player_speed <= 0.0 {
            return Err(invalid("player_speed", "must be positive"));
        }
        Ok(())
    }

    /// River current for a level (1-based)
    pub fn speed(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.base_speed + self.speed_per_level * steps).min(self.max_speed)
    }

    /// Base obstacle spawn interval for a level, before jitter
    pub fn obstacle_interval(&self, level: u32) -> f32 {
        tightened(
            self.obstacle_interval_secs,
            self.obstacle_interval_step,
            self.min_obstacle_interval_secs,
            level,
        )
    }

    /// Base collectible spawn interval for a level, before jitter
    pub fn collectible_interval(&self, level: u32) -> f32 {
        tightened(
            self.collectible_interval_secs,
            self.collectible_interval_step,
            self.min_collectible_interval_secs,
            level,
        )
    }
}

fn tightened(base: f32, step: f32, min: f32, level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (base - step * steps).max(min)
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_intervals_tighten_and_floor() {
        let t = Tuning::default();
        assert_eq!(t.obstacle_interval(1), 1.2);
        assert!(t.obstacle_interval(2) < t.obstacle_interval(1));
        assert_eq!(t.obstacle_interval(50), t.min_obstacle_interval_secs);
        assert_eq!(t.collectible_interval(100), t.min_collectible_interval_secs);
    }

    #[test]
    fn test_speed_rises_and_caps() {
        let t = Tuning::default();
        assert_eq!(t.speed(1), t.base_speed);
        assert_eq!(t.speed(2), t.base_speed + t.speed_per_level);
        assert_eq!(t.speed(1000), t.max_speed);
        // Level 0 is treated like level 1
        assert_eq!(t.speed(0), t.base_speed);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let t = Tuning::from_json(r#"{ "start_lives": 5, "player_speed": 14.0 }"#).unwrap();
        assert_eq!(t.start_lives, 5);
        assert_eq!(t.player_speed, 14.0);
        assert_eq!(t.base_speed, Tuning::default().base_speed);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "start_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "start_lives", .. }));

        let err = Tuning::from_json(r#"{ "interval_jitter": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "interval_jitter", .. }));

        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
