//! Otter River - swim upstream, dodge obstacles, collect treats
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, spawning, collisions, levels)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `leaderboard`: Persisted score table
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod cosmetics;
pub mod error;
pub mod hud;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use cosmetics::Cosmetic;
pub use error::{RenderError, StorageError, TuningError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// World axes: `x` is lateral (across the river), `z` runs along the river
/// with the far end at negative `z` and the camera at positive `z`.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// River half-width (banks sit at +/- this x)
    pub const RIVER_HALF_WIDTH: f32 = 8.0;
    /// Player lateral bound (stays one body-width off the banks)
    pub const PLAYER_MAX_X: f32 = 7.0;
    /// Player forward/back bounds
    pub const PLAYER_MIN_Z: f32 = -6.0;
    pub const PLAYER_MAX_Z: f32 = 4.0;
    /// Player swims at a fixed height
    pub const PLAYER_Y: f32 = 0.5;
    /// Body radius used for drawing the otter
    pub const PLAYER_RADIUS: f32 = 0.8;

    /// Maximum facing yaw when turning (radians)
    pub const MAX_TURN_YAW: f32 = 0.6;
    /// Per-tick interpolation factor toward the target yaw
    pub const TURN_LERP: f32 = 0.15;

    /// Entities appear this far upstream
    pub const SPAWN_Z: f32 = -60.0;
    /// Entities past this z are gone
    pub const DESPAWN_Z: f32 = 12.0;
    /// Keep spawns clear of the banks
    pub const SPAWN_MARGIN: f32 = 1.0;

    /// Seconds the otter flashes after a hit (visual only)
    pub const HIT_FLASH_SECS: f32 = 0.6;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Step `current` toward `target` by `factor` along the shortest arc
#[inline]
pub fn lerp_angle(current: f32, target: f32, factor: f32) -> f32 {
    normalize_angle(current + normalize_angle(target - current) * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        // From just below +π toward just above -π should cross the seam
        let stepped = lerp_angle(PI - 0.1, -PI + 0.1, 0.5);
        assert!(stepped.abs() > PI - 0.01);
    }

    #[test]
    fn test_lerp_angle_converges() {
        let mut yaw = 0.0;
        for _ in 0..200 {
            yaw = lerp_angle(yaw, 0.5, consts::TURN_LERP);
        }
        assert!((yaw - 0.5).abs() < 1e-3);
    }
}
