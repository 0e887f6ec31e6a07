//! Autopilot for headless runs
//!
//! Sidesteps the nearest obstacle coming down the river, otherwise drifts
//! toward the nearest treat. Good enough to exercise the sim, not to win.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// How far upstream the autopilot looks
const LOOKAHEAD: f32 = 20.0;
/// Lateral gap it keeps from obstacles
const CLEARANCE: f32 = 2.5;
/// Ignore lateral offsets smaller than this when chasing a treat
const DEADBAND: f32 = 0.25;

/// Choose this tick's input from the current state
pub fn steer(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let upcoming = |z: f32| z > player.z - LOOKAHEAD && z < player.z + PLAYER_RADIUS;

    let threat = state
        .entities
        .iter()
        .filter(|e| e.kind.is_obstacle() && upcoming(e.pos.z))
        .filter(|e| (e.pos.x - player.x).abs() < CLEARANCE)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

    let move_x = if let Some(obstacle) = threat {
        // Dodge away, unless the bank is in the way
        let away = if obstacle.pos.x >= player.x { -1.0 } else { 1.0 };
        if (player.x + away * CLEARANCE).abs() > PLAYER_MAX_X {
            -away
        } else {
            away
        }
    } else {
        state
            .entities
            .iter()
            .filter(|e| !e.kind.is_obstacle() && upcoming(e.pos.z))
            .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
            .map(|treat| treat.pos.x - player.x)
            .filter(|dx| dx.abs() > DEADBAND)
            .map_or(0.0, f32::signum)
    };

    TickInput {
        move_x,
        move_z: 0.0,
        start: state.phase == GamePhase::Ready,
        pause: false,
    }
}
