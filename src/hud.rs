//! HUD text
//!
//! Pure formatting of the values the page shows; the wasm front end writes
//! these into the DOM.

use crate::sim::{GamePhase, GameState};

/// Text for every HUD field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: String,
    pub lives: String,
    pub level: String,
    pub timer: String,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score.to_string(),
            lives: state.lives.to_string(),
            level: state.level.to_string(),
            timer: format_time(state.elapsed_secs() as u32),
            phase: state.phase,
        }
    }
}

/// `m:ss`, minutes unbounded
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::tuning::Tuning;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(61), "1:01");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn test_snapshot() {
        let mut state = GameState::new(1, Tuning::default());
        state.score = 135;
        state.level = 4;
        state.time_ticks = (125.0 / SIM_DT) as u64 + 1;
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.score, "135");
        assert_eq!(hud.lives, "3");
        assert_eq!(hud.level, "4");
        assert_eq!(hud.timer, "2:05");
        assert_eq!(hud.phase, GamePhase::Ready);
    }
}
