//! Fixed-timestep frame driver
//!
//! Turns variable animation-frame deltas into whole simulation steps. One-shot
//! keyboard requests are only taken on frames that actually step, so a press
//! landing on a frame with no step waits for the next one.

use super::input::KeyboardState;
use crate::consts::*;
use crate::sim::{GamePhase, GameState, tick};

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    /// Simulation ticks run this frame
    pub steps: u32,
    /// The state went from not running to `Playing`
    pub run_started: bool,
}

/// Accumulates frame time and steps the sim
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    last_phase: GamePhase,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_phase: GamePhase::Ready,
        }
    }

    /// Forget leftover time and phase history (new session)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_phase = GamePhase::Ready;
    }

    /// Ticks owed for a frame of `dt` seconds, at most `MAX_SUBSTEPS`.
    /// Backlog beyond that is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }

    /// Run one animation frame against `state`
    pub fn step(
        &mut self,
        dt: f32,
        keyboard: &mut KeyboardState,
        state: &mut GameState,
    ) -> FrameStep {
        let steps = self.advance(dt);
        if steps > 0 {
            let mut input = keyboard.poll();
            for _ in 0..steps {
                tick(state, &input, SIM_DT);
                // Clear one-shot inputs after processing
                input.start = false;
                input.pause = false;
            }
        }

        let was_running = matches!(self.last_phase, GamePhase::Playing | GamePhase::Paused);
        let run_started = !was_running && state.phase == GamePhase::Playing;
        self.last_phase = state.phase;
        FrameStep { steps, run_started }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    const DT_144HZ: f32 = 1.0 / 144.0;

    fn run_frames(
        clock: &mut FrameClock,
        kb: &mut KeyboardState,
        state: &mut GameState,
        n: u32,
    ) {
        for _ in 0..n {
            clock.step(DT_144HZ, kb, state);
        }
    }

    #[test]
    fn test_advance_counts_whole_steps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(DT_144HZ), 0);
        assert_eq!(clock.advance(DT_144HZ), 0);
        assert_eq!(clock.advance(DT_144HZ), 1);
        // Long frames are clamped and capped
        let mut clock = FrameClock::new();
        assert!(clock.advance(5.0) <= MAX_SUBSTEPS);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_start_press_survives_stepless_frames_at_144hz() {
        for offset in 0..12 {
            let mut state = GameState::new(1, Tuning::default());
            let mut clock = FrameClock::new();
            let mut kb = KeyboardState::new();
            run_frames(&mut clock, &mut kb, &mut state, offset);

            kb.key_down("Enter");
            kb.key_up("Enter");
            run_frames(&mut clock, &mut kb, &mut state, 30);
            assert_eq!(state.phase, GamePhase::Playing, "offset {}", offset);
        }
    }

    #[test]
    fn test_pause_press_survives_stepless_frames_at_144hz() {
        for offset in 0..12 {
            let mut state = GameState::new(1, Tuning::default());
            state.phase = GamePhase::Playing;
            let mut clock = FrameClock::new();
            let mut kb = KeyboardState::new();
            run_frames(&mut clock, &mut kb, &mut state, offset);

            kb.request_pause();
            run_frames(&mut clock, &mut kb, &mut state, 30);
            assert_eq!(state.phase, GamePhase::Paused, "offset {}", offset);
        }
    }

    #[test]
    fn test_run_started_reported_once() {
        let mut state = GameState::new(1, Tuning::default());
        let mut clock = FrameClock::new();
        let mut kb = KeyboardState::new();
        kb.request_start();

        let mut starts = 0;
        for _ in 0..60 {
            if clock.step(DT_144HZ, &mut kb, &mut state).run_started {
                starts += 1;
            }
        }
        assert_eq!(starts, 1);
    }

    #[test]
    fn test_restart_mid_run_reports_new_start() {
        let mut state = GameState::new(1, Tuning::default());
        let mut clock = FrameClock::new();
        let mut kb = KeyboardState::new();
        kb.request_start();
        run_frames(&mut clock, &mut kb, &mut state, 10);
        assert_eq!(state.phase, GamePhase::Playing);

        state.restart(2);
        clock.reset();
        kb.request_start();
        let started = (0..10).any(|_| clock.step(DT_144HZ, &mut kb, &mut state).run_started);
        assert!(started);
    }
}
