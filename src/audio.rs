//! Sound effects
//!
//! Every effect is a short list of synthesized notes. The note lists are plain
//! data; in the browser they are played through Web Audio oscillators.

use crate::sim::{CollectibleKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Fish or shell picked up
    Collect,
    /// Golden fish picked up
    GoldenCollect,
    /// Otter bumped an obstacle
    Hit,
    /// Level increased
    LevelUp,
    GameOver,
    /// New best score
    HighScore,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
}

/// One oscillator burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Pitch slides here over the note
    pub glide_to: Option<f32>,
    pub wave: Wave,
    /// Seconds after the effect starts
    pub delay: f64,
    /// Seconds until the note has decayed
    pub length: f64,
    /// Peak gain before volume
    pub gain: f32,
}

fn arpeggio(freqs: &[f32], wave: Wave, spacing: f64, length: f64, gain: f32) -> Vec<Note> {
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq)| Note {
            freq,
            glide_to: None,
            wave,
            delay: i as f64 * spacing,
            length,
            gain,
        })
        .collect()
}

impl SoundEffect {
    /// Effect for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Collected {
                kind: CollectibleKind::GoldenFish,
                ..
            } => SoundEffect::GoldenCollect,
            GameEvent::Collected { .. } => SoundEffect::Collect,
            GameEvent::Hit { .. } => SoundEffect::Hit,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
        }
    }

    pub fn notes(self) -> Vec<Note> {
        match self {
            // Splash up
            SoundEffect::Start => vec![Note {
                freq: 200.0,
                glide_to: Some(600.0),
                wave: Wave::Triangle,
                delay: 0.0,
                length: 0.2,
                gain: 0.3,
            }],
            SoundEffect::Collect => arpeggio(&[600.0, 900.0], Wave::Triangle, 0.06, 0.12, 0.25),
            SoundEffect::GoldenCollect => arpeggio(
                &[700.0, 900.0, 1100.0, 1400.0],
                Wave::Triangle,
                0.06,
                0.15,
                0.25,
            ),
            // Dull thump with a rattle on top
            SoundEffect::Hit => vec![
                Note {
                    freq: 150.0,
                    glide_to: Some(50.0),
                    wave: Wave::Sine,
                    delay: 0.0,
                    length: 0.25,
                    gain: 0.6,
                },
                Note {
                    freq: 400.0,
                    glide_to: Some(250.0),
                    wave: Wave::Square,
                    delay: 0.0,
                    length: 0.12,
                    gain: 0.15,
                },
            ],
            SoundEffect::LevelUp => {
                arpeggio(&[400.0, 500.0, 600.0, 800.0], Wave::Triangle, 0.1, 0.4, 0.25)
            }
            SoundEffect::GameOver => {
                arpeggio(&[400.0, 350.0, 300.0, 200.0], Wave::Sine, 0.2, 0.3, 0.3)
            }
            SoundEffect::HighScore => arpeggio(
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                Wave::Triangle,
                0.08,
                0.25,
                0.25,
            ),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{Note, SoundEffect, Wave};
    use crate::settings::Settings;

    fn oscillator_type(wave: Wave) -> OscillatorType {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Triangle => OscillatorType::Triangle,
        }
    }

    /// Plays effects through a shared `AudioContext`
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Not available outside secure contexts
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let defaults = Settings::default();
            Self {
                ctx,
                volume: defaults.master_volume * defaults.sfx_volume,
                muted: defaults.muted,
            }
        }

        /// Pick up volume and mute from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume =
                settings.master_volume.clamp(0.0, 1.0) * settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        /// Browsers keep the context suspended until a user gesture
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.muted || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            for note in effect.notes() {
                if play_note(ctx, &note, self.volume).is_none() {
                    log::debug!("Dropped a note of {:?}", effect);
                }
            }
        }
    }

    fn play_note(ctx: &AudioContext, note: &Note, volume: f32) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(oscillator_type(note.wave));
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = ctx.current_time() + note.delay;
        osc.frequency().set_value_at_time(note.freq, t).ok()?;
        if let Some(to) = note.glide_to {
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + note.length * 0.8)
                .ok()?;
        }
        gain.gain().set_value_at_time(volume * note.gain, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + note.length)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + note.length + 0.05).ok()?;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;

    const ALL: [SoundEffect; 7] = [
        SoundEffect::Start,
        SoundEffect::Collect,
        SoundEffect::GoldenCollect,
        SoundEffect::Hit,
        SoundEffect::LevelUp,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
    ];

    #[test]
    fn test_every_effect_is_audible() {
        for effect in ALL {
            let notes = effect.notes();
            assert!(!notes.is_empty(), "{:?}", effect);
            for note in notes {
                assert!(note.freq > 20.0 && note.gain > 0.0 && note.gain <= 1.0);
                // Exponential ramps can't target zero
                assert!(note.glide_to.is_none_or(|f| f > 0.0));
                assert!(note.length > 0.0);
            }
        }
    }

    #[test]
    fn test_game_over_descends() {
        let freqs: Vec<f32> = SoundEffect::GameOver.notes().iter().map(|n| n.freq).collect();
        assert!(freqs.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_golden_fish_has_its_own_sound() {
        let golden = GameEvent::Collected {
            kind: CollectibleKind::GoldenFish,
            points: 100,
        };
        let fish = GameEvent::Collected {
            kind: CollectibleKind::Fish,
            points: 10,
        };
        assert_eq!(SoundEffect::for_event(&golden), SoundEffect::GoldenCollect);
        assert_eq!(SoundEffect::for_event(&fish), SoundEffect::Collect);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Hit {
                kind: ObstacleKind::Crocodile,
                lives_left: 1
            }),
            SoundEffect::Hit
        );
    }
}
