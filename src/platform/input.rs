//! Keyboard polling
//!
//! Browser key events flip entries in a key → pressed map; the frame loop
//! polls the map once per frame to build a [`TickInput`].

use std::collections::HashMap;

use crate::sim::TickInput;

const LEFT: &[&str] = &["arrowleft", "a"];
const RIGHT: &[&str] = &["arrowright", "d"];
const UP: &[&str] = &["arrowup", "w"];
const DOWN: &[&str] = &["arrowdown", "s"];
const START: &[&str] = &[" ", "enter"];
const PAUSE: &[&str] = &["escape", "p"];

/// Held keys plus one-shot requests since the last poll
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashMap<String, bool>,
    start_requested: bool,
    pause_requested: bool,
}

/// Keys the browser would scroll the page with. Only swallow these while
/// the game has focus; a focused text field needs them for editing.
pub fn is_scroll_key(key: &str) -> bool {
    matches!(
        key,
        " " | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
    )
}

fn normalize(key: &str) -> String {
    key.to_ascii_lowercase()
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Auto-repeat does not retrigger one-shots.
    pub fn key_down(&mut self, key: &str) {
        let key = normalize(key);
        let was_down = self.is_pressed(&key);
        if !was_down {
            if START.contains(&key.as_str()) {
                self.start_requested = true;
            }
            if PAUSE.contains(&key.as_str()) {
                self.pause_requested = true;
            }
        }
        self.pressed.insert(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.insert(normalize(key), false);
    }

    /// Forget all held keys (window lost focus, keyups will never arrive)
    pub fn release_all(&mut self) {
        self.pressed.values_mut().for_each(|down| *down = false);
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.get(&normalize(key)).copied().unwrap_or(false)
    }

    fn any_pressed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_pressed(k))
    }

    fn axis(&self, negative: &[&str], positive: &[&str]) -> f32 {
        let mut value = 0.0;
        if self.any_pressed(negative) {
            value -= 1.0;
        }
        if self.any_pressed(positive) {
            value += 1.0;
        }
        value
    }

    /// Queue a start, as from a button click
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// Queue a pause toggle, as from a button click or focus loss
    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    /// Build this frame's input, consuming one-shot requests
    pub fn poll(&mut self) -> TickInput {
        let input = TickInput {
            move_x: self.axis(LEFT, RIGHT),
            move_z: self.axis(UP, DOWN),
            start: self.start_requested,
            pause: self.pause_requested,
        };
        self.start_requested = false;
        self.pause_requested = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_keys() {
        for key in [" ", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"] {
            assert!(is_scroll_key(key), "{:?}", key);
        }
        assert!(!is_scroll_key("a"));
        assert!(!is_scroll_key("Enter"));
    }

    #[test]
    fn test_axes_from_held_keys() {
        let mut kb = KeyboardState::new();
        kb.key_down("ArrowLeft");
        kb.key_down("W");
        let input = kb.poll();
        assert_eq!(input.move_x, -1.0);
        assert_eq!(input.move_z, -1.0);

        // Opposite keys cancel
        kb.key_down("d");
        assert_eq!(kb.poll().move_x, 0.0);

        kb.key_up("arrowleft");
        assert_eq!(kb.poll().move_x, 1.0);
    }

    #[test]
    fn test_one_shots_consumed_by_poll() {
        let mut kb = KeyboardState::new();
        kb.key_down("Escape");
        kb.key_down(" ");
        let first = kb.poll();
        assert!(first.pause && first.start);
        let second = kb.poll();
        assert!(!second.pause && !second.start);
    }

    #[test]
    fn test_auto_repeat_does_not_retrigger() {
        let mut kb = KeyboardState::new();
        kb.key_down("p");
        assert!(kb.poll().pause);
        kb.key_down("p");
        assert!(!kb.poll().pause);
        kb.key_up("p");
        kb.key_down("P");
        assert!(kb.poll().pause);
    }

    #[test]
    fn test_release_all() {
        let mut kb = KeyboardState::new();
        kb.key_down("ArrowRight");
        kb.key_down("s");
        kb.release_all();
        assert_eq!(kb.poll(), TickInput::default());
    }
}
