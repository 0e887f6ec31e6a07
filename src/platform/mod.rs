//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed-step accumulator)
//! - Input events (keyboard state polled on stepping frames)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod clock;
pub mod input;
pub mod storage;

pub use clock::{FrameClock, FrameStep};
pub use input::{KeyboardState, is_scroll_key};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore};
