//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod kinds;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use collision::{find_contacts, within_reach};
pub use kinds::{
    COLLECTIBLE_TABLE, CollectibleKind, EntityKind, KindSpec, OBSTACLE_TABLE, ObstacleKind,
    pick_weighted,
};
pub use spawn::{SpawnCategory, spawn_entity, update_spawns};
pub use state::{Entity, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
