//! Player/entity contact checks
//!
//! Contact is a plain distance threshold against the player's position. With
//! only a handful of entities alive a brute-force scan is enough.

use glam::Vec3;

use super::state::Entity;

/// True if two points are closer than `threshold`
#[inline]
pub fn within_reach(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

/// IDs of every entity touching the player, in entity order
pub fn find_contacts(player_pos: Vec3, entities: &[Entity], threshold: f32) -> Vec<u32> {
    entities
        .iter()
        .filter(|e| within_reach(player_pos, e.pos, threshold))
        .map(|e| e.id)
        .collect()
}
