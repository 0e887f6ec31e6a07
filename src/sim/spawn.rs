//! Spawn timers and placement
//!
//! Obstacles and collectibles run on separate cooldowns. Each spawn resets its
//! cooldown to the level's interval scaled by a random jitter.

use glam::Vec3;
use rand::Rng;

use super::kinds::{COLLECTIBLE_TABLE, EntityKind, OBSTACLE_TABLE, pick_weighted};
use super::state::{Entity, GameState};
use crate::consts::*;

/// Which table a spawn draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Obstacle,
    Collectible,
}

/// Count down both spawn cooldowns and spawn whatever is due
pub fn update_spawns(state: &mut GameState, dt: f32) {
    state.obstacle_cooldown -= dt;
    if state.obstacle_cooldown <= 0.0 {
        spawn_entity(state, SpawnCategory::Obstacle);
        let interval = state.tuning.obstacle_interval(state.level);
        state.obstacle_cooldown = jittered(state, interval);
    }

    state.collectible_cooldown -= dt;
    if state.collectible_cooldown <= 0.0 {
        spawn_entity(state, SpawnCategory::Collectible);
        let interval = state.tuning.collectible_interval(state.level);
        state.collectible_cooldown = jittered(state, interval);
    }
}

/// Spawn one entity upstream at a random lateral offset
pub fn spawn_entity(state: &mut GameState, category: SpawnCategory) -> Option<u32> {
    let draw: f32 = state.rng.random();
    let kind = match category {
        SpawnCategory::Obstacle => pick_weighted(&OBSTACLE_TABLE, draw).map(EntityKind::Obstacle),
        SpawnCategory::Collectible => {
            pick_weighted(&COLLECTIBLE_TABLE, draw).map(EntityKind::Collectible)
        }
    }?;

    let max_x = RIVER_HALF_WIDTH - SPAWN_MARGIN;
    let x = state.rng.random_range(-max_x..=max_x);

    let id = state.next_entity_id();
    state.entities.push(Entity {
        id,
        kind,
        pos: Vec3::new(x, PLAYER_Y, SPAWN_Z),
    });
    log::trace!("Spawned {} #{} at x={:.2}", kind.type_name(), id, x);
    Some(id)
}

fn jittered(state: &mut GameState, interval: f32) -> f32 {
    let jitter = state.tuning.interval_jitter;
    if jitter <= 0.0 {
        return interval;
    }
    interval * state.rng.random_range((1.0 - jitter)..=(1.0 + jitter))
}
