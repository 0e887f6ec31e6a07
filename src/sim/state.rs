//! Game state and core simulation types

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::kinds::{CollectibleKind, EntityKind, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// The otter
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// World position; `y` stays at `PLAYER_Y`
    pub pos: Vec3,
    /// Facing yaw (radians, 0 = upstream)
    pub yaw: f32,
    /// Seconds left on the hit flash
    pub hit_flash: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_Y, 0.0),
            yaw: 0.0,
            hit_flash: 0.0,
        }
    }
}

impl Player {
    /// Position on the ground plane
    pub fn ground_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.z)
    }
}

/// A spawned obstacle or collectible
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec3,
}

/// Something the front end should react to (sound, HUD, leaderboard)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Collected {
        kind: CollectibleKind,
        points: u32,
    },
    Hit {
        kind: ObstacleKind,
        lives_left: u8,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        score: u64,
        level: u32,
        time_secs: u32,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Balance parameters
    pub tuning: Tuning,
    pub player: Player,
    /// Player lives
    pub lives: u8,
    /// Score
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation ticks spent playing
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Active obstacles and collectibles (sorted by id)
    pub entities: Vec<Entity>,
    /// Seconds until the next obstacle spawn
    pub obstacle_cooldown: f32,
    /// Seconds until the next collectible spawn
    pub collectible_cooldown: f32,
    /// Seconds played in the current level
    pub level_elapsed: f32,
    /// Events not yet handed to the front end
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.start_lives,
            score: 0,
            level: 1,
            time_ticks: 0,
            phase: GamePhase::Ready,
            player: Player::default(),
            entities: Vec::new(),
            // First spawns come after one full interval
            obstacle_cooldown: tuning.obstacle_interval(1),
            collectible_cooldown: tuning.collectible_interval(1),
            level_elapsed: 0.0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Reset to a fresh session, keeping the tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(seed, tuning);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Elapsed play time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// River current at the current level
    pub fn current_speed(&self) -> f32 {
        self.tuning.speed(self.level)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}
