//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::find_contacts;
use super::kinds::EntityKind;
use super::spawn::update_spawns;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::lerp_angle;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Lateral axis, -1 (left) to 1 (right)
    pub move_x: f32,
    /// Along-river axis, -1 (upstream) to 1 (downstream)
    pub move_z: f32,
    /// Start a run from the title screen
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Ready => {
            if input.start {
                state.phase = GamePhase::Playing;
                log::info!("Run started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    update_player(state, input, dt);
    update_level(state, dt);
    update_spawns(state, dt);
    advance_entities(state, dt);
    resolve_contacts(state);

    if state.player.hit_flash > 0.0 {
        state.player.hit_flash = (state.player.hit_flash - dt).max(0.0);
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Move by a fixed step along each held axis, clamp, and ease facing
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let speed = state.tuning.player_speed;
    let move_x = input.move_x.clamp(-1.0, 1.0);
    let move_z = input.move_z.clamp(-1.0, 1.0);
    let player = &mut state.player;

    player.pos.x = (player.pos.x + move_x * speed * dt).clamp(-PLAYER_MAX_X, PLAYER_MAX_X);
    player.pos.z = (player.pos.z + move_z * speed * dt).clamp(PLAYER_MIN_Z, PLAYER_MAX_Z);

    // Lean into turns: left is positive yaw
    let target_yaw = -move_x * MAX_TURN_YAW;
    player.yaw = lerp_angle(player.yaw, target_yaw, TURN_LERP);
}

/// Bump the level once enough time has been played in this one
pub fn update_level(state: &mut GameState, dt: f32) {
    state.level_elapsed += dt;
    if state.level_elapsed >= state.tuning.level_duration_secs {
        state.level_elapsed -= state.tuning.level_duration_secs;
        state.level += 1;
        log::info!(
            "Level {} (current {:.1})",
            state.level,
            state.current_speed()
        );
        state.push_event(GameEvent::LevelUp { level: state.level });
    }
}

/// Carry entities downstream and drop the ones that left the screen
pub fn advance_entities(state: &mut GameState, dt: f32) {
    let current = state.current_speed();
    for entity in &mut state.entities {
        entity.pos.z += current * entity.kind.speed_mult() * dt;
    }
    state.entities.retain(|e| e.pos.z <= DESPAWN_Z);
}

/// Score collectibles and charge lives for obstacles the player touches
pub fn resolve_contacts(state: &mut GameState) {
    let contacts = find_contacts(
        state.player.pos,
        &state.entities,
        state.tuning.collision_distance,
    );

    for id in contacts {
        let Some(index) = state.entities.iter().position(|e| e.id == id) else {
            continue;
        };
        let entity = state.entities.remove(index);

        match entity.kind {
            EntityKind::Collectible(kind) => {
                let points = kind.points();
                state.score += u64::from(points);
                state.push_event(GameEvent::Collected { kind, points });
            }
            EntityKind::Obstacle(kind) => {
                state.lives = state.lives.saturating_sub(1);
                state.player.hit_flash = HIT_FLASH_SECS;
                state.push_event(GameEvent::Hit {
                    kind,
                    lives_left: state.lives,
                });
                log::debug!("Hit {} ({} lives left)", kind.as_str(), state.lives);

                if state.lives == 0 {
                    end_game(state);
                    return;
                }
            }
        }
    }
}

fn end_game(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let time_secs = state.elapsed_secs() as u32;
    state.push_event(GameEvent::GameOver {
        score: state.score,
        level: state.level,
        time_secs,
    });
    log::info!(
        "Game over: score {}, level {}, {}s",
        state.score,
        state.level,
        time_secs
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kinds::{CollectibleKind, ObstacleKind};
    use crate::sim::state::Entity;
    use crate::tuning::Tuning;
    use glam::Vec3;
    use proptest::prelude::*;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.phase = GamePhase::Playing;
        state
    }

    fn place(state: &mut GameState, kind: EntityKind, x: f32, z: f32) -> u32 {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind,
            pos: Vec3::new(x, PLAYER_Y, z),
        });
        id
    }

    #[test]
    fn test_tick_ready_to_playing() {
        let mut state = GameState::new(12345, Tuning::default());
        assert_eq!(state.phase, GamePhase::Ready);

        // Tick without start - should stay Ready and not advance time
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing_state(12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        let ticks = state.time_ticks;

        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Time stands still while paused
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        // Unpause
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = playing_state(1);
        let right = TickInput {
            move_x: 1.0,
            ..Default::default()
        };
        tick(&mut state, &right, SIM_DT);
        assert!(state.player.pos.x > 0.0);
        // Leaning right means negative yaw
        assert!(state.player.yaw < 0.0);

        for _ in 0..600 {
            update_player(&mut state, &right, SIM_DT);
        }
        assert_eq!(state.player.pos.x, PLAYER_MAX_X);
        assert_eq!(state.player.pos.y, PLAYER_Y);

        let up = TickInput {
            move_z: -1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            update_player(&mut state, &up, SIM_DT);
        }
        assert_eq!(state.player.pos.z, PLAYER_MIN_Z);
    }

    #[test]
    fn test_yaw_returns_to_neutral() {
        let mut state = playing_state(1);
        state.player.yaw = MAX_TURN_YAW;
        for _ in 0..300 {
            update_player(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player.yaw.abs() < 1e-3);
    }

    #[test]
    fn test_level_up_after_duration() {
        let mut state = playing_state(1);
        let ticks_per_level = (state.tuning.level_duration_secs / SIM_DT).ceil() as u32;
        for _ in 0..ticks_per_level + 1 {
            update_level(&mut state, SIM_DT);
        }
        assert_eq!(state.level, 2);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelUp { level: 2 }]
        );
    }

    #[test]
    fn test_entities_drift_and_despawn() {
        let mut state = playing_state(1);
        let slow = place(
            &mut state,
            EntityKind::Collectible(CollectibleKind::Shell),
            3.0,
            0.0,
        );
        let gone = place(
            &mut state,
            EntityKind::Obstacle(ObstacleKind::Rock),
            3.0,
            DESPAWN_Z - 0.01,
        );
        advance_entities(&mut state, SIM_DT);

        let shell = state.entities.iter().find(|e| e.id == slow).unwrap();
        let expected = state.current_speed() * 0.9 * SIM_DT;
        assert!((shell.pos.z - expected).abs() < 1e-5);
        assert!(state.entities.iter().all(|e| e.id != gone));
    }

    #[test]
    fn test_collect_scores_and_removes() {
        let mut state = playing_state(1);
        place(
            &mut state,
            EntityKind::Collectible(CollectibleKind::GoldenFish),
            0.3,
            0.2,
        );
        resolve_contacts(&mut state);
        assert_eq!(state.score, 100);
        assert!(state.entities.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Collected {
                kind: CollectibleKind::GoldenFish,
                points: 100
            }]
        );
    }

    #[test]
    fn test_obstacle_costs_a_life() {
        let mut state = playing_state(1);
        place(&mut state, EntityKind::Obstacle(ObstacleKind::Log), 0.0, 0.5);
        resolve_contacts(&mut state);
        assert_eq!(state.lives, 2);
        assert!(state.entities.is_empty());
        assert!(state.player.hit_flash > 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut state = playing_state(1);
        state.lives = 1;
        state.score = 40;
        // Two obstacles on top of the player in the same frame
        place(&mut state, EntityKind::Obstacle(ObstacleKind::Rock), 0.0, 0.0);
        place(&mut state, EntityKind::Obstacle(ObstacleKind::Log), 0.1, 0.0);
        resolve_contacts(&mut state);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let overs: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        assert!(matches!(overs[0], GameEvent::GameOver { score: 40, level: 1, .. }));

        // Further ticks are frozen
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = playing_state(99999);
        let mut state2 = playing_state(99999);

        for i in 0..1200 {
            let input = TickInput {
                move_x: ((i / 40) % 3) as f32 - 1.0,
                move_z: ((i / 70) % 3) as f32 - 1.0,
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.entities, state2.entities);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.player, state2.player);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut state = playing_state(5);
        for _ in 0..3000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.time_ticks > 0);
        state.restart(6);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, state.tuning.start_lives);
        assert_eq!(state.level, 1);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::Ready);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (-1.5f32..1.5, -1.5f32..1.5, any::<bool>()).prop_map(|(move_x, move_z, pause)| {
            TickInput {
                move_x,
                move_z,
                start: false,
                pause,
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_player_stays_in_bounds(inputs in prop::collection::vec(arb_input(), 1..400)) {
            let mut state = playing_state(11);
            for input in &inputs {
                tick(&mut state, input, SIM_DT);
                let p = state.player.pos;
                prop_assert!(p.x.abs() <= PLAYER_MAX_X);
                prop_assert!((PLAYER_MIN_Z..=PLAYER_MAX_Z).contains(&p.z));
            }
        }

        #[test]
        fn prop_score_monotonic_and_single_game_over(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..600),
        ) {
            let mut state = playing_state(seed);
            let mut last_score = 0;
            let mut game_overs = 0;
            for input in &inputs {
                tick(&mut state, input, SIM_DT);
                prop_assert!(state.score >= last_score);
                last_score = state.score;
                game_overs += state
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                    .count();
            }
            prop_assert!(game_overs <= 1);
            prop_assert_eq!(game_overs == 1, state.lives == 0);
        }
    }
}
