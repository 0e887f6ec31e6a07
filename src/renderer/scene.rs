//! Scene building
//!
//! Turns a `GameState` into a flat triangle list in view space: a top-down
//! look at the river where view `x` is world `x` and view `y` is `-z`, so
//! upstream is up the screen.

use glam::{Vec2, Vec3};

use super::shapes::{arrow, circle, rect, ring};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::cosmetics::Cosmetic;
use crate::settings::Settings;
use crate::sim::{EntityKind, GameState};

/// Visible window in world units
pub const VIEW_HALF_WIDTH: f32 = RIVER_HALF_WIDTH + 2.0;
pub const VIEW_NEAR_Z: f32 = 8.0;
pub const VIEW_FAR_Z: f32 = -40.0;

/// Entity radius before the table scale
const ENTITY_BASE_RADIUS: f32 = 0.6;
const RIPPLE_SPACING: f32 = 6.0;
const SEGMENTS: u32 = 20;

/// Center and half-extent of the visible window in view space
pub fn view_bounds() -> (Vec2, Vec2) {
    let center = Vec2::new(0.0, -(VIEW_NEAR_Z + VIEW_FAR_Z) / 2.0);
    let half = Vec2::new(VIEW_HALF_WIDTH, (VIEW_NEAR_Z - VIEW_FAR_Z) / 2.0);
    (center, half)
}

/// World position to view space
#[inline]
pub fn world_to_view(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, -pos.z)
}

fn in_view(p: Vec2, margin: f32) -> bool {
    let (center, half) = view_bounds();
    let d = (p - center).abs();
    d.x <= half.x + margin && d.y <= half.y + margin
}

/// Build every triangle for one frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);
    let (center, half) = view_bounds();
    let top = center.y + half.y;
    let bottom = center.y - half.y;

    // River and banks
    vertices.extend(rect(
        Vec2::new(-VIEW_HALF_WIDTH, bottom),
        Vec2::new(-RIVER_HALF_WIDTH, top),
        colors::BANK,
    ));
    vertices.extend(rect(
        Vec2::new(RIVER_HALF_WIDTH, bottom),
        Vec2::new(VIEW_HALF_WIDTH, top),
        colors::BANK,
    ));
    vertices.extend(rect(
        Vec2::new(-RIVER_HALF_WIDTH, bottom),
        Vec2::new(RIVER_HALF_WIDTH, top),
        colors::WATER,
    ));

    // Ripples drift with the current so the river reads as moving
    let flow = (state.elapsed_secs() * state.current_speed()) % RIPPLE_SPACING;
    let mut y = bottom - flow + RIPPLE_SPACING;
    let mut row = 0;
    while y < top {
        let offset = if row % 2 == 0 { -3.0 } else { 2.5 };
        for x in [-5.0, 0.0, 5.0] {
            let cx: f32 = x + offset;
            if cx.abs() < RIVER_HALF_WIDTH - 0.5 {
                vertices.extend(rect(
                    Vec2::new(cx - 0.8, y - 0.05),
                    Vec2::new(cx + 0.8, y + 0.05),
                    colors::RIPPLE,
                ));
            }
        }
        y += RIPPLE_SPACING;
        row += 1;
    }

    for entity in &state.entities {
        let p = world_to_view(entity.pos);
        let radius = ENTITY_BASE_RADIUS * entity.kind.scale();
        if !in_view(p, radius) {
            continue;
        }
        vertices.extend(circle(p + Vec2::new(0.15, -0.15), radius, colors::SHADOW, SEGMENTS));
        vertices.extend(circle(p, radius, colors::rgb(entity.kind.color()), SEGMENTS));
        if let EntityKind::Collectible(_) = entity.kind {
            vertices.extend(ring(p, radius, radius + 0.12, [1.0, 1.0, 1.0, 0.6], SEGMENTS));
        }
    }

    push_otter(&mut vertices, state, settings);

    vertices
}

fn push_otter(vertices: &mut Vec<Vertex>, state: &GameState, settings: &Settings) {
    let player = &state.player;
    let p = world_to_view(player.pos);
    // Yaw turns the facing away from straight upstream (+y); positive is left
    let facing = Vec2::new(-player.yaw.sin(), player.yaw.cos());

    let flashing = player.hit_flash > 0.0
        && settings.effective_hit_flash()
        && ((player.hit_flash * 10.0) as i32) % 2 == 0;
    let body = if flashing {
        colors::OTTER_HIT
    } else {
        colors::OTTER
    };

    vertices.extend(circle(p + Vec2::new(0.2, -0.2), PLAYER_RADIUS, colors::SHADOW, SEGMENTS));
    vertices.extend(circle(p - facing * 0.5, PLAYER_RADIUS * 0.7, body, SEGMENTS));
    vertices.extend(circle(p, PLAYER_RADIUS, body, SEGMENTS));
    vertices.extend(circle(p, PLAYER_RADIUS * 0.55, colors::OTTER_BELLY, SEGMENTS));
    vertices.extend(arrow(p + facing * PLAYER_RADIUS * 0.6, facing, 0.7, 0.35, body));

    if let Some(cosmetic) = settings.cosmetic {
        let head = p + facing * PLAYER_RADIUS * 0.9;
        let color = colors::rgb(cosmetic.color());
        match cosmetic {
            Cosmetic::PartyHat => vertices.extend(arrow(head, facing, 0.6, 0.25, color)),
            Cosmetic::Sunglasses => {
                let side = Vec2::new(-facing.y, facing.x) * 0.25;
                vertices.extend(circle(head + side, 0.15, color, 10));
                vertices.extend(circle(head - side, 0.15, color, 10));
            }
            Cosmetic::Crown => vertices.extend(ring(head, 0.15, 0.3, color, 10)),
        }
    }
}
