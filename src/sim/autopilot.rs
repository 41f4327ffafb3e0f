//! Demo/autopilot input
//!
//! Steers away from whatever threat is closing in fastest, goes after
//! power-ups when nothing is near, and keeps the guns firing. Used by the
//! headless binary and the attract screen.

use glam::Vec2;

use super::projectile::Owner;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Threats closer than this are dodged
const DANGER_RADIUS: f32 = 220.0;
/// Where the ship idles when nothing is happening
const HOME: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT * 0.8);
/// Ignore steering smaller than this
const DEAD_ZONE: f32 = 0.15;

/// Overwrite movement and fire commands with autopilot decisions
pub fn drive(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::StartMenu => {
            input.start = true;
            return;
        }
        GamePhase::GameOver => {
            input.restart = true;
            return;
        }
        GamePhase::Paused => return,
        GamePhase::Playing => {}
    }

    let me = state.player.pos;
    let mut push = Vec2::ZERO;

    let mut threats: Vec<(Vec2, Vec2)> = state
        .meteors
        .iter()
        .map(|m| (m.body.pos, m.body.vel))
        .collect();
    threats.extend(
        state
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Enemy)
            .map(|p| (p.body.pos, p.body.vel)),
    );
    threats.extend(state.enemies.iter().map(|e| (e.pos, Vec2::ZERO)));

    for (pos, vel) in threats {
        // Look a quarter second ahead
        let ahead = pos + vel * 0.25;
        let away = me - ahead;
        let dist = away.length();
        if dist < DANGER_RADIUS && dist > f32::EPSILON {
            push += away / dist * (1.0 - dist / DANGER_RADIUS);
        }
    }

    let steer = if push.length() > DEAD_ZONE {
        push
    } else if let Some(power_up) = state
        .power_ups
        .iter()
        .filter(|p| p.body.pos.y > 0.0)
        .min_by(|a, b| {
            me.distance_squared(a.body.pos)
                .partial_cmp(&me.distance_squared(b.body.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    {
        power_up.body.pos - me
    } else {
        // Line up under the nearest enemy, otherwise drift home
        let aim_x = state
            .enemies
            .iter()
            .map(|e| e.pos.x)
            .min_by(|a, b| {
                (a - me.x)
                    .abs()
                    .partial_cmp(&(b - me.x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(HOME.x);
        Vec2::new(aim_x, HOME.y) - me
    };

    let dir = steer.normalize_or_zero();
    input.left = dir.x < -DEAD_ZONE;
    input.right = dir.x > DEAD_ZONE;
    input.up = dir.y < -DEAD_ZONE;
    input.down = dir.y > DEAD_ZONE;
    input.fire = state.player.can_shoot();
}
