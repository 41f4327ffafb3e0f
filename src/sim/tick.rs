//! Fixed timestep simulation tick
//!
//! Core game loop step: input, timers, movement, collisions, then the
//! difficulty ramp.

use super::autopilot;
use super::collision::{resolve_collisions, resolve_enemy_contact};
use super::enemy::Target;
use super::player::direction_from_keys;
use super::projectile::Projectile;
use super::spawn::{run_spawns, update_difficulty};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
///
/// Movement keys are held state; the rest are key-down presses that the
/// driver clears after the first substep consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire (Space while playing)
    pub fire: bool,
    /// Start from the menu (Space)
    pub start: bool,
    /// Pause toggle (Escape)
    pub pause: bool,
    /// Restart after game over (R)
    pub restart: bool,
    /// Quit from the menu (Q)
    pub quit: bool,
    /// Autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.autopilot {
        autopilot::drive(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::StartMenu => {
            if input.quit {
                log::info!("Quit from start menu");
                state.events.push(GameEvent::Quit);
            } else if input.start {
                // The start press is consumed here and never fires a shot
                start_session(state);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                start_session(state);
                // A restarted run begins fully repaired
                state.player.health = state.player.max_health;
            } else {
                update_explosions(state, dt);
            }
            return;
        }
        GamePhase::Playing | GamePhase::Paused => {}
    }

    if input.pause {
        toggle_pause(state);
    }

    state.clock.advance(dt as f64);
    if state.phase == GamePhase::Paused {
        return;
    }

    run_spawns(state, dt);

    if input.fire {
        fire_player_lasers(state);
    }

    let dir = direction_from_keys(input.left, input.right, input.up, input.down);
    state.player.update(dir, dt);

    state.meteors.retain_mut(|m| m.update(dt));
    state.power_ups.retain_mut(|p| p.update(dt));
    state.projectiles.retain_mut(|p| p.update(dt));
    update_explosions(state, dt);

    update_enemies(state, dt);
    resolve_enemy_contact(state);

    resolve_collisions(state);

    if state.phase == GamePhase::Playing {
        update_difficulty(state);
    }
}

/// Clear the field and begin a new run
fn start_session(state: &mut GameState) {
    state.reset_session();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::MusicStart);
    log::info!("Session started (seed {}, best {})", state.seed, state.high_score);
}

fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.clock.pause();
            state.events.push(GameEvent::MusicStop);
            log::info!("Paused at score {}", state.clock.score());
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.clock.resume();
            state.events.push(GameEvent::MusicStart);
            log::info!("Resumed");
        }
        _ => {}
    }
}

fn fire_player_lasers(state: &mut GameState) {
    let Some(muzzles) = state.player.fire(&state.tuning) else {
        return;
    };
    let now = state.clock.elapsed();
    for muzzle in muzzles {
        let id = state.next_entity_id();
        let laser = Projectile::player_laser(id, muzzle, state.tuning.laser_speed, now);
        state.projectiles.push(laser);
    }
    state.events.push(GameEvent::ShotFired);
}

fn update_explosions(state: &mut GameState, dt: f32) {
    state.explosions.retain_mut(|e| e.update(dt));
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let target = Target {
        pos: state.player.pos,
        alive: state.player.alive,
    };
    let mut shots = Vec::new();
    state.enemies.retain_mut(|enemy| {
        let update = enemy.update(target, &state.tuning, dt, &mut state.rng);
        if let Some(dir) = update.shot {
            shots.push((enemy.pos, dir));
        }
        update.on_screen
    });

    let now = state.clock.elapsed();
    for (pos, dir) in shots {
        let id = state.next_entity_id();
        let speed = state.tuning.enemy_laser_speed;
        let laser = Projectile::enemy_laser(id, pos, dir, speed, &state.masks.enemy_laser, now);
        state.projectiles.push(laser);
    }
}
