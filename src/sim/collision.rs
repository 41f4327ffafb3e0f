//! Collision resolution
//!
//! Pairwise tests run in a fixed order each step, after all movement:
//!
//! 0. enemy ship body vs player (as part of the enemy pass)
//! 1. meteors vs player (mask)
//! 2. enemy lasers vs player (mask)
//! 3. player lasers vs meteors (rect)
//! 4. player lasers vs enemy ships (rect)
//! 5. power-ups vs player (mask)
//!
//! A laser spent in step 3 is gone before step 4 runs. Death is checked
//! after every damage source so the final score is taken on the step the
//! killing blow lands.

use glam::Vec2;

use super::entity::Rect;
use super::mask::masks_collide;
use super::projectile::Owner;
use super::state::{GameEvent, GamePhase, GameState};

/// Enemy ships ramming the player. The first ship to touch a vulnerable
/// player deals contact damage and is destroyed; later ships in the same
/// step meet an invincible player and fly on.
pub fn resolve_enemy_contact(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    let player_rect = player_mask_rect(state);
    let mut rammed = Vec::new();

    for enemy in &state.enemies {
        if state.player.is_invincible() {
            break;
        }
        let enemy_rect = state.masks.enemy.rect_at(enemy.pos);
        if masks_collide(&state.masks.player, &player_rect, &state.masks.enemy, &enemy_rect)
            && state
                .player
                .take_damage(state.tuning.enemy_contact_damage, &state.tuning)
        {
            rammed.push((enemy.id, enemy.pos));
        }
    }

    if rammed.is_empty() {
        return;
    }
    state.enemies.retain(|e| !rammed.iter().any(|(id, _)| *id == e.id));
    for (id, pos) in rammed {
        log::debug!("Enemy {} rammed the player", id);
        state.spawn_explosion(pos);
    }
    report_damage(state);
}

/// Run collision steps 1 to 5
pub fn resolve_collisions(state: &mut GameState) {
    player_vs_meteors(state);
    player_vs_enemy_lasers(state);
    lasers_vs_meteors(state);
    lasers_vs_enemies(state);
    player_vs_power_ups(state);
}

fn player_vs_meteors(state: &mut GameState) {
    if !state.player.alive || state.player.is_invincible() {
        return;
    }
    let player_rect = player_mask_rect(state);
    let masks = &state.masks;
    let mut hits = Vec::new();
    state.meteors.retain(|meteor| {
        let rect = meteor.mask_rect(&masks.meteor);
        if !rect.intersects(&player_rect) {
            return true;
        }
        let mask = meteor.mask(&masks.meteor);
        let hit = masks_collide(&masks.player, &player_rect, &mask, &rect);
        if hit {
            hits.push(meteor.body.pos);
        }
        !hit
    });

    if hits.is_empty() {
        return;
    }
    state
        .player
        .take_damage(state.tuning.hazard_damage, &state.tuning);
    for pos in hits {
        state.spawn_explosion(pos);
    }
    report_damage(state);
}

fn player_vs_enemy_lasers(state: &mut GameState) {
    if !state.player.alive || state.player.is_invincible() {
        return;
    }
    let player_rect = player_mask_rect(state);
    let player_mask = &state.masks.player;
    let mut hits = Vec::new();
    state.projectiles.retain(|laser| {
        let Some(mask) = laser.mask.as_ref().filter(|_| laser.owner == Owner::Enemy) else {
            return true;
        };
        let hit = masks_collide(player_mask, &player_rect, mask, &laser.rect());
        if hit {
            hits.push(laser.body.pos);
        }
        !hit
    });

    if hits.is_empty() {
        return;
    }
    state
        .player
        .take_damage(state.tuning.enemy_laser_damage, &state.tuning);
    for pos in hits {
        state.spawn_explosion(pos);
    }
    report_damage(state);
}

fn lasers_vs_meteors(state: &mut GameState) {
    let mut spent = Vec::new();
    let mut destroyed: Vec<Vec2> = Vec::new();

    for laser in state.projectiles.iter().filter(|p| p.owner == Owner::Player) {
        let laser_rect = laser.rect();
        let before = destroyed.len();
        state.meteors.retain(|meteor| {
            let hit = meteor.rect().intersects(&laser_rect);
            if hit {
                destroyed.push(meteor.body.pos);
            }
            !hit
        });
        if destroyed.len() > before {
            spent.push(laser.id);
        }
    }

    state.projectiles.retain(|p| !spent.contains(&p.id));
    for pos in destroyed {
        state.spawn_explosion(pos);
        credit_kill(state);
    }
}

fn lasers_vs_enemies(state: &mut GameState) {
    let mut spent = Vec::new();
    let mut destroyed = Vec::new();

    for laser in state.projectiles.iter().filter(|p| p.owner == Owner::Player) {
        let laser_rect = laser.rect();
        let mut hit_any = false;
        for enemy in state.enemies.iter_mut() {
            if enemy.health <= 0 || !enemy.rect().intersects(&laser_rect) {
                continue;
            }
            hit_any = true;
            if enemy.hit() {
                destroyed.push((enemy.id, enemy.pos));
            }
        }
        if hit_any {
            spent.push(laser.id);
        }
    }

    state.projectiles.retain(|p| !spent.contains(&p.id));
    if destroyed.is_empty() {
        return;
    }
    state.enemies.retain(|e| e.health > 0);
    for (id, pos) in destroyed {
        log::debug!("Enemy {} destroyed", id);
        state.spawn_explosion(pos);
        credit_kill(state);
    }
}

fn player_vs_power_ups(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    let player_rect = player_mask_rect(state);
    let masks = &state.masks;
    let mut collected = Vec::new();
    state.power_ups.retain(|power_up| {
        let rect = masks.power_up.rect_at(power_up.body.pos);
        let hit = masks_collide(&masks.player, &player_rect, &masks.power_up, &rect);
        if hit {
            collected.push((power_up.kind, power_up.body.pos));
        }
        !hit
    });

    for (kind, pos) in collected {
        state.player.apply_power_up(kind, &state.tuning);
        log::info!("Collected {:?} (weapon {})", kind, state.player.weapon.as_str());
        state.events.push(GameEvent::PowerUpCollected { kind });
        state.spawn_explosion(pos);
    }
}

/// Player placement for mask tests, sized by the active player mask
fn player_mask_rect(state: &GameState) -> Rect {
    state.masks.player.rect_at(state.player.pos)
}

/// One kill toward the next power-up drop
fn credit_kill(state: &mut GameState) {
    if state.player.register_kill(&state.tuning) {
        state.spawn_power_up();
    }
}

/// Raise the damage event and end the session if that was fatal
fn report_damage(state: &mut GameState) {
    state.events.push(GameEvent::PlayerDamaged {
        health: state.player.health,
    });
    check_death(state);
}

/// Health at or below zero destroys the player and ends the session
pub fn check_death(state: &mut GameState) {
    if !state.player.alive || state.player.health > 0 {
        return;
    }
    state.player.kill();
    let score = state.clock.score();
    state.final_score = Some(score);
    state.phase = GamePhase::GameOver;
    log::info!("Game over: score {} (best {})", score, state.high_score);
    state.events.push(GameEvent::MusicStop);
    state.events.push(GameEvent::GameOver { score });
}
