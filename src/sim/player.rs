//! The player's ship
//!
//! Movement, shooting cooldown, invincibility window and timed weapon
//! upgrades. Damage and death are applied from the collision resolver.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectible::PowerUpKind;
use super::entity::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Projectile emission pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponMode {
    #[default]
    Single,
    Double,
    Triple,
}

impl WeaponMode {
    /// Horizontal muzzle offsets from the ship's nose
    pub fn offsets(self, tuning: &Tuning) -> Vec<f32> {
        match self {
            WeaponMode::Single => vec![0.0],
            WeaponMode::Double => vec![-tuning.double_laser_offset, tuning.double_laser_offset],
            WeaponMode::Triple => vec![
                -tuning.triple_laser_offset,
                0.0,
                tuning.triple_laser_offset,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponMode::Single => "single",
            WeaponMode::Double => "double",
            WeaponMode::Triple => "triple",
        }
    }
}

/// Movement direction from opposing key pairs; unit length unless idle
pub fn direction_from_keys(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| pos as i32 as f32 - neg as i32 as f32;
    Vec2::new(axis(left, right), axis(up, down)).normalize_or_zero()
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Sprite center
    pub pos: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    /// Remaining invincibility (seconds), `None` when vulnerable
    pub invincibility: Option<f32>,
    pub weapon: WeaponMode,
    /// Remaining weapon upgrade time (seconds), `None` on the stock laser
    pub weapon_time_left: Option<f32>,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    /// Kills toward the next power-up drop
    pub kill_count: u32,
    pub alive: bool,
}

impl Player {
    /// Fresh ship at the center of the screen
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            speed: tuning.player_speed,
            health: tuning.player_start_health,
            max_health: tuning.player_max_health,
            invincibility: None,
            weapon: WeaponMode::Single,
            weapon_time_left: None,
            shoot_cooldown: 0.0,
            kill_count: 0,
            alive: true,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_some()
    }

    pub fn can_shoot(&self) -> bool {
        self.alive && self.shoot_cooldown <= 0.0
    }

    pub fn has_power_up(&self) -> bool {
        self.weapon_time_left.is_some()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, PLAYER_SIZE)
    }

    /// Move along `direction` (already normalized), then run down timers
    pub fn update(&mut self, direction: Vec2, dt: f32) {
        if !self.alive {
            return;
        }

        let next = self.pos + direction * self.speed * dt;
        self.pos = Vec2::new(next.x.clamp(0.0, SCREEN_WIDTH), next.y.clamp(0.0, SCREEN_HEIGHT));

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        }

        if let Some(left) = self.invincibility {
            let left = left - dt;
            self.invincibility = (left > 0.0).then_some(left);
        }

        if let Some(left) = self.weapon_time_left {
            let left = left - dt;
            if left > 0.0 {
                self.weapon_time_left = Some(left);
            } else {
                self.weapon_time_left = None;
                self.weapon = WeaponMode::Single;
            }
        }
    }

    /// Fire if the cooldown allows. Returns the muzzle points (laser midbottoms).
    pub fn fire(&mut self, tuning: &Tuning) -> Option<Vec<Vec2>> {
        if !self.can_shoot() {
            return None;
        }
        self.shoot_cooldown = tuning.shoot_cooldown;
        let nose = self.rect().midtop();
        Some(
            self.weapon
                .offsets(tuning)
                .into_iter()
                .map(|dx| Vec2::new(nose.x + dx, nose.y))
                .collect(),
        )
    }

    /// Apply contact damage unless invincible or dead. Returns true if applied.
    pub fn take_damage(&mut self, amount: i32, tuning: &Tuning) -> bool {
        if !self.alive || self.is_invincible() {
            return false;
        }
        self.health -= amount;
        self.invincibility = Some(tuning.invincibility_duration);
        true
    }

    /// Mark the ship destroyed
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Grant a power-up's effect
    pub fn apply_power_up(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        match kind {
            PowerUpKind::Heal => {
                self.health = (self.health + 1).min(self.max_health);
            }
            PowerUpKind::DoubleLaser => {
                self.weapon = WeaponMode::Double;
                self.weapon_time_left = Some(tuning.weapon_duration);
            }
            PowerUpKind::TripleLaser => {
                self.weapon = WeaponMode::Triple;
                self.weapon_time_left = Some(tuning.weapon_duration);
            }
        }
    }

    /// Count a kill. Returns true when it completes a power-up batch.
    pub fn register_kill(&mut self, tuning: &Tuning) -> bool {
        self.kill_count += 1;
        if self.kill_count >= tuning.kills_per_power_up {
            self.kill_count = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(player: &mut Player, dir: Vec2, secs: f32) {
        let steps = (secs / SIM_DT).round() as u32;
        for _ in 0..steps {
            player.update(dir, SIM_DT);
        }
    }

    #[test]
    fn test_diagonal_not_faster() {
        let diag = direction_from_keys(false, true, false, true);
        assert!((diag.length() - 1.0).abs() < 1e-6);
        assert_eq!(direction_from_keys(true, true, false, false), Vec2::ZERO);
        assert_eq!(direction_from_keys(false, false, true, false), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_clamped_to_screen() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        run(&mut player, Vec2::new(-1.0, 0.0), 5.0);
        assert_eq!(player.pos.x, 0.0);
        run(&mut player, direction_from_keys(false, true, false, true), 10.0);
        assert_eq!(player.pos, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    }

    #[test]
    fn test_triple_fire_pattern() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos = Vec2::new(640.0, 360.0);
        player.apply_power_up(PowerUpKind::TripleLaser, &tuning);

        let muzzles = player.fire(&tuning).unwrap();
        let xs: Vec<f32> = muzzles.iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![620.0, 640.0, 660.0]);
        assert!(muzzles.iter().all(|m| m.y == 360.0 - PLAYER_SIZE.y / 2.0));

        // Cooldown engaged
        assert!(!player.can_shoot());
        assert!(player.fire(&tuning).is_none());
        run(&mut player, Vec2::ZERO, 0.25);
        assert!(player.can_shoot());
    }

    #[test]
    fn test_double_fire_offsets() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.apply_power_up(PowerUpKind::DoubleLaser, &tuning);
        let xs: Vec<f32> = player.fire(&tuning).unwrap().iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![625.0, 655.0]);
    }

    #[test]
    fn test_invincibility_blocks_damage_until_expiry() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.take_damage(1, &tuning));
        assert_eq!(player.health, 2);
        assert!(!player.take_damage(1, &tuning));
        run(&mut player, Vec2::ZERO, 0.4);
        assert!(!player.take_damage(1, &tuning));
        assert_eq!(player.health, 2);
        run(&mut player, Vec2::ZERO, 0.2);
        assert!(!player.is_invincible());
        assert!(player.take_damage(1, &tuning));
        assert_eq!(player.health, 1);
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        for _ in 0..5 {
            player.apply_power_up(PowerUpKind::Heal, &tuning);
        }
        assert_eq!(player.health, 5);
        assert_eq!(player.weapon, WeaponMode::Single);
        assert!(!player.has_power_up());
    }

    #[test]
    fn test_weapon_reverts_after_duration() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.apply_power_up(PowerUpKind::DoubleLaser, &tuning);
        run(&mut player, Vec2::ZERO, 19.9);
        assert_eq!(player.weapon, WeaponMode::Double);
        run(&mut player, Vec2::ZERO, 0.2);
        assert_eq!(player.weapon, WeaponMode::Single);
        assert!(!player.has_power_up());
    }

    #[test]
    fn test_repickup_restarts_not_stacks() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.apply_power_up(PowerUpKind::DoubleLaser, &tuning);
        run(&mut player, Vec2::ZERO, 15.0);
        player.apply_power_up(PowerUpKind::TripleLaser, &tuning);
        let left = player.weapon_time_left.unwrap();
        assert!((left - 20.0).abs() < 1e-4);
        run(&mut player, Vec2::ZERO, 19.9);
        assert_eq!(player.weapon, WeaponMode::Triple);
        run(&mut player, Vec2::ZERO, 0.2);
        assert_eq!(player.weapon, WeaponMode::Single);
    }

    #[test]
    fn test_kill_batches() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let drops: Vec<bool> = (0..7).map(|_| player.register_kill(&tuning)).collect();
        assert_eq!(drops, vec![false, false, true, false, false, true, false]);
        assert_eq!(player.kill_count, 1);
    }

    #[test]
    fn test_dead_player_frozen() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.kill();
        let before = player.pos;
        player.update(Vec2::new(1.0, 0.0), 1.0);
        assert_eq!(player.pos, before);
        assert!(player.fire(&tuning).is_none());
    }
}
