//! Enemy ship AI
//!
//! Movement is a small state machine layered with an override:
//!
//! - `Horizontal` patrol: sideways sweep with a sinusoidal vertical zigzag.
//!   After a fixed sweep distance the ship turns around and drops into
//! - `Vertical` patrol: a short straight descent, then back to `Horizontal`.
//! - `Charging`: every few seconds the ship locks onto the player's current
//!   position and rams toward it for a fixed duration, then resumes the patrol
//!   state it left.
//!
//! Shooting runs on its own cooldown, is suppressed while charging, and leads
//! the player using a one-frame velocity estimate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Rect;
use crate::consts::ENEMY_SIZE;
use crate::rotate_screen;
use crate::tuning::Tuning;

/// Patrol leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Patrol {
    Horizontal,
    Vertical,
}

/// Externally visible movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    PatrolHorizontal,
    PatrolVertical,
    Charging,
}

/// An active ram toward a locked position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub dir: Vec2,
    pub elapsed: f32,
}

/// What the enemy needs to know about the player each frame
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub pos: Vec2,
    pub alive: bool,
}

/// Result of one enemy update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate {
    /// Unit direction of a laser fired this frame
    pub shot: Option<Vec2>,
    /// False once the ship has left through the bottom of the screen
    pub on_screen: bool,
}

/// First-order lead: where the target will be when a projectile fired now arrives
pub fn lead_target(shooter: Vec2, target: Vec2, target_vel: Vec2, projectile_speed: f32) -> Vec2 {
    if projectile_speed <= 0.0 || target_vel.length_squared() == 0.0 {
        return target;
    }
    let time_to_reach = (target - shooter).length() / projectile_speed;
    target + target_vel * time_to_reach
}

/// A shooting enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShip {
    pub id: u32,
    /// Sprite center
    pub pos: Vec2,
    pub health: i32,
    pub patrol: Patrol,
    pub moving_right: bool,
    /// Distance swept on the current horizontal leg
    pub sweep_travel: f32,
    /// Distance dropped on the current vertical leg
    pub descent_travel: f32,
    /// Seconds alive; drives the zigzag phase
    pub age: f32,
    pub charge: Option<Charge>,
    /// Seconds until the next charge may start
    pub charge_cooldown: f32,
    /// Seconds until the next shot may fire
    pub shoot_cooldown: f32,
    /// Player position seen last frame
    pub last_target_pos: Vec2,
    /// Estimated player velocity (pixels/s)
    pub target_vel: Vec2,
}

impl EnemyShip {
    pub fn new(id: u32, pos: Vec2, target_pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            health: tuning.enemy_health,
            patrol: Patrol::Horizontal,
            moving_right: true,
            sweep_travel: 0.0,
            descent_travel: 0.0,
            age: 0.0,
            charge: None,
            charge_cooldown: tuning.enemy_charge_cooldown,
            shoot_cooldown: tuning.enemy_shoot_cooldown,
            last_target_pos: target_pos,
            target_vel: Vec2::ZERO,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, ENEMY_SIZE)
    }

    pub fn movement_state(&self) -> MovementState {
        match (self.charge, self.patrol) {
            (Some(_), _) => MovementState::Charging,
            (None, Patrol::Horizontal) => MovementState::PatrolHorizontal,
            (None, Patrol::Vertical) => MovementState::PatrolVertical,
        }
    }

    pub fn is_charging(&self) -> bool {
        self.charge.is_some()
    }

    /// Apply one projectile hit. Returns true if that destroyed the ship.
    pub fn hit(&mut self) -> bool {
        self.health -= 1;
        self.health <= 0
    }

    /// Advance movement and combat by `dt`
    pub fn update(
        &mut self,
        target: Target,
        tuning: &Tuning,
        dt: f32,
        rng: &mut impl Rng,
    ) -> EnemyUpdate {
        self.age += dt;
        self.track_target(target.pos, dt);

        if self.charge.is_none() {
            self.charge_cooldown -= dt;
            if self.charge_cooldown <= 0.0 {
                let dir = (target.pos - self.pos).normalize_or_zero();
                self.charge = Some(Charge { dir, elapsed: 0.0 });
                log::debug!("Enemy {} charging toward {:?}", self.id, target.pos);
            }
        }

        if let Some(charge) = self.charge.as_mut() {
            if charge.elapsed < tuning.enemy_charge_duration {
                self.pos += charge.dir * tuning.enemy_charge_speed * dt;
                charge.elapsed += dt;
            } else {
                self.charge = None;
                self.charge_cooldown = tuning.enemy_charge_cooldown;
            }
        }

        if self.charge.is_none() {
            self.patrol_step(tuning, dt);
        }

        let shot = self.try_shoot(target, tuning, dt, rng);

        EnemyUpdate {
            shot,
            on_screen: !self.rect().below_screen(),
        }
    }

    fn track_target(&mut self, pos: Vec2, dt: f32) {
        self.target_vel = if dt > 0.0 {
            (pos - self.last_target_pos) / dt
        } else {
            Vec2::ZERO
        };
        self.last_target_pos = pos;
    }

    fn patrol_step(&mut self, tuning: &Tuning, dt: f32) {
        match self.patrol {
            Patrol::Horizontal => {
                let zigzag = (self.age * tuning.zigzag_frequency).sin() * tuning.zigzag_amplitude;
                let step = tuning.enemy_speed * dt;
                self.pos.x += if self.moving_right { step } else { -step };
                self.pos.y += zigzag * dt;
                self.sweep_travel += step;

                if self.sweep_travel >= tuning.enemy_patrol_distance {
                    self.patrol = Patrol::Vertical;
                    self.sweep_travel = 0.0;
                    self.moving_right = !self.moving_right;
                }
            }
            Patrol::Vertical => {
                let step = tuning.enemy_vertical_speed * dt;
                self.pos.y += step;
                self.descent_travel += step;

                if self.descent_travel >= tuning.enemy_descent_distance {
                    self.patrol = Patrol::Horizontal;
                    self.descent_travel = 0.0;
                }
            }
        }
    }

    fn try_shoot(
        &mut self,
        target: Target,
        tuning: &Tuning,
        dt: f32,
        rng: &mut impl Rng,
    ) -> Option<Vec2> {
        self.shoot_cooldown -= dt;
        if self.shoot_cooldown > 0.0 || !target.alive || self.is_charging() {
            return None;
        }
        // Only fire down at a player below us
        if self.pos.y >= target.pos.y {
            return None;
        }
        self.shoot_cooldown = tuning.enemy_shoot_cooldown;
        Some(self.aim(target.pos, tuning, rng))
    }

    /// Unit direction toward the lead-predicted player position, plus spread
    pub fn aim(&self, target_pos: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Vec2 {
        let predicted = lead_target(self.pos, target_pos, self.target_vel, tuning.enemy_laser_speed);
        let dir = (predicted - self.pos).normalize_or_zero();
        let dir = if dir == Vec2::ZERO { Vec2::Y } else { dir };
        let spread = if tuning.enemy_aim_spread > 0.0 {
            rng.random_range(-tuning.enemy_aim_spread..=tuning.enemy_aim_spread)
        } else {
            0.0
        };
        rotate_screen(dir, spread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Patrol-only tuning: no charges, no spread
    fn calm() -> Tuning {
        Tuning {
            enemy_charge_cooldown: 1e9,
            enemy_aim_spread: 0.0,
            ..Default::default()
        }
    }

    fn above() -> Target {
        Target {
            pos: Vec2::new(640.0, -1000.0),
            alive: true,
        }
    }

    fn step_until(
        enemy: &mut EnemyShip,
        target: Target,
        tuning: &Tuning,
        max_steps: u32,
        done: impl Fn(&EnemyShip) -> bool,
    ) -> u32 {
        let mut rng = Pcg32::seed_from_u64(1);
        for i in 0..max_steps {
            enemy.update(target, tuning, SIM_DT, &mut rng);
            if done(enemy) {
                return i + 1;
            }
        }
        panic!("condition not reached in {max_steps} steps");
    }

    #[test]
    fn test_sweep_then_descend_then_sweep_back() {
        let tuning = calm();
        let mut enemy = EnemyShip::new(1, Vec2::new(400.0, 100.0), above().pos, &tuning);
        let start_x = enemy.pos.x;

        step_until(&mut enemy, above(), &tuning, 1000, |e| e.patrol == Patrol::Vertical);
        assert!((enemy.pos.x - start_x - 250.0).abs() < 3.0);
        assert!(!enemy.moving_right);
        assert_eq!(enemy.sweep_travel, 0.0);

        let y_before = enemy.pos.y;
        let x_before = enemy.pos.x;
        step_until(&mut enemy, above(), &tuning, 1000, |e| e.patrol == Patrol::Horizontal);
        assert!((enemy.pos.y - y_before - 40.0).abs() < 1.0);
        assert_eq!(enemy.pos.x, x_before);

        // Next leg sweeps left
        let x_before = enemy.pos.x;
        let mut rng = Pcg32::seed_from_u64(2);
        enemy.update(above(), &tuning, SIM_DT, &mut rng);
        assert!(enemy.pos.x < x_before);
    }

    #[test]
    fn test_zigzag_moves_vertically_during_sweep() {
        let tuning = calm();
        let mut enemy = EnemyShip::new(1, Vec2::new(400.0, 100.0), above().pos, &tuning);
        let mut rng = Pcg32::seed_from_u64(1);
        // sin is positive in the first 1.2 s of life, so the ship drifts down
        for _ in 0..60 {
            enemy.update(above(), &tuning, SIM_DT, &mut rng);
        }
        assert!(enemy.pos.y > 100.0);
        assert_eq!(enemy.movement_state(), MovementState::PatrolHorizontal);
    }

    #[test]
    fn test_charge_locks_direction_and_resumes_patrol() {
        let tuning = Tuning {
            enemy_aim_spread: 0.0,
            ..Default::default()
        };
        let target = Target {
            pos: Vec2::new(400.0, -900.0),
            alive: true,
        };
        let mut enemy = EnemyShip::new(1, Vec2::new(400.0, 100.0), target.pos, &tuning);

        let steps = step_until(&mut enemy, target, &tuning, 1000, |e| e.is_charging());
        // Cooldown of 2.5 s at 120 Hz
        assert!((299..=301).contains(&steps), "steps={steps}");
        let charge = enemy.charge.unwrap();
        assert!((charge.dir - Vec2::new(0.0, -1.0)).length() < 0.05);
        let patrol_before = enemy.patrol;

        let start = enemy.pos;
        let steps = step_until(&mut enemy, target, &tuning, 1000, |e| !e.is_charging());
        assert!((96..=98).contains(&steps), "steps={steps}");
        // 0.8 s at 500 px/s toward the player
        assert!((start.y - enemy.pos.y) > 380.0);
        assert_eq!(enemy.patrol, patrol_before);
        assert!((enemy.charge_cooldown - tuning.enemy_charge_cooldown).abs() < 1e-6);
    }

    #[test]
    fn test_shoots_only_at_player_below() {
        let tuning = calm();
        let mut rng = Pcg32::seed_from_u64(5);
        let below = Target {
            pos: Vec2::new(400.0, 600.0),
            alive: true,
        };
        let mut enemy = EnemyShip::new(1, Vec2::new(400.0, 100.0), below.pos, &tuning);

        let mut shots = 0;
        for _ in 0..(3.0 / SIM_DT) as u32 {
            if enemy.update(below, &tuning, SIM_DT, &mut rng).shot.is_some() {
                shots += 1;
            }
        }
        // 1.2 s cooldown from spawn: shots at ~1.2 s and ~2.4 s
        assert_eq!(shots, 2);

        let mut quiet = EnemyShip::new(2, Vec2::new(400.0, 100.0), above().pos, &tuning);
        for _ in 0..(3.0 / SIM_DT) as u32 {
            assert!(quiet.update(above(), &tuning, SIM_DT, &mut rng).shot.is_none());
        }

        let dead = Target { alive: false, ..below };
        let mut idle = EnemyShip::new(3, Vec2::new(400.0, 100.0), dead.pos, &tuning);
        for _ in 0..(3.0 / SIM_DT) as u32 {
            assert!(idle.update(dead, &tuning, SIM_DT, &mut rng).shot.is_none());
        }
    }

    #[test]
    fn test_no_shots_while_charging() {
        let tuning = Tuning {
            enemy_shoot_cooldown: 0.0,
            enemy_charge_cooldown: 0.0,
            enemy_charge_duration: 10.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let below = Target {
            pos: Vec2::new(400.0, 700.0),
            alive: true,
        };
        let mut enemy = EnemyShip::new(1, Vec2::new(400.0, 100.0), below.pos, &tuning);
        for _ in 0..60 {
            let update = enemy.update(below, &tuning, SIM_DT, &mut rng);
            assert!(enemy.is_charging());
            assert!(update.shot.is_none());
        }
    }

    #[test]
    fn test_lead_prediction() {
        // Stationary target: aim straight at it
        let p = lead_target(Vec2::ZERO, Vec2::new(0.0, 500.0), Vec2::ZERO, 1000.0);
        assert_eq!(p, Vec2::new(0.0, 500.0));

        // Target 500 px away moving right at 300 px/s; bolt needs 0.5 s
        let p = lead_target(Vec2::ZERO, Vec2::new(0.0, 500.0), Vec2::new(300.0, 0.0), 1000.0);
        assert!((p - Vec2::new(150.0, 500.0)).length() < 1e-3);
    }

    #[test]
    fn test_aim_uses_tracked_velocity_and_spread_bounds() {
        let tuning = calm();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut enemy = EnemyShip::new(1, Vec2::new(0.0, 0.0), Vec2::new(0.0, 500.0), &tuning);
        // Player moved 3 px right over one 1/100 s frame => 300 px/s
        enemy.track_target(Vec2::new(3.0, 500.0), 0.01);
        assert!((enemy.target_vel - Vec2::new(300.0, 0.0)).length() < 1e-3);

        let dir = enemy.aim(Vec2::new(3.0, 500.0), &tuning, &mut rng);
        assert!(dir.x > 0.25, "should lead to the right: {dir:?}");

        let spread = Tuning::default();
        let straight = Vec2::Y;
        for _ in 0..100 {
            let shooter = EnemyShip::new(2, Vec2::ZERO, Vec2::new(0.0, 500.0), &spread);
            let d = shooter.aim(Vec2::new(0.0, 500.0), &spread, &mut rng);
            let angle = straight.angle_to(d).to_degrees().abs();
            assert!(angle <= 3.0 + 1e-3, "angle={angle}");
        }
    }

    #[test]
    fn test_leaves_through_bottom() {
        let tuning = calm();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = EnemyShip::new(1, Vec2::new(400.0, 790.0), above().pos, &tuning);
        enemy.patrol = Patrol::Vertical;
        let update = enemy.update(above(), &tuning, 0.1, &mut rng);
        assert!(!update.on_screen);
    }

    #[test]
    fn test_three_hits_destroy() {
        let tuning = Tuning::default();
        let mut enemy = EnemyShip::new(1, Vec2::ZERO, Vec2::ZERO, &tuning);
        assert!(!enemy.hit());
        assert!(!enemy.hit());
        assert!(enemy.hit());
    }
}
