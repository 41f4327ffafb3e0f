//! Spawn timers and the difficulty ramp
//!
//! Two accumulator channels (meteors and enemy ships) advance only while
//! playing. Difficulty climbs one level per `difficulty_interval` seconds of
//! played time; each climb re-arms the meteor channel at its shorter interval.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyShip;
use super::hazard::Meteor;
use super::state::{GameEvent, GameState};
use crate::consts::SCREEN_WIDTH;
use crate::tuning::Tuning;

/// Spawn ticks due this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTicks {
    pub hazards: u32,
    pub enemies: u32,
}

/// Timer-driven spawn and difficulty state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    difficulty: u32,
    hazard_accum: f32,
    enemy_accum: f32,
    hazard_interval: f32,
    /// Played time at the last difficulty increase
    last_difficulty_at: f64,
}

impl Scheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            difficulty: 1,
            hazard_accum: 0.0,
            enemy_accum: 0.0,
            hazard_interval: tuning.hazard_interval(1),
            last_difficulty_at: 0.0,
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Current meteor spawn interval (seconds)
    pub fn hazard_interval(&self) -> f32 {
        self.hazard_interval
    }

    /// Raise difficulty once `difficulty_interval` of play has passed since
    /// the last raise. Returns the new level.
    pub fn ramp(&mut self, elapsed: f64, tuning: &Tuning) -> Option<u32> {
        if elapsed - self.last_difficulty_at < tuning.difficulty_interval as f64 {
            return None;
        }
        self.difficulty += 1;
        self.last_difficulty_at = elapsed;
        self.hazard_interval = tuning.hazard_interval(self.difficulty);
        self.hazard_accum = 0.0;
        Some(self.difficulty)
    }

    /// Advance both channels by `dt` and count the ticks that came due
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> SpawnTicks {
        let mut ticks = SpawnTicks::default();

        self.hazard_accum += dt;
        while self.hazard_interval > 0.0 && self.hazard_accum >= self.hazard_interval {
            self.hazard_accum -= self.hazard_interval;
            ticks.hazards += 1;
        }

        let enemy_interval = tuning.enemy_spawn_interval;
        self.enemy_accum += dt;
        while enemy_interval > 0.0 && self.enemy_accum >= enemy_interval {
            self.enemy_accum -= enemy_interval;
            ticks.enemies += 1;
        }

        ticks
    }
}

/// Ramp difficulty for the current played time
pub fn update_difficulty(state: &mut GameState) {
    let elapsed = state.clock.elapsed();
    if let Some(level) = state.scheduler.ramp(elapsed, &state.tuning) {
        log::info!(
            "Difficulty {} (meteor interval {:.2}s)",
            level,
            state.scheduler.hazard_interval()
        );
        state.events.push(GameEvent::DifficultyUp { level });
    }
}

/// Run the spawn channels for one step
pub fn run_spawns(state: &mut GameState, dt: f32) {
    let ticks = state.scheduler.advance(dt, &state.tuning);
    for _ in 0..ticks.hazards {
        spawn_meteors(state);
    }
    for _ in 0..ticks.enemies {
        spawn_enemy(state);
    }
}

/// One meteor tick: a difficulty-sized batch above the screen
pub fn spawn_meteors(state: &mut GameState) {
    let difficulty = state.scheduler.difficulty();
    let count = state.tuning.hazards_per_spawn(difficulty);
    let now = state.clock.elapsed();
    for _ in 0..count {
        let id = state.next_entity_id();
        let meteor = Meteor::spawn(id, &mut state.rng, &state.tuning, difficulty, now);
        state.meteors.push(meteor);
    }
}

/// One enemy tick: a single ship just above the screen
pub fn spawn_enemy(state: &mut GameState) {
    let margin = state.tuning.enemy_spawn_margin as i32;
    let x = state
        .rng
        .random_range(margin..=(SCREEN_WIDTH as i32 - margin).max(margin)) as f32;
    let pos = Vec2::new(x, state.tuning.enemy_spawn_y);
    let id = state.next_entity_id();
    log::debug!("Enemy {} spawned at x={}", id, x);
    let enemy = EnemyShip::new(id, pos, state.player.pos, &state.tuning);
    state.enemies.push(enemy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn steps(secs: f32) -> u32 {
        (secs / SIM_DT).round() as u32
    }

    #[test]
    fn test_first_meteor_tick_after_one_interval() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning);
        let mut hazards = 0;
        let mut first_at = None;
        for i in 0..steps(1.0) {
            let ticks = scheduler.advance(SIM_DT, &tuning);
            hazards += ticks.hazards;
            if ticks.hazards > 0 && first_at.is_none() {
                first_at = Some(i + 1);
            }
        }
        // 0.6s interval: one at ~0.6s, none before
        assert_eq!(hazards, 1);
        let first = first_at.unwrap();
        assert!((71..=73).contains(&first), "first={first}");
    }

    #[test]
    fn test_enemy_every_five_seconds() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning);
        let enemies: u32 = (0..steps(16.0))
            .map(|_| scheduler.advance(SIM_DT, &tuning).enemies)
            .sum();
        assert_eq!(enemies, 3);
    }

    #[test]
    fn test_ramp_every_eight_seconds() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning);
        assert_eq!(scheduler.ramp(7.9, &tuning), None);
        assert_eq!(scheduler.ramp(8.0, &tuning), Some(2));
        assert_eq!(scheduler.ramp(15.0, &tuning), None);
        assert_eq!(scheduler.ramp(16.0, &tuning), Some(3));
        assert!((scheduler.hazard_interval() - 0.54).abs() < 1e-6);
    }

    #[test]
    fn test_ramp_rearms_meteor_channel() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning);
        // Nearly due
        for _ in 0..steps(0.55) {
            scheduler.advance(SIM_DT, &tuning);
        }
        scheduler.ramp(8.0, &tuning);
        // Re-armed: the new 0.57s interval starts from zero
        let early: u32 = (0..steps(0.5))
            .map(|_| scheduler.advance(SIM_DT, &tuning).hazards)
            .sum();
        assert_eq!(early, 0);
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning::default();
        let mut scheduler = Scheduler::new(&tuning);
        for i in 1..=30 {
            scheduler.ramp(i as f64 * 8.0, &tuning);
        }
        assert_eq!(scheduler.difficulty(), 31);
        assert_eq!(scheduler.hazard_interval(), 0.2);
    }

    #[test]
    fn test_spawn_batches_and_positions() {
        let mut state = GameState::new(42);
        spawn_meteors(&mut state);
        assert_eq!(state.meteors.len(), 1);
        for meteor in &state.meteors {
            let p = meteor.body.pos;
            assert!((0.0..=SCREEN_WIDTH).contains(&p.x));
            assert!((-200.0..=-100.0).contains(&p.y));
        }

        for i in 1..=5 {
            state.scheduler.ramp(i as f64 * 8.0, &state.tuning);
        }
        assert_eq!(state.difficulty(), 6);
        state.meteors.clear();
        spawn_meteors(&mut state);
        assert_eq!(state.meteors.len(), 4);

        spawn_enemy(&mut state);
        let enemy = &state.enemies[0];
        assert!((100.0..=1180.0).contains(&enemy.pos.x));
        assert_eq!(enemy.pos.y, -50.0);
        assert_eq!(enemy.health, 3);
    }
}
