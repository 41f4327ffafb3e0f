//! Data-driven game balance
//!
//! Every gameplay constant lives here with its shipped default. A JSON file
//! can override any subset of fields; missing keys keep the defaults.
//! All durations are in seconds.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_start_health: i32,
    pub player_max_health: i32,
    pub shoot_cooldown: f32,
    pub invincibility_duration: f32,
    pub weapon_duration: f32,
    pub kills_per_power_up: u32,
    pub double_laser_offset: f32,
    pub triple_laser_offset: f32,

    // === Damage ===
    pub hazard_damage: i32,
    pub enemy_laser_damage: i32,
    pub enemy_contact_damage: i32,

    // === Projectiles ===
    pub laser_speed: f32,
    pub enemy_laser_speed: f32,

    // === Hazards ===
    pub meteor_min_speed: f32,
    pub meteor_max_speed: f32,
    pub meteor_drift: f32,
    pub meteor_min_spin: f32,
    pub meteor_max_spin: f32,
    pub meteor_speed_step: f32,
    pub meteor_speed_cap: f32,
    pub meteors_per_spawn_cap: u32,

    // === Collectibles ===
    pub power_up_speed: f32,
    pub power_up_spin: f32,
    pub power_up_margin: f32,
    pub power_up_spawn_y: f32,

    // === Enemy ship ===
    pub enemy_health: i32,
    pub enemy_speed: f32,
    pub enemy_vertical_speed: f32,
    pub enemy_patrol_distance: f32,
    pub enemy_descent_distance: f32,
    pub zigzag_amplitude: f32,
    pub zigzag_frequency: f32,
    pub enemy_charge_speed: f32,
    pub enemy_charge_cooldown: f32,
    pub enemy_charge_duration: f32,
    pub enemy_shoot_cooldown: f32,
    pub enemy_aim_spread: f32,
    pub enemy_spawn_margin: f32,
    pub enemy_spawn_y: f32,

    // === Scheduling ===
    pub difficulty_interval: f32,
    pub hazard_spawn_interval: f32,
    pub hazard_spawn_interval_min: f32,
    pub hazard_spawn_interval_step: f32,
    pub enemy_spawn_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 300.0,
            player_start_health: 3,
            player_max_health: 5,
            shoot_cooldown: 0.2,
            invincibility_duration: 0.5,
            weapon_duration: 20.0,
            kills_per_power_up: 3,
            double_laser_offset: 15.0,
            triple_laser_offset: 20.0,

            hazard_damage: 1,
            enemy_laser_damage: 1,
            enemy_contact_damage: 2,

            laser_speed: 400.0,
            enemy_laser_speed: 1000.0,

            meteor_min_speed: 200.0,
            meteor_max_speed: 400.0,
            meteor_drift: 0.5,
            meteor_min_spin: 30.0,
            meteor_max_spin: 50.0,
            meteor_speed_step: 0.3,
            meteor_speed_cap: 2.5,
            meteors_per_spawn_cap: 4,

            power_up_speed: 200.0,
            power_up_spin: 100.0,
            power_up_margin: 100.0,
            power_up_spawn_y: -50.0,

            enemy_health: 3,
            enemy_speed: 250.0,
            enemy_vertical_speed: 70.0,
            enemy_patrol_distance: 250.0,
            enemy_descent_distance: 40.0,
            zigzag_amplitude: 120.0,
            zigzag_frequency: 2.5,
            enemy_charge_speed: 500.0,
            enemy_charge_cooldown: 2.5,
            enemy_charge_duration: 0.8,
            enemy_shoot_cooldown: 1.2,
            enemy_aim_spread: 3.0,
            enemy_spawn_margin: 100.0,
            enemy_spawn_y: -50.0,

            difficulty_interval: 8.0,
            hazard_spawn_interval: 0.6,
            hazard_spawn_interval_min: 0.2,
            hazard_spawn_interval_step: 0.03,
            enemy_spawn_interval: 5.0,
        }
    }
}

impl Tuning {
    /// Meteor speed multiplier for a difficulty level (capped)
    pub fn hazard_speed_multiplier(&self, difficulty: u32) -> f32 {
        let steps = difficulty.saturating_sub(1) as f32;
        (1.0 + steps * self.meteor_speed_step).min(self.meteor_speed_cap)
    }

    /// Meteors emitted per hazard spawn tick (capped)
    pub fn hazards_per_spawn(&self, difficulty: u32) -> u32 {
        (1 + difficulty / 2).min(self.meteors_per_spawn_cap)
    }

    /// Hazard spawn interval after the difficulty ramp, floored
    pub fn hazard_interval(&self, difficulty: u32) -> f32 {
        let steps = difficulty.saturating_sub(1) as f32;
        (self.hazard_spawn_interval - steps * self.hazard_spawn_interval_step)
            .max(self.hazard_spawn_interval_min)
    }

    /// Load tuning overrides from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&text)?;
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
