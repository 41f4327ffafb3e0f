//! Game state and core simulation types
//!
//! One `GameState` is owned by the driver and handed to `tick` every
//! fixed step. Entity collections are plain vectors kept in spawn order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::collectible::{PowerUp, PowerUpKind};
use super::effects::{Explosion, Star, scatter_stars};
use super::enemy::EnemyShip;
use super::hazard::Meteor;
use super::mask::MaskSet;
use super::player::Player;
use super::projectile::{Owner, Projectile};
use super::spawn::Scheduler;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for Space
    StartMenu,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, clock accounting paused time
    Paused,
    /// Player destroyed; waiting for restart
    GameOver,
}

/// Side effects of a tick, drained by the driver each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired (one event per volley)
    ShotFired,
    /// An explosion started at `pos`
    Explosion { pos: Vec2 },
    MusicStart,
    MusicStop,
    PlayerDamaged { health: i32 },
    PowerUpCollected { kind: PowerUpKind },
    DifficultyUp { level: u32 },
    GameOver { score: u64 },
    /// Quit requested from the start menu
    Quit,
}

/// Category tag for every entity collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityCategory {
    Player,
    Star,
    Meteor,
    Enemy,
    PlayerLaser,
    EnemyLaser,
    PowerUp,
    Explosion,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 8] = [
        EntityCategory::Player,
        EntityCategory::Star,
        EntityCategory::Meteor,
        EntityCategory::Enemy,
        EntityCategory::PlayerLaser,
        EntityCategory::EnemyLaser,
        EntityCategory::PowerUp,
        EntityCategory::Explosion,
    ];

    /// Entities of this category are kept when a session restarts
    pub fn survives_reset(self) -> bool {
        matches!(self, EntityCategory::Player | EntityCategory::Star)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub masks: MaskSet,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Active meteors (spawn order)
    pub meteors: Vec<Meteor>,
    pub enemies: Vec<EnemyShip>,
    /// Player and enemy lasers
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    /// Visual only
    pub explosions: Vec<Explosion>,
    /// Visual only, created once
    pub stars: Vec<Star>,
    pub scheduler: Scheduler,
    pub clock: SessionClock,
    /// Best score known to the persistence layer
    pub high_score: u64,
    /// Score captured at the moment of death
    pub final_score: Option<u64>,
    /// Events raised since the driver last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = scatter_stars(&mut rng, STAR_COUNT);
        Self {
            seed,
            player: Player::new(&tuning),
            scheduler: Scheduler::new(&tuning),
            tuning,
            masks: MaskSet::default(),
            rng,
            phase: GamePhase::StartMenu,
            meteors: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            stars,
            clock: SessionClock::new(),
            high_score: 0,
            final_score: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current score: live while playing, frozen after game over
    pub fn score(&self) -> u64 {
        self.final_score.unwrap_or_else(|| self.clock.score())
    }

    pub fn difficulty(&self) -> u32 {
        self.scheduler.difficulty()
    }

    /// Number of live entities in a category
    pub fn count(&self, category: EntityCategory) -> usize {
        match category {
            EntityCategory::Player => 1,
            EntityCategory::Star => self.stars.len(),
            EntityCategory::Meteor => self.meteors.len(),
            EntityCategory::Enemy => self.enemies.len(),
            EntityCategory::PlayerLaser => self.lasers_of(Owner::Player),
            EntityCategory::EnemyLaser => self.lasers_of(Owner::Enemy),
            EntityCategory::PowerUp => self.power_ups.len(),
            EntityCategory::Explosion => self.explosions.len(),
        }
    }

    fn lasers_of(&self, owner: Owner) -> usize {
        self.projectiles.iter().filter(|p| p.owner == owner).count()
    }

    /// Remove every entity of a category. Survivors are left alone.
    pub fn clear_category(&mut self, category: EntityCategory) {
        if category.survives_reset() {
            return;
        }
        match category {
            EntityCategory::Player | EntityCategory::Star => {}
            EntityCategory::Meteor => self.meteors.clear(),
            EntityCategory::Enemy => self.enemies.clear(),
            EntityCategory::PlayerLaser => self.projectiles.retain(|p| p.owner != Owner::Player),
            EntityCategory::EnemyLaser => self.projectiles.retain(|p| p.owner != Owner::Enemy),
            EntityCategory::PowerUp => self.power_ups.clear(),
            EntityCategory::Explosion => self.explosions.clear(),
        }
    }

    /// Start a fresh session: clear transient entities, reset the player,
    /// the clock and the scheduler
    pub fn reset_session(&mut self) {
        for category in EntityCategory::ALL {
            self.clear_category(category);
        }
        self.player = Player::new(&self.tuning);
        self.scheduler = Scheduler::new(&self.tuning);
        self.clock = SessionClock::new();
        self.final_score = None;
    }

    /// Start an explosion animation and raise its sound trigger
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        self.explosions.push(Explosion::new(pos));
        self.events.push(GameEvent::Explosion { pos });
    }

    /// Drop a random power-up near the top of the screen
    pub fn spawn_power_up(&mut self) {
        let id = self.next_entity_id();
        let now = self.clock.elapsed();
        let power_up = PowerUp::spawn(id, &mut self.rng, &self.tuning, now);
        log::debug!("Power-up {:?} dropped at x={}", power_up.kind, power_up.body.pos.x);
        self.power_ups.push(power_up);
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::StartMenu);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert_eq!(state.difficulty(), 1);
        assert_eq!(state.player.health, 3);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_reset_keeps_only_survivors() {
        let mut state = GameState::new(5);
        let stars_before: Vec<Vec2> = state.stars.iter().map(|s| s.pos).collect();

        let id = state.next_entity_id();
        state.meteors.push(Meteor::new(id, Vec2::new(10.0, 10.0), Vec2::Y, 0.0, 0.0));
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::player_laser(id, Vec2::new(100.0, 100.0), 400.0, 0.0));
        state.spawn_power_up();
        state.spawn_explosion(Vec2::ZERO);
        state.player.health = 1;
        state.player.pos = Vec2::new(5.0, 5.0);
        state.final_score = Some(99);

        state.reset_session();

        for category in EntityCategory::ALL {
            if !category.survives_reset() {
                assert_eq!(state.count(category), 0, "{category:?}");
            }
        }
        let stars_after: Vec<Vec2> = state.stars.iter().map(|s| s.pos).collect();
        assert_eq!(stars_before, stars_after);
        assert_eq!(state.player.health, 3);
        assert_eq!(state.player.pos, Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0));
        assert_eq!(state.final_score, None);
    }

    #[test]
    fn test_explosion_raises_event() {
        let mut state = GameState::new(2);
        state.spawn_explosion(Vec2::new(3.0, 4.0));
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Explosion {
                pos: Vec2::new(3.0, 4.0)
            }]
        );
        assert!(state.events.is_empty());
    }
}
