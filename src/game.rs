//! Frame driver
//!
//! Owns the `GameState`, turns variable frame deltas into fixed simulation
//! steps and routes the events each step raises to audio and persistence.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::*;
use crate::highscores::HighScoreStore;
use crate::platform::{InputState, Key};
use crate::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, MaskSet, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game<S: AudioSink, H: HighScoreStore> {
    state: GameState,
    accumulator: f32,
    input: InputState,
    autopilot: bool,
    audio: AudioManager<S>,
    high_scores: H,
    quit: bool,
    /// Total fixed steps run
    steps: u64,
}

impl<S: AudioSink, H: HighScoreStore> Game<S, H> {
    pub fn new(seed: u64, tuning: Tuning, audio: AudioManager<S>, high_scores: H) -> Self {
        let mut state = GameState::with_tuning(seed, tuning);
        state.high_score = high_scores.load_high_score();
        log::info!("Game created (seed {}, best {})", seed, state.high_score);
        Self {
            state,
            accumulator: 0.0,
            input: InputState::new(),
            autopilot: false,
            audio,
            high_scores,
            quit: false,
            steps: 0,
        }
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    /// Replace the procedural collision masks with asset-derived ones
    pub fn set_masks(&mut self, masks: MaskSet) {
        self.state.masks = masks;
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Run simulation ticks for a frame that took `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.tick_input(self.autopilot);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.steps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_presses();
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            self.audio.handle(&event);
            match event {
                GameEvent::GameOver { score } => self.record_score(score),
                GameEvent::Quit => self.quit = true,
                _ => {}
            }
        }
    }

    fn record_score(&mut self, score: u64) {
        match self.high_scores.submit(score) {
            Ok(best) => self.state.high_score = best,
            Err(e) => {
                log::error!("Failed to save high score {}: {}", score, e);
                self.state.high_score = self.state.high_score.max(score);
            }
        }
    }

    /// Presentation handoff for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn high_scores(&self) -> &H {
        &self.high_scores
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
