//! Audio collaborator
//!
//! The simulation only raises fire-and-forget triggers. `AudioManager` maps
//! them to sound effects and music control, applies volume and mute, and
//! hands the result to a backend.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Laser,
    /// Something blew up
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Player destroyed
    GameOver,
}

/// Playback backend
pub trait AudioSink {
    /// Play a one-shot effect at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start the looping game music at `volume`
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: Vec<SoundEffect>,
    pub music_playing: bool,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} at {:.2}", effect, volume);
        self.played.push(effect);
    }

    fn start_music(&mut self, volume: f32) {
        log::debug!("Music started at {:.2}", volume);
        self.music_playing = true;
    }

    fn stop_music(&mut self) {
        log::debug!("Music stopped");
        self.music_playing = false;
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 0.1,
            music_volume: 0.01,
            muted: false,
        }
    }

    /// Take volumes and mute from user settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShotFired => self.play(SoundEffect::Laser),
            GameEvent::Explosion { .. } => self.play(SoundEffect::Explosion),
            GameEvent::PowerUpCollected { .. } => self.play(SoundEffect::PowerUp),
            GameEvent::GameOver { .. } => self.play(SoundEffect::GameOver),
            GameEvent::MusicStart => {
                let vol = self.effective(self.music_volume);
                self.sink.start_music(vol);
            }
            GameEvent::MusicStop => self.sink.stop_music(),
            GameEvent::PlayerDamaged { .. } | GameEvent::DifficultyUp { .. } | GameEvent::Quit => {}
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = AudioManager::new(LogSink::default());
        audio.handle(&GameEvent::MusicStart);
        audio.handle(&GameEvent::ShotFired);
        audio.handle(&GameEvent::Explosion { pos: Vec2::ZERO });
        audio.handle(&GameEvent::DifficultyUp { level: 2 });
        assert!(audio.sink().music_playing);
        assert_eq!(
            audio.sink().played,
            vec![SoundEffect::Laser, SoundEffect::Explosion]
        );

        audio.handle(&GameEvent::MusicStop);
        assert!(!audio.sink().music_playing);
    }

    #[test]
    fn test_mute_silences_effects() {
        let mut audio = AudioManager::new(LogSink::default());
        audio.set_muted(true);
        audio.handle(&GameEvent::ShotFired);
        assert!(audio.sink().played.is_empty());
    }

    #[test]
    fn test_settings_applied() {
        let mut audio = AudioManager::new(LogSink::default());
        let settings = Settings {
            sfx_volume: 0.0,
            ..Default::default()
        };
        audio.apply_settings(&settings);
        audio.play(SoundEffect::Laser);
        assert!(audio.sink().played.is_empty());
    }
}
