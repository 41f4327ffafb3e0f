//! Keyboard input collected between frames

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    R,
    Q,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Space" => Some(Key::Space),
            "Escape" => Some(Key::Escape),
            "r" | "R" => Some(Key::R),
            "q" | "Q" => Some(Key::Q),
            _ => None,
        }
    }
}

/// Held keys plus the key-down presses since the last tick
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    presses: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // Auto-repeat is not a new press
        if !self.held.insert(key) {
            return;
        }
        match key {
            Key::Space => {
                self.presses.start = true;
                self.presses.fire = true;
            }
            Key::Escape => self.presses.pause = true,
            Key::R => self.presses.restart = true,
            Key::Q => self.presses.quit = true,
            Key::Left | Key::Right | Key::Up | Key::Down => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Input for the next tick: held movement plus pending presses
    pub fn tick_input(&self, autopilot: bool) -> TickInput {
        TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            autopilot,
            ..self.presses.clone()
        }
    }

    /// Forget presses once a tick has consumed them
    pub fn clear_presses(&mut self) {
        self.presses = TickInput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presses_are_one_shot() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.key_down(Key::Left);
        let tick = input.tick_input(false);
        assert!(tick.fire && tick.start && tick.left);

        input.clear_presses();
        let tick = input.tick_input(false);
        assert!(!tick.fire && !tick.start);
        // Held keys stay
        assert!(tick.left);
    }

    #[test]
    fn test_repeat_is_not_a_press() {
        let mut input = InputState::new();
        input.key_down(Key::Escape);
        input.clear_presses();
        input.key_down(Key::Escape);
        assert!(!input.tick_input(false).pause);

        input.key_up(Key::Escape);
        input.key_down(Key::Escape);
        assert!(input.tick_input(false).pause);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_name("x"), None);
    }
}
