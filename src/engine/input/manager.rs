// Input manager - tracks held keys and maps them to driving actions

use super::action::{default_bindings, Action};
use crate::game::car::CarInput;
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Held-key state for the driver
pub struct InputManager {
    /// Key to action lookup
    bindings: HashMap<KeyCode, Action>,

    /// Actions currently held down
    pressed: HashSet<Action>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state);
        }
    }

    fn set_key(&mut self, key_code: KeyCode, state: ElementState) {
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                self.pressed.insert(action);
            }
            ElementState::Released => {
                self.pressed.remove(&action);
            }
        }
    }

    /// Check if an action is held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Whether the quit key is held
    pub fn quit_requested(&self) -> bool {
        self.is_pressed(Action::Quit)
    }

    /// Snapshot of the driving keys for this frame.
    /// Conflicting keys are passed through; the car resolves precedence.
    pub fn car_input(&self) -> CarInput {
        CarInput {
            accelerate: self.is_pressed(Action::Accelerate),
            brake: self.is_pressed(Action::Brake),
            steer_left: self.is_pressed(Action::SteerLeft),
            steer_right: self.is_pressed(Action::SteerRight),
        }
    }

    /// Release every key, e.g. when the window loses focus
    pub fn reset_all(&mut self) {
        self.pressed.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_starts_idle() {
        let manager = InputManager::new();
        assert_eq!(manager.car_input(), CarInput::default());
        assert!(!manager.quit_requested());
    }

    #[test]
    fn test_press_and_release() {
        let mut manager = InputManager::new();

        manager.set_key(KeyCode::ArrowUp, ElementState::Pressed);
        assert!(manager.is_pressed(Action::Accelerate));
        assert!(manager.car_input().accelerate);

        manager.set_key(KeyCode::ArrowUp, ElementState::Released);
        assert!(!manager.is_pressed(Action::Accelerate));
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut manager = InputManager::new();
        manager.set_key(KeyCode::KeyW, ElementState::Pressed);
        assert_eq!(manager.car_input(), CarInput::default());
    }

    #[test]
    fn test_conflicting_keys_both_reported() {
        let mut manager = InputManager::new();
        manager.set_key(KeyCode::ArrowLeft, ElementState::Pressed);
        manager.set_key(KeyCode::ArrowRight, ElementState::Pressed);

        let input = manager.car_input();
        assert!(input.steer_left);
        assert!(input.steer_right);
    }

    #[test]
    fn test_escape_requests_quit() {
        let mut manager = InputManager::new();
        manager.set_key(KeyCode::Escape, ElementState::Pressed);
        assert!(manager.quit_requested());
    }

    #[test]
    fn test_reset_all() {
        let mut manager = InputManager::new();
        manager.set_key(KeyCode::ArrowUp, ElementState::Pressed);
        manager.set_key(KeyCode::ArrowLeft, ElementState::Pressed);

        manager.reset_all();
        assert_eq!(manager.car_input(), CarInput::default());
    }
}
