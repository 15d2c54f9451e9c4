// Driving action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Driving
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,

    // Meta actions
    Quit,
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowUp, Action::Accelerate),
        (KeyCode::ArrowDown, Action::Brake),
        (KeyCode::ArrowLeft, Action::SteerLeft),
        (KeyCode::ArrowRight, Action::SteerRight),
        (KeyCode::Escape, Action::Quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_drive() {
        let bindings = default_bindings();
        let action_for = |key| {
            bindings
                .iter()
                .find(|(code, _)| *code == key)
                .map(|(_, action)| *action)
        };

        assert_eq!(action_for(KeyCode::ArrowUp), Some(Action::Accelerate));
        assert_eq!(action_for(KeyCode::ArrowDown), Some(Action::Brake));
        assert_eq!(action_for(KeyCode::ArrowLeft), Some(Action::SteerLeft));
        assert_eq!(action_for(KeyCode::ArrowRight), Some(Action::SteerRight));
        assert_eq!(action_for(KeyCode::Escape), Some(Action::Quit));
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in default_bindings() {
            assert!(seen.insert(key), "Duplicate key found in bindings");
        }
    }
}
