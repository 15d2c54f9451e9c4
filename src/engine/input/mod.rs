// Input handling system
//
// Keyboard events from winit are folded into a set of held actions. Once per
// frame the driving actions are read out as a `CarInput` snapshot.
//
// - `action`: driving actions and default key bindings
// - `manager`: held-key tracking

pub mod action;
pub mod manager;

pub use action::Action;
pub use manager::InputManager;
