//! Keyboard and mouse bindings
//!
//! Action-based key configuration: every editor action maps to a key through
//! a bindings table, so the defaults are configuration rather than hardcoded
//! into the loop.

use std::collections::HashMap;

use macroquad::prelude::{vec2, KeyCode, Vec2};

/// Editor actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    Quit,
}

/// Pan actions paired with their world-space direction vectors
pub const PAN_DIRECTIONS: [(Action, Vec2); 4] = [
    (Action::PanLeft, vec2(-1.0, 0.0)),
    (Action::PanRight, vec2(1.0, 0.0)),
    (Action::PanUp, vec2(0.0, -1.0)),
    (Action::PanDown, vec2(0.0, 1.0)),
];

/// Digit keys selecting tile ids 0-9
pub const TILE_KEYS: [KeyCode; 10] = [
    KeyCode::Key0,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Configuration map from action to key
pub struct KeyBindings {
    map: HashMap<Action, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Action::PanLeft, KeyCode::A);
        map.insert(Action::PanRight, KeyCode::D);
        map.insert(Action::PanUp, KeyCode::W);
        map.insert(Action::PanDown, KeyCode::S);
        map.insert(Action::Quit, KeyCode::Escape);
        Self { map }
    }
}

impl KeyBindings {
    /// Key bound to an action, if any
    pub fn key(&self, action: Action) -> Option<KeyCode> {
        self.map.get(&action).copied()
    }
}
