//! Keyboard handling.

use winit::{
    event::ElementState,
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Close,
}

/// Maps a key transition to an application action.
///
/// Only the press of ESC does anything; releases and repeats of other keys
/// are ignored.
pub fn action_for_key(key: PhysicalKey, state: ElementState) -> Option<Action> {
    match (key, state) {
        (PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed) => Some(Action::Close),
        _ => None,
    }
}
