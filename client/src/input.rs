//! Key routing for the landing window

use crate::bootstrap::Event;
use macroquad::prelude::*;

/// Maps the confirm key to a launch attempt. Every other key is ignored here;
/// text entry and list navigation belong to the landing form.
pub struct InputRouter {
    confirm_key: KeyCode,
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            confirm_key: KeyCode::Enter,
        }
    }

    pub fn route(&self, key: KeyCode) -> Option<Event> {
        (key == self.confirm_key).then_some(Event::LaunchRequested)
    }

    /// Checks the keys pressed this frame
    pub fn poll(&self) -> Option<Event> {
        get_keys_pressed()
            .into_iter()
            .find_map(|key| self.route(key))
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}
