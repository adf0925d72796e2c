//! Home state store: the single in-memory copy of the home.
//!
//! The voice loop and the HTTP endpoint can both dispatch commands, so every
//! read-check-write happens under one mutex. `set_light` reports whether the
//! value changed from inside the critical section, which is what the
//! dispatcher uses to choose between "turning on" and "already on".

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use voicehome_domain::color::Color;
use voicehome_domain::home::HomeState;
use voicehome_domain::room::Room;

/// Mutex-guarded [`HomeState`].
#[derive(Default)]
pub struct HomeStore {
    state: Mutex<HomeState>,
}

impl HomeStore {
    /// Create a store holding the initial state (lights off, white, no song).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> HomeState {
        self.lock().clone()
    }

    /// Set one light. Returns `true` when the light actually flipped.
    pub fn set_light(&self, room: Room, on: bool) -> bool {
        self.lock().set_light(room, on)
    }

    /// Set every light at once. Returns how many lights flipped.
    pub fn set_all_lights(&self, on: bool) -> usize {
        let mut state = self.lock();
        Room::ALL
            .into_iter()
            .filter(|room| state.set_light(*room, on))
            .count()
    }

    pub fn set_song(&self, title: impl Into<String>) {
        self.lock().current_song = Some(title.into());
    }

    pub fn set_color(&self, room: Room, color: Color) {
        self.lock().background_color.insert(room, color);
    }

    /// Copy of the room → color mapping.
    #[must_use]
    pub fn colors(&self) -> BTreeMap<Room, Color> {
        self.lock().background_color.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HomeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
