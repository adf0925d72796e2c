//! Home state: the lights, the current song, and the room colors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::room::Room;

/// Snapshot of the whole home.
///
/// The three light switches are plain fields so the set of switches can never
/// grow or shrink. The serialized form is the `update_lights` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeState {
    pub kitchen_light: bool,
    pub dining_light: bool,
    pub living_room_light: bool,
    pub current_song: Option<String>,
    pub background_color: BTreeMap<Room, Color>,
}

impl Default for HomeState {
    /// All lights off, no song, every room white.
    fn default() -> Self {
        Self {
            kitchen_light: false,
            dining_light: false,
            living_room_light: false,
            current_song: None,
            background_color: Room::ALL
                .into_iter()
                .map(|room| (room, Color::default()))
                .collect(),
        }
    }
}

impl HomeState {
    /// Whether the light in `room` is on.
    #[must_use]
    pub fn light(&self, room: Room) -> bool {
        match room {
            Room::Kitchen => self.kitchen_light,
            Room::Dining => self.dining_light,
            Room::LivingRoom => self.living_room_light,
        }
    }

    /// Set the light in `room`, returning `true` when the value changed.
    pub fn set_light(&mut self, room: Room, on: bool) -> bool {
        let slot = match room {
            Room::Kitchen => &mut self.kitchen_light,
            Room::Dining => &mut self.dining_light,
            Room::LivingRoom => &mut self.living_room_light,
        };
        let changed = *slot != on;
        *slot = on;
        changed
    }

    /// Number of lights currently on.
    #[must_use]
    pub fn lights_on(&self) -> usize {
        Room::ALL.into_iter().filter(|room| self.light(*room)).count()
    }

    /// Background color of `room`.
    #[must_use]
    pub fn color(&self, room: Room) -> Color {
        self.background_color.get(&room).cloned().unwrap_or_default()
    }
}
