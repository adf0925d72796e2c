//! Event: an immutable notification pushed to real-time observers.
//!
//! Events are produced when the listening status changes, the home state
//! changes, the assistant says something, or a song is requested.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::announcement::Announcement;
use crate::color::Color;
use crate::home::HomeState;
use crate::id::EventId;
use crate::listening::ListeningStatus;
use crate::room::Room;
use crate::time::{Timestamp, now};

/// What happened. The serialized `type` is the observer-facing event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Notification {
    /// The listening loop entered a new phase.
    ListeningStatus { status: ListeningStatus },
    /// Full home-state snapshot, not a delta.
    UpdateLights(HomeState),
    /// Every room's background color.
    UpdateAllBackgrounds(BTreeMap<Room, Color>),
    /// The assistant announced something.
    AssistantResponse { text: String },
    /// A song should start playing on the client.
    PlayRequest { song: String },
}

impl Notification {
    /// Observer-facing event name (`listening_status`, `update_lights`, …).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListeningStatus { .. } => "listening_status",
            Self::UpdateLights(_) => "update_lights",
            Self::UpdateAllBackgrounds(_) => "update_all_backgrounds",
            Self::AssistantResponse { .. } => "assistant_response",
            Self::PlayRequest { .. } => "play_request",
        }
    }

    /// Payload without the `type` tag.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be encoded (should
    /// not happen for these plain types).
    pub fn data(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::ListeningStatus { status } => {
                Ok(serde_json::json!({ "status": status }))
            }
            Self::UpdateLights(state) => serde_json::to_value(state),
            Self::UpdateAllBackgrounds(colors) => serde_json::to_value(colors),
            Self::AssistantResponse { text } => Ok(serde_json::json!({ "text": text })),
            Self::PlayRequest { song } => Ok(serde_json::json!({ "song": song })),
        }
    }
}

/// A notification stamped with an id and a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub notification: Notification,
}

impl Event {
    /// Stamp a notification with a fresh id and the current time.
    #[must_use]
    pub fn new(notification: Notification) -> Self {
        Self {
            id: EventId::new(),
            timestamp: now(),
            notification,
        }
    }

    #[must_use]
    pub fn listening_status(status: ListeningStatus) -> Self {
        Self::new(Notification::ListeningStatus { status })
    }

    #[must_use]
    pub fn update_lights(state: HomeState) -> Self {
        Self::new(Notification::UpdateLights(state))
    }

    #[must_use]
    pub fn update_all_backgrounds(colors: BTreeMap<Room, Color>) -> Self {
        Self::new(Notification::UpdateAllBackgrounds(colors))
    }

    #[must_use]
    pub fn assistant_response(announcement: &Announcement) -> Self {
        Self::new(Notification::AssistantResponse {
            text: announcement.text().to_string(),
        })
    }

    #[must_use]
    pub fn play_request(song: impl Into<String>) -> Self {
        Self::new(Notification::PlayRequest { song: song.into() })
    }

    /// Shorthand for [`Notification::name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.notification.name()
    }
}
