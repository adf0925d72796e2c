//! Keyword rules, evaluated in order; the first rule that matches wins.
//!
//! Matching is plain substring search on the lowercased utterance, so the
//! order of [`RULES`] and [`ROOM_ALIASES`] is part of the behaviour: "turn on
//! the living room light in the kitchen doorway" targets the kitchen.

use voicehome_domain::room::Room;

/// What an utterance asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Switch every light. `on` is true iff the text contains "on".
    AllLights { on: bool },
    /// Switch one light. `on` is `None` when the text says neither "on" nor "off".
    Light {
        room: Room,
        alias: &'static str,
        on: Option<bool>,
    },
    /// Play a song. `title` is `None` when nothing is left after removing "play".
    Play { title: Option<String> },
    Time,
    Joke,
    /// No rule matched.
    Unknown,
}

/// A named entry of the rule table.
pub struct CommandRule {
    pub name: &'static str,
    pub matches: fn(&str) -> Option<Intent>,
}

/// The rule table, in priority order.
pub const RULES: &[CommandRule] = &[
    CommandRule {
        name: "all_lights",
        matches: all_lights,
    },
    CommandRule {
        name: "named_light",
        matches: named_light,
    },
    CommandRule {
        name: "play",
        matches: play,
    },
    CommandRule {
        name: "time",
        matches: time,
    },
    CommandRule {
        name: "joke",
        matches: joke,
    },
];

/// Spoken room names, in the order they are searched for.
pub const ROOM_ALIASES: [(&str, Room); 4] = [
    ("kitchen", Room::Kitchen),
    ("dining", Room::Dining),
    ("living room", Room::LivingRoom),
    ("livingroom", Room::LivingRoom),
];

/// Run the rule table against a lowercased, trimmed utterance.
///
/// Returns the name of the matching rule (`"fallback"` when none matched)
/// together with the intent.
#[must_use]
pub fn match_command(text: &str) -> (&'static str, Intent) {
    RULES
        .iter()
        .find_map(|rule| (rule.matches)(text).map(|intent| (rule.name, intent)))
        .unwrap_or(("fallback", Intent::Unknown))
}

fn all_lights(text: &str) -> Option<Intent> {
    text.contains("all lights").then(|| Intent::AllLights {
        on: text.contains("on"),
    })
}

fn named_light(text: &str) -> Option<Intent> {
    let (alias, room) = ROOM_ALIASES
        .into_iter()
        .find(|(alias, _)| text.contains(*alias))?;
    let on = if text.contains("on") {
        Some(true)
    } else if text.contains("off") {
        Some(false)
    } else {
        None
    };
    Some(Intent::Light { room, alias, on })
}

fn play(text: &str) -> Option<Intent> {
    if !text.contains("play") {
        return None;
    }
    let title = text.replace("play", "");
    let title = title.trim();
    Some(Intent::Play {
        title: (!title.is_empty()).then(|| title.to_string()),
    })
}

fn time(text: &str) -> Option<Intent> {
    text.contains("time").then_some(Intent::Time)
}

fn joke(text: &str) -> Option<Intent> {
    text.contains("joke").then_some(Intent::Joke)
}
