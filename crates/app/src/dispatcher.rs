//! Command dispatcher: turns an utterance into at most one state change and
//! a short sequence of announcements.
//!
//! Matching lives in [`rules`] and is pure. This module applies the matched
//! [`Intent`]: it mutates the [`HomeStore`], publishes observer events, talks
//! to the media player and the joke source, and hands announcements to the
//! [`Announcer`] as soon as they are decided. Collaborator failures are logged and
//! replaced by a fallback announcement; `dispatch` never fails.

pub mod rules;

use std::sync::Arc;

use voicehome_domain::announcement::Announcement;
use voicehome_domain::event::Event;
use voicehome_domain::room::Room;
use voicehome_domain::time::spoken_time;

use crate::announcer::Announcer;
use crate::home_store::HomeStore;
use crate::ports::{Clock, EventPublisher, JokeSource, MediaPlayer};

pub use rules::{Intent, match_command};

const FALLBACK: &str =
    "I'm not sure how to handle that command. Try 'turn on kitchen light' or 'play music'";
const PLAYBACK_FAILED: &str = "Sorry, I couldn't play that song";
const JOKE_FAILED: &str = "Sorry, I couldn't think of a joke right now";

/// A mutation applied to the home state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    AllLights { on: bool },
    Light { room: Room, on: bool },
    Song(String),
}

/// Everything a single dispatch did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub change: Option<StateChange>,
    /// Announcements in the order they were queued.
    pub announcements: Vec<Announcement>,
    pub play_request: Option<String>,
}

/// Applies keyword rules to the home.
pub struct Dispatcher<P, M, J, C> {
    store: Arc<HomeStore>,
    announcer: Announcer<P>,
    publisher: P,
    media: M,
    jokes: J,
    clock: C,
}

impl<P, M, J, C> Dispatcher<P, M, J, C>
where
    P: EventPublisher,
    M: MediaPlayer,
    J: JokeSource,
    C: Clock,
{
    /// Create a dispatcher over a shared store.
    pub fn new(
        store: Arc<HomeStore>,
        announcer: Announcer<P>,
        publisher: P,
        media: M,
        jokes: J,
        clock: C,
    ) -> Self {
        Self {
            store,
            announcer,
            publisher,
            media,
            jokes,
            clock,
        }
    }

    #[must_use]
    pub fn store(&self) -> &HomeStore {
        &self.store
    }

    #[must_use]
    pub fn announcer(&self) -> &Announcer<P> {
        &self.announcer
    }

    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Handle one utterance.
    ///
    /// The text is trimmed and lowercased first; an empty utterance does
    /// nothing at all.
    pub async fn dispatch(&self, command: &str) -> DispatchResult {
        let text = command.trim().to_lowercase();
        if text.is_empty() {
            return DispatchResult::default();
        }

        let (rule, intent) = match_command(&text);
        tracing::info!(command = %text, rule, "processing command");

        let mut result = DispatchResult::default();
        self.apply(intent, &mut result).await;
        result
    }

    async fn apply(&self, intent: Intent, result: &mut DispatchResult) {
        match intent {
            Intent::AllLights { on } => {
                // Announced even when every light already matched.
                self.store.set_all_lights(on);
                self.publish_lights();
                result.change = Some(StateChange::AllLights { on });
                self.say(result, format!("Turning {} all lights", on_off(on)));
            }
            Intent::Light {
                room,
                alias,
                on: Some(on),
            } => {
                if self.store.set_light(room, on) {
                    self.publish_lights();
                    result.change = Some(StateChange::Light { room, on });
                    self.say(result, format!("Turning {} {alias} light", on_off(on)));
                } else {
                    self.say(result, format!("The {alias} light is already {}", on_off(on)));
                }
            }
            Intent::Light { alias, on: None, .. } => {
                tracing::debug!(alias, "room named without on/off, ignoring");
            }
            Intent::Play { title: None } => {}
            Intent::Play { title: Some(title) } => self.play(title, result).await,
            Intent::Time => {
                let now = spoken_time(self.clock.local_time());
                self.say(result, format!("The current time is {now}"));
            }
            Intent::Joke => match self.jokes.fetch_joke().await {
                Ok(joke) => self.say(result, format!("Here's a joke: {joke}")),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to fetch a joke");
                    self.say(result, JOKE_FAILED);
                }
            },
            Intent::Unknown => self.say(result, FALLBACK),
        }
    }

    /// The confirmation is queued before the player is asked, so a slow or
    /// failing player only ever adds a follow-up apology.
    async fn play(&self, title: String, result: &mut DispatchResult) {
        self.store.set_song(title.clone());
        result.change = Some(StateChange::Song(title.clone()));
        self.say(result, format!("Playing {title}"));

        self.publisher.publish(Event::play_request(title.clone()));
        result.play_request = Some(title.clone());

        if let Err(err) = self.media.play(&title).await {
            tracing::error!(error = %err, song = %title, "playback failed");
            self.say(result, PLAYBACK_FAILED);
        }
    }

    fn say(&self, result: &mut DispatchResult, text: impl Into<String>) {
        let announcement = Announcement::new(text);
        self.announcer.announce(announcement.clone());
        result.announcements.push(announcement);
    }

    fn publish_lights(&self) {
        self.publisher
            .publish(Event::update_lights(self.store.snapshot()));
    }
}

impl<P, M, J, C> Dispatcher<P, M, J, C>
where
    P: EventPublisher + Send + Sync + 'static,
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Like [`Dispatcher::dispatch`], but on a task of its own.
    ///
    /// Dropping the returned future does not interrupt the command: once
    /// called, the dispatch always runs to completion.
    pub async fn dispatch_detached(self: Arc<Self>, command: String) -> DispatchResult {
        let task = tokio::spawn(async move { self.dispatch(&command).await });
        match task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "dispatch task failed");
                DispatchResult::default()
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
