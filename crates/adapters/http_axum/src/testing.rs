//! Stub collaborators for handler tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use chrono::NaiveTime;
use http_body_util::BodyExt;

use voicehome_app::announcer::Announcer;
use voicehome_app::dispatcher::Dispatcher;
use voicehome_app::event_bus::InProcessEventBus;
use voicehome_app::home_store::HomeStore;
use voicehome_app::ports::{
    Clock, JokeError, JokeSource, MediaPlayer, PlaybackError, SpeechSynthesizer, SynthesisError,
    SynthesizerFactory,
};

use crate::state::AppState;

pub(crate) struct SilentSynth;

impl SpeechSynthesizer for SilentSynth {
    async fn speak(&mut self, _text: &str) -> Result<(), SynthesisError> {
        Ok(())
    }
}

pub(crate) struct SilentFactory;

impl SynthesizerFactory for SilentFactory {
    type Synthesizer = SilentSynth;

    fn create(&self) -> Result<SilentSynth, SynthesisError> {
        Ok(SilentSynth)
    }
}

pub(crate) struct StubPlayer;

impl MediaPlayer for StubPlayer {
    async fn play(&self, _title: &str) -> Result<(), PlaybackError> {
        Ok(())
    }
}

pub(crate) struct StubJokes;

impl JokeSource for StubJokes {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        Ok("a test walks into a bar".to_string())
    }
}

pub(crate) struct FixedClock;

impl Clock for FixedClock {
    fn local_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(21, 5, 0).unwrap()
    }
}

pub(crate) type TestState = AppState<StubPlayer, StubJokes, FixedClock>;

/// Must be called from within a tokio runtime.
pub(crate) fn test_state() -> TestState {
    let event_bus = Arc::new(InProcessEventBus::new(64));
    let store = Arc::new(HomeStore::new());
    let (announcer, _worker) = Announcer::spawn(SilentFactory, Arc::clone(&event_bus));
    let dispatcher = Dispatcher::new(
        Arc::clone(&store),
        announcer,
        Arc::clone(&event_bus),
        StubPlayer,
        StubJokes,
        FixedClock,
    );
    AppState::new(Arc::new(dispatcher), store, event_bus)
}

pub(crate) fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
