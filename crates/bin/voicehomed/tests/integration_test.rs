//! End-to-end smoke tests for the full voicehomed stack.
//!
//! Each test wires the real store, event bus, announcer, dispatcher and axum
//! router together with the virtual adapters, and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`. No TCP port is bound and no stdin is read.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::broadcast;
use tower::ServiceExt;

use voicehome_adapter_http_axum::router;
use voicehome_adapter_http_axum::state::AppState;
use voicehome_adapter_virtual::{
    BuiltinJokes, ConsoleSynthesizerFactory, LineRecognizer, LocalClock, LoggingMediaPlayer,
    VoiceSettings,
};
use voicehome_app::announcer::{Announcer, SynthesisWorker};
use voicehome_app::dispatcher::Dispatcher;
use voicehome_app::event_bus::InProcessEventBus;
use voicehome_app::home_store::HomeStore;
use voicehome_app::listening_loop::{ListenSettings, ListeningLoop};
use voicehome_domain::event::{Event, Notification};
use voicehome_domain::listening::ListeningStatus;

type Stack = Dispatcher<Arc<InProcessEventBus>, LoggingMediaPlayer, BuiltinJokes, LocalClock>;

struct App {
    router: axum::Router,
    dispatcher: Arc<Stack>,
    store: Arc<HomeStore>,
    events: broadcast::Receiver<Event>,
    synthesis: SynthesisWorker,
}

/// Build a fully-wired stack with a fast console voice.
fn app() -> App {
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let events = event_bus.subscribe();
    let store = Arc::new(HomeStore::new());
    let (announcer, synthesis) = Announcer::spawn(
        ConsoleSynthesizerFactory::new(VoiceSettings {
            words_per_minute: 60_000,
            ..VoiceSettings::default()
        }),
        Arc::clone(&event_bus),
    );
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        announcer,
        Arc::clone(&event_bus),
        LoggingMediaPlayer,
        BuiltinJokes::default(),
        LocalClock,
    ));
    let state = AppState::new(Arc::clone(&dispatcher), Arc::clone(&store), event_bus);

    App {
        router: router::build(state),
        dispatcher,
        store,
        events,
        synthesis,
    }
}

fn command(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/command")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "command": text }).to_string(),
        ))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn drain(events: &mut broadcast::Receiver<Event>) -> Vec<Notification> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event.notification);
    }
    seen
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_turn_on_light_and_report_state() {
    let mut app = app();

    let resp = app
        .router
        .clone()
        .oneshot(command("turn on the living room light"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "success");

    let resp = app
        .router
        .oneshot(
            Request::builder()
                .uri("/api/state")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let state = body_json(resp).await;
    assert_eq!(state["living_room_light"], true);
    assert_eq!(state["kitchen_light"], false);

    let seen = drain(&mut app.events);
    assert!(matches!(seen[0], Notification::UpdateLights(_)));
    assert_eq!(
        seen[1],
        Notification::AssistantResponse {
            text: "Turning on living room light".to_string()
        }
    );
}

#[tokio::test]
async fn should_request_playback_and_remember_song() {
    let mut app = app();

    app.router
        .oneshot(command("Play Bohemian Rhapsody"))
        .await
        .unwrap();

    assert_eq!(
        app.store.snapshot().current_song.as_deref(),
        Some("bohemian rhapsody")
    );
    let seen = drain(&mut app.events);
    assert!(seen.contains(&Notification::PlayRequest {
        song: "bohemian rhapsody".to_string()
    }));
    assert!(seen.contains(&Notification::AssistantResponse {
        text: "Playing bohemian rhapsody".to_string()
    }));
}

#[tokio::test]
async fn should_tell_a_builtin_joke() {
    let mut app = app();

    app.router.oneshot(command("tell me a joke")).await.unwrap();

    let seen = drain(&mut app.events);
    let [Notification::AssistantResponse { text }] = seen.as_slice() else {
        panic!("expected exactly one spoken reply, got {seen:?}");
    };
    assert!(text.starts_with("Here's a joke: "));
}

#[tokio::test]
async fn should_speak_every_reply_before_shutdown_completes() {
    let app = app();

    for text in ["turn on all lights", "what time is it", "do a barrel roll"] {
        app.router.clone().oneshot(command(text)).await.unwrap();
    }

    let report = app
        .synthesis
        .shutdown(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(report.spoken, 3);
    assert_eq!(report.failed, 0);
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_change_room_color() {
    let app = app();

    let resp = app
        .router
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/rooms/kitchen/color")
                .header("content-type", "application/json")
                .body(Body::from(r##"{"color":"#00ff00"}"##))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["background_color"]["kitchen"],
        "#00ff00"
    );
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_dashboard() {
    let resp = app()
        .router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("Home Dashboard"));
    assert!(body.contains("<form"));
}

// ---------------------------------------------------------------------------
// Voice
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_dispatch_spoken_line_through_listening_loop() {
    let mut app = app();
    let settings = ListenSettings {
        calibration: Duration::ZERO,
        timeout: Duration::from_millis(200),
        phrase_limit: Duration::from_millis(200),
        pause: Duration::ZERO,
    };
    let mut listening = ListeningLoop::new(
        LineRecognizer::new(&b"Turn off all lights\n"[..]),
        Arc::clone(&app.dispatcher),
        settings,
    );

    listening.run_once().await;

    assert_eq!(listening.status(), ListeningStatus::Idle);
    let seen = drain(&mut app.events);
    assert_eq!(
        seen.first(),
        Some(&Notification::ListeningStatus {
            status: ListeningStatus::Listening
        })
    );
    assert!(seen.contains(&Notification::AssistantResponse {
        text: "Turning off all lights".to_string()
    }));
    assert_eq!(
        seen.last(),
        Some(&Notification::ListeningStatus {
            status: ListeningStatus::Idle
        })
    );
}
