//! Server-Sent Events (SSE) stream of observer notifications.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use voicehome_app::ports::{Clock, JokeSource, MediaPlayer};
use voicehome_domain::event::Event;

use crate::state::AppState;

/// `GET /api/events/stream`: SSE stream of home events.
///
/// A new subscriber first receives the current `update_lights` and
/// `update_all_backgrounds` snapshots, then every event published on the bus.
/// Each frame carries the notification kind as the SSE event name, the event
/// id as the SSE id, and the JSON payload as data.
pub async fn stream<M, J, C>(
    State(state): State<AppState<M, J, C>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    // Subscribe before snapshotting so no change falls in between.
    let event_rx = state.event_bus.subscribe();
    let initial = vec![
        Event::update_lights(state.store.snapshot()),
        Event::update_all_backgrounds(state.store.colors()),
    ];
    tracing::debug!(
        observers = state.event_bus.observer_count(),
        "observer connected"
    );

    let live = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => Some(event),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(
                skipped = n,
                "SSE subscriber lagged, some events were dropped"
            );
            None
        }
    });

    let frames = tokio_stream::iter(initial)
        .chain(live)
        .filter_map(|event| to_frame(&event).map(Ok));

    Sse::new(frames).keep_alive(KeepAlive::default())
}

fn to_frame(event: &Event) -> Option<SseEvent> {
    match event.notification.data() {
        Ok(data) => Some(
            SseEvent::default()
                .event(event.name())
                .id(event.id.to_string())
                .data(data.to_string()),
        ),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize event to JSON for SSE stream");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::router;
    use crate::testing::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use voicehome_app::ports::EventPublisher;
    use voicehome_domain::event::Event;
    use voicehome_domain::listening::ListeningStatus;

    async fn read_until(body: &mut Body, needle: &str) -> String {
        let mut seen = String::new();
        while !seen.contains(needle) {
            let frame = tokio::time::timeout(Duration::from_secs(2), body.frame())
                .await
                .expect("stream produced nothing in time")
                .expect("stream ended")
                .unwrap();
            if let Ok(bytes) = frame.into_data() {
                seen.push_str(&String::from_utf8_lossy(&bytes));
            }
        }
        seen
    }

    fn stream_request() -> Request<Body> {
        Request::builder()
            .uri("/api/events/stream")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn should_send_snapshots_when_observer_connects() {
        let app = router::build(test_state());

        let response = app.oneshot(stream_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut body = response.into_body();
        let seen = read_until(&mut body, "update_all_backgrounds").await;
        assert!(seen.contains("update_lights"));
        assert!(seen.contains("\"kitchen_light\":false"));
        assert!(seen.contains("\"living_room\":\"#ffffff\""));
    }

    #[tokio::test]
    async fn should_forward_published_events() {
        let state = test_state();
        let bus = std::sync::Arc::clone(&state.event_bus);
        let app = router::build(state);

        let response = app.oneshot(stream_request()).await.unwrap();
        let mut body = response.into_body();
        read_until(&mut body, "update_all_backgrounds").await;

        let event = Event::listening_status(ListeningStatus::Listening);
        let id = event.id.to_string();
        bus.publish(event);

        let seen = read_until(&mut body, "listening_status").await;
        assert!(seen.contains(&id));
        assert!(seen.contains("\"status\":\"listening\""));
    }
}
