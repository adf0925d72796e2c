//! Home state queries and room color changes.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use voicehome_app::ports::{Clock, EventPublisher, JokeSource, MediaPlayer};
use voicehome_domain::color::Color;
use voicehome_domain::event::Event;
use voicehome_domain::home::HomeState;
use voicehome_domain::room::Room;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for changing a room color.
#[derive(Debug, Deserialize)]
pub struct SetColorRequest {
    pub color: String,
}

/// `GET /api/state`
pub async fn state<M, J, C>(State(state): State<AppState<M, J, C>>) -> Json<HomeState>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(state.store.snapshot())
}

/// `PUT /api/rooms/{room}/color`
pub async fn set_color<M, J, C>(
    State(state): State<AppState<M, J, C>>,
    Path(room): Path<String>,
    Json(req): Json<SetColorRequest>,
) -> Result<Json<HomeState>, ApiError>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let room: Room = room.parse()?;
    let color = Color::parse(&req.color)?;

    tracing::info!(%room, %color, "changing room color");
    state.store.set_color(room, color);
    state
        .event_bus
        .publish(Event::update_all_backgrounds(state.store.colors()));

    Ok(Json(state.store.snapshot()))
}
