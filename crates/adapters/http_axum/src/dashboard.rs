//! Server-side rendered HTML dashboard (no JavaScript).

use std::sync::Arc;

use askama::Template;
use axum::Router;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;

use voicehome_app::ports::{Clock, JokeSource, MediaPlayer};
use voicehome_domain::home::HomeState;
use voicehome_domain::room::Room;

use crate::activity::Activity;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<M, J, C>() -> Router<AppState<M, J, C>>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<M, J, C>))
        .route("/command", post(submit_command::<M, J, C>))
}

/// One room card on the dashboard.
pub struct RoomView {
    label: String,
    light_on: bool,
    color: String,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    lights_on: usize,
    rooms: Vec<RoomView>,
    current_song: Option<String>,
    status: String,
    last_response: Option<String>,
}

impl DashboardTemplate {
    fn from_state(state: &HomeState, activity: Activity) -> Self {
        let rooms = Room::ALL
            .into_iter()
            .map(|room| RoomView {
                label: label(room),
                light_on: state.light(room),
                color: state.color(room).to_string(),
            })
            .collect();

        Self {
            refresh_seconds: 5,
            lights_on: state.lights_on(),
            rooms,
            current_song: state.current_song.clone(),
            status: activity.status.to_string(),
            last_response: activity.last_response,
        }
    }
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render dashboard");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn label(room: Room) -> String {
    let name = room.as_str().replace('_', " ");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

/// Form body posted by the command box.
#[derive(Debug, Deserialize)]
pub struct CommandForm {
    pub command: String,
}

/// `GET /`: home overview and command box.
pub async fn index<M, J, C>(State(state): State<AppState<M, J, C>>) -> DashboardTemplate
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    DashboardTemplate::from_state(&state.store.snapshot(), state.activity.snapshot())
}

/// `POST /command`: dispatch the typed command, then redirect back (PRG).
pub async fn submit_command<M, J, C>(
    State(state): State<AppState<M, J, C>>,
    Form(form): Form<CommandForm>,
) -> Redirect
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Arc::clone(&state.dispatcher)
        .dispatch_detached(form.command.to_lowercase())
        .await;
    Redirect::to("/")
}
