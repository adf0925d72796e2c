//! Typed command submission.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use voicehome_app::ports::{Clock, JokeSource, MediaPlayer};

use crate::state::AppState;

/// Request body for `POST /api/command`.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Acknowledgment returned once the command has been dispatched.
#[derive(Debug, Serialize)]
pub struct CommandAck {
    pub status: &'static str,
}

/// `POST /api/command`
///
/// Dispatches the command exactly like a spoken one. The reply only
/// acknowledges receipt; what the assistant says goes out on the event
/// stream. A client that disconnects early does not cut the command short.
pub async fn submit<M, J, C>(
    State(state): State<AppState<M, J, C>>,
    Json(req): Json<CommandRequest>,
) -> Json<CommandAck>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let command = req.command.to_lowercase();
    tracing::info!(command = %command, "received typed command");
    Arc::clone(&state.dispatcher)
        .dispatch_detached(command)
        .await;
    Json(CommandAck { status: "success" })
}
