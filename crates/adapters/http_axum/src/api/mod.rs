//! JSON REST API handler modules.

pub mod command;
#[allow(clippy::missing_errors_doc)]
pub mod home;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use voicehome_app::ports::{Clock, JokeSource, MediaPlayer};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<M, J, C>() -> Router<AppState<M, J, C>>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/command", post(command::submit::<M, J, C>))
        .route("/state", get(home::state::<M, J, C>))
        .route("/rooms/{room}/color", put(home::set_color::<M, J, C>))
        .route("/events/stream", get(sse::stream::<M, J, C>))
}
