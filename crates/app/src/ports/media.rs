//! Media port: hands a song request to the external video player.

use std::future::Future;

/// Playback could not be started.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("nothing to play")]
    EmptyTitle,
    #[error("player unavailable: {0}")]
    Unavailable(String),
}

/// Plays songs found by a free-text search.
pub trait MediaPlayer {
    /// Search for `title` and start playing the first hit.
    fn play(&self, title: &str) -> impl Future<Output = Result<(), PlaybackError>> + Send;
}

impl<T: MediaPlayer + Send + Sync> MediaPlayer for std::sync::Arc<T> {
    fn play(&self, title: &str) -> impl Future<Output = Result<(), PlaybackError>> + Send {
        (**self).play(title)
    }
}
