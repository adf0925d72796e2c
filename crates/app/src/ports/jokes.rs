//! Joke port: fetches one joke on demand.

use std::future::Future;

/// The joke source could not produce a joke.
#[derive(Debug, thiserror::Error)]
#[error("joke source failed: {reason}")]
pub struct JokeError {
    pub reason: String,
}

/// Something that can tell jokes.
pub trait JokeSource {
    /// Fetch a single joke.
    fn fetch_joke(&self) -> impl Future<Output = Result<String, JokeError>> + Send;
}

impl<T: JokeSource + Send + Sync> JokeSource for std::sync::Arc<T> {
    fn fetch_joke(&self) -> impl Future<Output = Result<String, JokeError>> + Send {
        (**self).fetch_joke()
    }
}
