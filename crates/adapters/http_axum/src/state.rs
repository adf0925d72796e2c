//! Shared application state for axum handlers.

use std::sync::Arc;

use voicehome_app::dispatcher::Dispatcher;
use voicehome_app::event_bus::InProcessEventBus;
use voicehome_app::home_store::HomeStore;
use voicehome_app::ports::{Clock, JokeSource, MediaPlayer};

use crate::activity::ActivityTracker;

/// Dispatcher publishing to the in-process event bus.
pub type BusDispatcher<M, J, C> = Dispatcher<Arc<InProcessEventBus>, M, J, C>;

/// Application state shared across all axum handlers.
///
/// Generic over the media player, joke source, and clock so the dispatcher is
/// used without dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`.
pub struct AppState<M, J, C> {
    /// Command dispatcher, shared with the listening loop.
    pub dispatcher: Arc<BusDispatcher<M, J, C>>,
    /// The home state the dispatcher mutates.
    pub store: Arc<HomeStore>,
    /// Event bus that SSE subscribers attach to.
    pub event_bus: Arc<InProcessEventBus>,
    /// Last announcement and listening status, for the dashboard.
    pub activity: Arc<ActivityTracker>,
}

impl<M, J, C> Clone for AppState<M, J, C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            store: Arc::clone(&self.store),
            event_bus: Arc::clone(&self.event_bus),
            activity: Arc::clone(&self.activity),
        }
    }
}

impl<M, J, C> AppState<M, J, C>
where
    M: MediaPlayer + Send + Sync + 'static,
    J: JokeSource + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Create the state from a dispatcher that is already shared with other
    /// tasks.
    ///
    /// Must be called inside a tokio runtime: the activity tracker subscribes
    /// to `event_bus` on a background task.
    pub fn new(
        dispatcher: Arc<BusDispatcher<M, J, C>>,
        store: Arc<HomeStore>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        let activity = ActivityTracker::spawn(&event_bus);
        Self {
            dispatcher,
            store,
            event_bus,
            activity,
        }
    }
}
