//! # voicehomed: voicehome daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file + env vars)
//! - Install the `tracing` subscriber
//! - Construct the home store, event bus, announcer and dispatcher
//! - Spawn the listening loop (unless voice input is disabled)
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT): HTTP, then the listening
//!   loop, then the synthesis worker
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use voicehome_adapter_http_axum::state::AppState;
use voicehome_adapter_virtual::{
    BuiltinJokes, ConsoleSynthesizerFactory, LocalClock, LoggingMediaPlayer, StdinRecognizer,
};
use voicehome_app::announcer::Announcer;
use voicehome_app::dispatcher::Dispatcher;
use voicehome_app::event_bus::InProcessEventBus;
use voicehome_app::home_store::HomeStore;
use voicehome_app::listening_loop::ListeningLoop;

use crate::config::Config;

/// A blocked stdin read cannot be cancelled, so the runtime does not wait
/// longer than this for it.
const RUNTIME_GRACE: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(RUNTIME_GRACE);
    result
}

async fn run(config: Config) -> anyhow::Result<()> {
    let event_bus = Arc::new(InProcessEventBus::new(config.events.capacity));
    let store = Arc::new(HomeStore::new());

    let (announcer, synthesis) = Announcer::spawn(
        ConsoleSynthesizerFactory::new(config.voice_settings()),
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

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let listening = if config.voice.enabled {
        let listening_loop = ListeningLoop::new(
            StdinRecognizer::stdin(),
            Arc::clone(&dispatcher),
            config.listen_settings(),
        );
        tracing::info!("voice input enabled, type commands and press enter");
        Some(tokio::spawn(listening_loop.run(shutdown_rx.clone())))
    } else {
        tracing::info!("voice input disabled");
        None
    };

    let state = AppState::new(dispatcher, store, Arc::clone(&event_bus));
    let app = voicehome_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("voicehomed listening on http://{bind_addr}");

    let mut http_shutdown = shutdown_rx;
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = http_shutdown.changed().await;
            })
            .await
    });

    shutdown_signal().await;
    tracing::info!("shutdown requested");
    let _ = shutdown_tx.send(true);

    // Open SSE streams never end on their own.
    match tokio::time::timeout(config.shutdown_timeout(), server).await {
        Ok(Ok(Ok(()))) => tracing::info!("http server stopped"),
        Ok(Ok(Err(err))) => tracing::error!(error = %err, "http server failed"),
        Ok(Err(err)) => tracing::error!(error = %err, "http server crashed"),
        Err(_) => tracing::warn!("http connections still open, dropping them"),
    }

    if let Some(handle) = listening
        && let Err(err) = handle.await
    {
        tracing::error!(error = %err, "listening loop crashed");
    }

    match synthesis.shutdown(config.shutdown_timeout()).await {
        Ok(report) => tracing::info!(
            spoken = report.spoken,
            failed = report.failed,
            "announcer stopped"
        ),
        Err(err) => tracing::warn!(error = %err, "announcer did not stop cleanly"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
