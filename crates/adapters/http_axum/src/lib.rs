//! # voicehome-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept **typed commands** over JSON (`POST /api/command`) and feed them
//!   to the same [`Dispatcher`](voicehome_app::dispatcher::Dispatcher) the
//!   voice loop uses
//! - Serve the current home state and room colors
//! - Stream observer notifications as **Server-Sent Events**
//!   (`GET /api/events/stream`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: a command `<form>` that POSTs back and redirects
//!   (PRG pattern), plus `<meta http-equiv="refresh">` for live updates
//!   and the latest announcement and listening status
//!
//! ## Dependency rule
//! Depends on `voicehome-app` (for the dispatcher, store and event bus) and
//! `voicehome-domain` (for the types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod activity;
pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
