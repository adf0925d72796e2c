//! # voicehome-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SynthesizerFactory` / `SpeechSynthesizer`: text-to-speech
//!   - `SpeechRecognizer`: audio capture and speech-to-text
//!   - `MediaPlayer`: song playback
//!   - `JokeSource`: jokes on demand
//!   - `Clock`: local wall-clock time
//!   - `EventPublisher`: observer notifications
//! - Provide the use-cases:
//!   - `HomeStore`: the single, mutex-guarded home state
//!   - `Dispatcher`: ordered keyword rules, first match wins
//!   - `Announcer`: FIFO announcement channel with one synthesis worker
//!   - `ListeningLoop`: capture → transcribe → dispatch, forever
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `voicehome-domain` only (plus `tokio` for channels and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod announcer;
pub mod dispatcher;
pub mod event_bus;
pub mod home_store;
pub mod listening_loop;
pub mod ports;
