//! # voicehome-adapter-virtual
//!
//! Virtual/demo voice integration that stands in for real audio hardware and
//! cloud services, so the daemon runs end to end on any machine.
//!
//! ## Provided collaborators
//!
//! | Port | Implementation | Behaviour |
//! |------|----------------|-----------|
//! | `SynthesizerFactory` | [`ConsoleSynthesizerFactory`] | Logs the text and takes as long as saying it would |
//! | `SpeechRecognizer` | [`StdinRecognizer`] | One stdin line = one utterance |
//! | `MediaPlayer` | [`LoggingMediaPlayer`] | Logs the YouTube search URL |
//! | `JokeSource` | [`BuiltinJokes`] | Rotates through a fixed list |
//! | `Clock` | [`LocalClock`] | Local wall-clock time |
//!
//! ## Dependency rule
//!
//! Depends on `voicehome-app` (port traits) only.

mod clock;
mod jokes;
mod media;
mod recognizer;
mod synthesizer;

pub use clock::LocalClock;
pub use jokes::BuiltinJokes;
pub use media::LoggingMediaPlayer;
pub use recognizer::{LineRecognizer, StdinRecognizer};
pub use synthesizer::{ConsoleSynthesizer, ConsoleSynthesizerFactory, VoiceSettings};
