//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod event_bus;
pub mod jokes;
pub mod media;
pub mod recognizer;
pub mod synthesizer;

pub use clock::Clock;
pub use event_bus::EventPublisher;
pub use jokes::{JokeError, JokeSource};
pub use media::{MediaPlayer, PlaybackError};
pub use recognizer::{RecognitionError, SpeechRecognizer};
pub use synthesizer::{SpeechSynthesizer, SynthesisError, SynthesizerFactory};
