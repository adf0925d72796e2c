//! Speech synthesis port: turns announcement text into audible speech.
//!
//! Engines are built by a [`SynthesizerFactory`] so the announcer can create
//! one lazily and throw it away after a failure.

use std::future::Future;

/// Speech synthesis failures.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// The engine could not be constructed.
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
    /// The engine was built but failed while speaking.
    #[error("speech failed: {0}")]
    Failed(String),
}

/// A live text-to-speech engine.
pub trait SpeechSynthesizer: Send {
    /// Speak `text`, resolving once the utterance has finished.
    fn speak(&mut self, text: &str) -> impl Future<Output = Result<(), SynthesisError>> + Send;

    /// Abort whatever the engine is doing before it is discarded.
    fn stop(&mut self) {}
}

/// Builds [`SpeechSynthesizer`] instances.
pub trait SynthesizerFactory: Send + 'static {
    type Synthesizer: SpeechSynthesizer + 'static;

    /// Construct a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::Unavailable`] when no engine can be built.
    fn create(&self) -> Result<Self::Synthesizer, SynthesisError>;
}
