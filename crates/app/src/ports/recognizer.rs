//! Speech recognition port: microphone capture and speech-to-text.

use std::future::Future;
use std::time::Duration;

/// Why a capture/transcription attempt produced no text.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    /// No speech started before the silence timeout.
    #[error("timed out waiting for speech")]
    Timeout,
    /// Audio was captured but could not be understood.
    #[error("speech was unintelligible")]
    Unintelligible,
    /// The transcription service rejected or failed the request.
    #[error("{0}")]
    Service(String),
    /// The capture device failed.
    #[error("audio device error: {0}")]
    Device(String),
}

/// Captures audio and transcribes it.
///
/// The listening loop calls [`calibrate`](Self::calibrate), then
/// [`listen`](Self::listen), then [`transcribe`](Self::transcribe) once per
/// cycle.
pub trait SpeechRecognizer: Send {
    /// Captured audio, opaque to the application.
    type Audio: Send;

    /// Sample ambient noise to set the energy threshold.
    fn calibrate(
        &mut self,
        duration: Duration,
    ) -> impl Future<Output = Result<(), RecognitionError>> + Send;

    /// Wait up to `timeout` for speech to begin, then record at most
    /// `phrase_limit` of it.
    fn listen(
        &mut self,
        timeout: Duration,
        phrase_limit: Duration,
    ) -> impl Future<Output = Result<Self::Audio, RecognitionError>> + Send;

    /// Convert captured audio to text.
    fn transcribe(
        &mut self,
        audio: Self::Audio,
    ) -> impl Future<Output = Result<String, RecognitionError>> + Send;
}
