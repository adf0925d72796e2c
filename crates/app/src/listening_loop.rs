//! Listening loop: capture, transcribe, dispatch, repeat.
//!
//! Each cycle walks the [`ListeningStatus`] machine and broadcasts every
//! transition:
//!
//! 1. `listening`: calibrate for ambient noise, then wait for a phrase.
//! 2. `processing`: audio was captured, transcription is running.
//! 3. `idle`: the command was dispatched, or an apology was queued.
//!
//! Recognition failures never escape the loop; they are turned into spoken
//! apologies. After each cycle the loop pauses briefly so a failing
//! microphone cannot spin the CPU.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use voicehome_domain::announcement::Announcement;
use voicehome_domain::event::Event;
use voicehome_domain::listening::ListeningStatus;

use crate::dispatcher::Dispatcher;
use crate::ports::{Clock, EventPublisher, JokeSource, MediaPlayer, RecognitionError, SpeechRecognizer};

/// Timing knobs for one listening cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenSettings {
    /// Ambient-noise sampling before each capture.
    pub calibration: Duration,
    /// How long to wait for speech to begin.
    pub timeout: Duration,
    /// Longest phrase recorded.
    pub phrase_limit: Duration,
    /// Pause between cycles.
    pub pause: Duration,
}

impl Default for ListenSettings {
    fn default() -> Self {
        Self {
            calibration: Duration::from_secs(1),
            timeout: Duration::from_secs(5),
            phrase_limit: Duration::from_secs(5),
            pause: Duration::from_millis(500),
        }
    }
}

/// How a cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// A command was heard and dispatched.
    Heard(String),
    /// Recognition failed; an apology was announced.
    Failed(RecognitionError),
}

impl CycleOutcome {
    fn apology(&self) -> Option<Announcement> {
        let Self::Failed(err) = self else {
            return None;
        };
        let text = match err {
            RecognitionError::Timeout => "Listening timed out. Please try again.".to_string(),
            RecognitionError::Unintelligible => {
                "Sorry, I couldn't understand what you said.".to_string()
            }
            RecognitionError::Service(detail) => {
                format!("Speech recognition service error: {detail}")
            }
            RecognitionError::Device(_) => "An error occurred while listening.".to_string(),
        };
        Some(Announcement::new(text))
    }
}

/// Drives a [`SpeechRecognizer`] and feeds what it hears to a [`Dispatcher`].
pub struct ListeningLoop<R, P, M, J, C> {
    recognizer: R,
    dispatcher: Arc<Dispatcher<P, M, J, C>>,
    settings: ListenSettings,
    status: ListeningStatus,
}

impl<R, P, M, J, C> ListeningLoop<R, P, M, J, C>
where
    R: SpeechRecognizer,
    P: EventPublisher,
    M: MediaPlayer,
    J: JokeSource,
    C: Clock,
{
    pub fn new(
        recognizer: R,
        dispatcher: Arc<Dispatcher<P, M, J, C>>,
        settings: ListenSettings,
    ) -> Self {
        Self {
            recognizer,
            dispatcher,
            settings,
            status: ListeningStatus::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn status(&self) -> ListeningStatus {
        self.status
    }

    /// Run cycles until `shutdown` becomes `true` (or its sender is dropped).
    ///
    /// Shutdown interrupts calibration and capture only. Once audio has been
    /// captured, transcription and dispatch run to completion so a command is
    /// never left half-applied.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("listening loop started");
        let pause = self.settings.pause;
        loop {
            if *shutdown.borrow_and_update() {
                break;
            }
            self.transition(ListeningStatus::Listening);
            let captured = tokio::select! {
                _ = shutdown.changed() => break,
                captured = self.capture() => captured,
            };
            let outcome = self.finish(captured).await;
            tracing::debug!(?outcome, "listening cycle finished");

            tokio::select! {
                _ = shutdown.changed() => break,
                () = tokio::time::sleep(pause) => {}
            }
        }
        if self.status != ListeningStatus::Idle {
            self.transition(ListeningStatus::Idle);
        }
        tracing::info!("listening loop stopped");
    }

    /// Run exactly one idle → listening → (processing →) idle cycle.
    pub async fn run_once(&mut self) -> CycleOutcome {
        self.transition(ListeningStatus::Listening);
        let captured = self.capture().await;
        self.finish(captured).await
    }

    async fn capture(&mut self) -> Result<R::Audio, RecognitionError> {
        self.recognizer.calibrate(self.settings.calibration).await?;
        self.recognizer
            .listen(self.settings.timeout, self.settings.phrase_limit)
            .await
    }

    async fn finish(&mut self, captured: Result<R::Audio, RecognitionError>) -> CycleOutcome {
        let handled = match captured {
            Ok(audio) => self.transcribe_and_dispatch(audio).await,
            Err(err) => Err(err),
        };
        let outcome = match handled {
            Ok(command) => CycleOutcome::Heard(command),
            Err(err) => CycleOutcome::Failed(err),
        };
        if let CycleOutcome::Failed(RecognitionError::Device(detail)) = &outcome {
            tracing::error!(error = %detail, "voice recognition error");
        }
        if let Some(apology) = outcome.apology() {
            self.dispatcher.announcer().announce(apology);
        }
        self.transition(ListeningStatus::Idle);
        outcome
    }

    async fn transcribe_and_dispatch(
        &mut self,
        audio: R::Audio,
    ) -> Result<String, RecognitionError> {
        self.transition(ListeningStatus::Processing);
        let command = self.recognizer.transcribe(audio).await?.trim().to_lowercase();
        tracing::info!(command = %command, "heard command");

        self.dispatcher.dispatch(&command).await;
        Ok(command)
    }

    fn transition(&mut self, next: ListeningStatus) {
        if !self.status.can_transition_to(next) {
            tracing::warn!(from = %self.status, to = %next, "unexpected listening transition");
        }
        self.status = next;
        self.dispatcher
            .publisher()
            .publish(Event::listening_status(next));
    }
}
