//! Line-based speech recognizer.
//!
//! Treats every line of input as one spoken phrase. The daemon wires it to
//! stdin so commands can be typed into the terminal running `voicehomed`.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use voicehome_app::ports::{RecognitionError, SpeechRecognizer};

/// Recognizer reading phrases from standard input.
pub type StdinRecognizer = LineRecognizer<BufReader<Stdin>>;

impl StdinRecognizer {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

/// Recognizer reading one phrase per line from any async reader.
pub struct LineRecognizer<R> {
    lines: Lines<R>,
    closed: bool,
}

impl<R: AsyncBufRead + Unpin> LineRecognizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            closed: false,
        }
    }
}

impl<R: AsyncBufRead + Unpin + Send> SpeechRecognizer for LineRecognizer<R> {
    type Audio = String;

    async fn calibrate(&mut self, duration: Duration) -> Result<(), RecognitionError> {
        tracing::debug!(?duration, "adjusting for ambient noise");
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn listen(
        &mut self,
        timeout: Duration,
        _phrase_limit: Duration,
    ) -> Result<String, RecognitionError> {
        if self.closed {
            // Nothing will ever arrive; idle until the loop is shut down.
            return std::future::pending().await;
        }
        tracing::info!("listening...");
        match tokio::time::timeout(timeout, self.lines.next_line()).await {
            Err(_) => Err(RecognitionError::Timeout),
            Ok(Ok(Some(line))) if line.trim().is_empty() => Err(RecognitionError::Unintelligible),
            Ok(Ok(Some(line))) => Ok(line),
            Ok(Ok(None)) => {
                tracing::info!("input closed, voice input disabled");
                self.closed = true;
                Err(RecognitionError::Device("input closed".to_string()))
            }
            Ok(Err(err)) => Err(RecognitionError::Device(err.to_string())),
        }
    }

    async fn transcribe(&mut self, audio: String) -> Result<String, RecognitionError> {
        Ok(audio.trim().to_lowercase())
    }
}
