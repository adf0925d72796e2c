//! Console speech synthesizer.
//!
//! Writes every utterance to the log and then waits as long as a real voice
//! would need to say it, so announcement ordering behaves like the real thing.

use std::time::Duration;

use voicehome_app::ports::{SpeechSynthesizer, SynthesisError, SynthesizerFactory};

/// Voice parameters shared by every engine the factory builds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    /// Speaking rate.
    pub words_per_minute: u32,
    /// Output volume in `0.0..=1.0`.
    pub volume: f32,
    /// Index of the installed voice to use.
    pub voice: usize,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 150,
            volume: 0.9,
            voice: 1,
        }
    }
}

impl VoiceSettings {
    /// How long saying `text` takes at this rate.
    #[must_use]
    pub fn speaking_time(&self, text: &str) -> Duration {
        let words = u64::try_from(text.split_whitespace().count()).unwrap_or(u64::MAX);
        let rate = u64::from(self.words_per_minute.max(1));
        Duration::from_millis(words.saturating_mul(60_000) / rate)
    }
}

/// Builds [`ConsoleSynthesizer`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSynthesizerFactory {
    settings: VoiceSettings,
}

impl ConsoleSynthesizerFactory {
    #[must_use]
    pub fn new(settings: VoiceSettings) -> Self {
        Self { settings }
    }
}

impl SynthesizerFactory for ConsoleSynthesizerFactory {
    type Synthesizer = ConsoleSynthesizer;

    fn create(&self) -> Result<ConsoleSynthesizer, SynthesisError> {
        if self.settings.words_per_minute == 0 {
            return Err(SynthesisError::Unavailable(
                "speaking rate must be non-zero".to_string(),
            ));
        }
        tracing::debug!(
            voice = self.settings.voice,
            rate = self.settings.words_per_minute,
            volume = f64::from(self.settings.volume),
            "speech engine initialised"
        );
        Ok(ConsoleSynthesizer {
            settings: self.settings,
        })
    }
}

/// A "speech engine" that prints instead of talking.
#[derive(Debug)]
pub struct ConsoleSynthesizer {
    settings: VoiceSettings,
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&mut self, text: &str) -> Result<(), SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::Failed("nothing to say".to_string()));
        }
        tracing::info!(target: "voicehome::speech", "{text}");
        tokio::time::sleep(self.settings.speaking_time(text)).await;
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!("speech engine stopped");
    }
}
