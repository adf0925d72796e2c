//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `voicehome.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use voicehome_adapter_virtual::VoiceSettings;
use voicehome_app::listening_loop::ListenSettings;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Listening loop settings.
    pub voice: VoiceConfig,
    /// Speech synthesis settings.
    pub speech: SpeechConfig,
    /// Announcement channel settings.
    pub announcer: AnnouncerConfig,
    /// Observer event bus settings.
    pub events: EventsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Listening loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Run the listening loop at all. With it off only typed commands work.
    pub enabled: bool,
    pub calibration_ms: u64,
    pub listen_timeout_secs: u64,
    pub phrase_limit_secs: u64,
    pub cycle_pause_ms: u64,
}

/// Speech synthesis configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub words_per_minute: u32,
    /// Between `0.0` and `1.0`.
    pub volume: f32,
    pub voice: usize,
}

/// Announcement channel configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnnouncerConfig {
    /// How long shutdown waits for the synthesis worker.
    pub shutdown_timeout_secs: u64,
}

/// Event bus configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Events buffered per observer before it starts lagging.
    pub capacity: usize,
}

impl Config {
    /// Load configuration from `voicehome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("voicehome.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("VOICEHOME_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("VOICEHOME_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("VOICEHOME_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("VOICEHOME_VOICE_ENABLED")
            && let Some(enabled) = parse_flag(&val)
        {
            self.voice.enabled = enabled;
        }
        if let Ok(val) = std::env::var("VOICEHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.speech.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "speech.words_per_minute must be non-zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.speech.volume) {
            return Err(ConfigError::Validation(
                "speech.volume must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "events.capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn listen_settings(&self) -> ListenSettings {
        ListenSettings {
            calibration: Duration::from_millis(self.voice.calibration_ms),
            timeout: Duration::from_secs(self.voice.listen_timeout_secs),
            phrase_limit: Duration::from_secs(self.voice.phrase_limit_secs),
            pause: Duration::from_millis(self.voice.cycle_pause_ms),
        }
    }

    #[must_use]
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            words_per_minute: self.speech.words_per_minute,
            volume: self.speech.volume,
            voice: self.speech.voice,
        }
    }

    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.announcer.shutdown_timeout_secs)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "voicehomed=info,voicehome=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            calibration_ms: 1000,
            listen_timeout_secs: 5,
            phrase_limit_secs: 5,
            cycle_pause_ms: 500,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 150,
            volume: 0.9,
            voice: 1,
        }
    }
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout_secs: 5,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
