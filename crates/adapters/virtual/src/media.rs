//! Media player that only logs what it would open.

use voicehome_app::ports::{MediaPlayer, PlaybackError};

/// Logs a YouTube search URL instead of opening a browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMediaPlayer;

impl LoggingMediaPlayer {
    /// YouTube search URL for `title`.
    #[must_use]
    pub fn search_url(title: &str) -> String {
        format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(title.trim())
        )
    }
}

impl MediaPlayer for LoggingMediaPlayer {
    async fn play(&self, title: &str) -> Result<(), PlaybackError> {
        if title.trim().is_empty() {
            return Err(PlaybackError::EmptyTitle);
        }
        let url = Self::search_url(title);
        tracing::info!(song = %title, %url, "playing on YouTube");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_percent_encode_search_query() {
        assert_eq!(
            LoggingMediaPlayer::search_url("imagine dragons & co"),
            "https://www.youtube.com/results?search_query=imagine%20dragons%20%26%20co"
        );
    }

    #[tokio::test]
    async fn should_reject_blank_title() {
        let result = LoggingMediaPlayer.play("  ").await;
        assert!(matches!(result, Err(PlaybackError::EmptyTitle)));
    }

    #[tokio::test]
    async fn should_accept_title() {
        assert!(LoggingMediaPlayer.play("bohemian rhapsody").await.is_ok());
    }
}
