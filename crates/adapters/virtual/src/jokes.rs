//! Built-in joke list.

use std::sync::atomic::{AtomicUsize, Ordering};

use voicehome_app::ports::{JokeError, JokeSource};

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "A SQL query walks into a bar, walks up to two tables and asks: can I join you?",
    "Why did the developer go broke? Because he used up all his cache.",
    "I would tell you a UDP joke, but you might not get it.",
    "Debugging is like being the detective in a crime movie where you are also the murderer.",
];

/// Hands out jokes from a fixed list, in order, wrapping around.
#[derive(Debug, Default)]
pub struct BuiltinJokes {
    next: AtomicUsize,
}

impl JokeSource for BuiltinJokes {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % JOKES.len();
        Ok(JOKES[index].to_string())
    }
}
