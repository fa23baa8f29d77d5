//! Best-effort narration for screen readers and text-to-speech.
//!
//! The engine never depends on narration succeeding. Errors and panics
//! raised by a [`Narrator`] are logged and swallowed by [`announce_safely`].

use derive_more::{Display, Error};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{info, warn};

/// Narration failure reported by a collaborator.
#[derive(Debug, Clone, Display, Error)]
#[display("Narration failed: {}", message)]
pub struct NarrationError {
    /// What went wrong.
    pub message: String,
}

impl NarrationError {
    /// Creates a narration error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Something that can speak or display short announcements.
pub trait Narrator {
    /// Announces `text`. Fire-and-forget from the engine's point of view.
    fn announce(&mut self, text: &str) -> Result<(), NarrationError>;
}

impl<F> Narrator for F
where
    F: FnMut(&str) -> Result<(), NarrationError>,
{
    fn announce(&mut self, text: &str) -> Result<(), NarrationError> {
        self(text)
    }
}

/// Narrator that writes announcements to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNarrator;

impl Narrator for LogNarrator {
    fn announce(&mut self, text: &str) -> Result<(), NarrationError> {
        info!(announcement = text, "Narration");
        Ok(())
    }
}

/// Calls `narrator`, ignoring any error or panic it produces.
pub fn announce_safely(narrator: &mut dyn Narrator, text: &str) {
    match catch_unwind(AssertUnwindSafe(|| narrator.announce(text))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(error = %err, "Narrator failed, continuing"),
        Err(_) => warn!("Narrator panicked, continuing"),
    }
}

/// Fixed announcement texts.
pub mod script {
    /// Spoken when a puzzle starts.
    pub const INSTRUCTIONS: &str = "Find the hidden words in the letter grid. \
        Drag from the first letter to the last. Words can read backwards too.";

    /// Spoken after a selection that spells nothing.
    pub const WRONG: &str = "Not a valid word";

    /// Spoken when the last word is found.
    pub const ALL_FOUND: &str = "All words found!";

    /// Spoken when the clock runs out.
    pub const TIME_UP: &str = "Time's up!";

    /// Lists the words to find.
    pub fn word_list<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
        let words: Vec<&str> = words.into_iter().collect();
        format!(
            "Word search ready. Find these {} words: {}",
            words.len(),
            words.join(", ")
        )
    }

    /// Congratulates a find.
    pub fn found(word: &str) -> String {
        format!("You found {}!", word)
    }

    /// Announces whose turn it is in a duel.
    pub fn turn(team_name: &str) -> String {
        format!("{}'s turn", team_name)
    }
}
