//! Puzzle configuration, loadable from TOML.

use crate::error::{ConfigError, PuzzleError};
use crate::grid::Alphabet;
use crate::placement::DEFAULT_PLACEMENT_ATTEMPTS;
use crate::scoring::{DEFAULT_POINTS_PER_LETTER, DEFAULT_POINTS_PER_WORD};
use crate::types::TeamConfig;
use crate::words;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Largest grid edge length a configuration may ask for.
pub const MAX_GRID_SIZE: usize = 100;

/// Which game is being played.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// One player, flat points per word.
    #[default]
    Solo,
    /// Teams take turns, points per letter.
    Duel,
}

impl GameMode {
    /// Grid edge length used when none is configured.
    pub fn default_grid_size(self) -> usize {
        match self {
            GameMode::Solo => 12,
            GameMode::Duel => 15,
        }
    }

    /// Time limit used when none is configured.
    pub fn default_time_limit_secs(self) -> u64 {
        match self {
            GameMode::Solo => 300,
            GameMode::Duel => 600,
        }
    }
}

/// Everything needed to build a puzzle session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Solo or duel.
    #[serde(default)]
    mode: GameMode,

    /// Word pool (normalized to uppercase when the puzzle is built).
    #[serde(default)]
    words: Vec<String>,

    /// Play with a random subset of this many words from the pool.
    #[serde(default)]
    word_sample: Option<usize>,

    /// Grid edge length; defaults by mode.
    #[serde(default)]
    #[getter(skip)]
    grid_size: Option<usize>,

    /// Time limit in seconds; defaults by mode.
    #[serde(default)]
    #[getter(skip)]
    time_limit_secs: Option<u64>,

    /// Letters used for filler cells.
    #[serde(default)]
    alphabet: Alphabet,

    /// Random attempts per word before it is dropped.
    #[serde(default = "default_attempts")]
    max_placement_attempts: usize,

    /// Solo points per word.
    #[serde(default = "default_points_per_word")]
    points_per_word: u32,

    /// Duel points per letter.
    #[serde(default = "default_points_per_letter")]
    points_per_letter: u32,

    /// How long the final match stays on screen before the end summary.
    #[serde(default = "default_finish_hold_ms")]
    finish_hold_ms: u64,

    /// Timer period.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// Whether to send narration to the announcer.
    #[serde(default = "default_narrate")]
    narrate: bool,

    /// Duel teams, in turn order.
    #[serde(default)]
    teams: Vec<TeamConfig>,
}

fn default_attempts() -> usize {
    DEFAULT_PLACEMENT_ATTEMPTS
}

fn default_points_per_word() -> u32 {
    DEFAULT_POINTS_PER_WORD
}

fn default_points_per_letter() -> u32 {
    DEFAULT_POINTS_PER_LETTER
}

fn default_finish_hold_ms() -> u64 {
    1500
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_narrate() -> bool {
    true
}

impl PuzzleConfig {
    /// Solo hunt over `words` with default settings.
    #[instrument(skip(words))]
    pub fn solo<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self::with_mode(GameMode::Solo, words)
    }

    /// Team duel over `words` with default settings.
    #[instrument(skip(words, teams), fields(teams = teams.len()))]
    pub fn duel<S: Into<String>>(
        words: impl IntoIterator<Item = S>,
        teams: Vec<TeamConfig>,
    ) -> Self {
        Self {
            teams,
            ..Self::with_mode(GameMode::Duel, words)
        }
    }

    fn with_mode<S: Into<String>>(mode: GameMode, words: impl IntoIterator<Item = S>) -> Self {
        Self {
            mode,
            words: words.into_iter().map(Into::into).collect(),
            word_sample: None,
            grid_size: None,
            time_limit_secs: None,
            alphabet: Alphabet::default(),
            max_placement_attempts: default_attempts(),
            points_per_word: default_points_per_word(),
            points_per_letter: default_points_per_letter(),
            finish_hold_ms: default_finish_hold_ms(),
            tick_ms: default_tick_ms(),
            narrate: default_narrate(),
            teams: Vec::new(),
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading puzzle config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(mode = %config.mode, words = config.words.len(), "Puzzle config loaded");
        Ok(config)
    }

    /// Resolved grid edge length.
    pub fn grid_size(&self) -> usize {
        self.grid_size
            .unwrap_or_else(|| self.mode.default_grid_size())
    }

    /// Resolved time limit in seconds.
    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_secs
            .unwrap_or_else(|| self.mode.default_time_limit_secs())
    }

    /// Sets the grid edge length.
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = Some(size);
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// Sets the filler alphabet.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Plays with `count` random words from the pool.
    pub fn with_word_sample(mut self, count: usize) -> Self {
        self.word_sample = Some(count);
        self
    }

    /// Sets the per-word placement attempt budget.
    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Sets the final-match hold.
    pub fn with_finish_hold_ms(mut self, ms: u64) -> Self {
        self.finish_hold_ms = ms;
        self
    }

    /// Sets the timer period.
    pub fn with_tick_ms(mut self, ms: u64) -> Self {
        self.tick_ms = ms;
        self
    }

    /// Turns narration on or off.
    pub fn with_narration(mut self, narrate: bool) -> Self {
        self.narrate = narrate;
        self
    }

    /// Checks everything that can be checked before generation.
    ///
    /// Returns the normalized word pool.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn validate(&self) -> Result<Vec<String>, PuzzleError> {
        let size = self.grid_size();
        if size == 0 {
            return Err(PuzzleError::ZeroGridSize);
        }
        if size > MAX_GRID_SIZE {
            return Err(PuzzleError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.time_limit_secs() == 0 {
            return Err(PuzzleError::ZeroTimeLimit);
        }
        if self.tick_ms == 0 {
            return Err(PuzzleError::ZeroTickPeriod);
        }
        if self.mode == GameMode::Duel && self.teams.is_empty() {
            return Err(PuzzleError::NoTeams);
        }

        let pool = words::normalize_all(&self.words)?;
        if pool.is_empty() {
            return Err(PuzzleError::EmptyWordList);
        }
        if let Some(count) = self.word_sample {
            if count == 0 {
                return Err(PuzzleError::EmptyWordList);
            }
            if count > pool.len() {
                return Err(PuzzleError::SampleTooLarge {
                    requested: count,
                    available: pool.len(),
                });
            }
        }
        if let Some(longest) = pool.iter().max_by_key(|w| w.chars().count()) {
            let length = longest.chars().count();
            if length > size {
                return Err(PuzzleError::GridTooSmall {
                    size,
                    word: longest.clone(),
                    length,
                });
            }
        }
        Ok(pool)
    }
}
