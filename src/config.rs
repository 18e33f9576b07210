//! Engine configuration constants.
//!
//! This module centralizes the tunable values used across the learning
//! engine, plus the small runtime configuration read by the demo binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::Level;

// ==================== Scoring Configuration ====================

/// Pronunciation score at or above which an attempt counts as correct
pub const PRONUNCIATION_PASS_THRESHOLD: f64 = 0.6;

/// Accuracy deducted per hint on pronunciation exercises
pub const PRONUNCIATION_HINT_PENALTY: f64 = 0.1;

/// Multiple choice answers faster than this earn quality 5
pub const MULTIPLE_CHOICE_FAST_MS: u64 = 5_000;

/// Reading answers faster than this earn quality 5
pub const READING_FAST_MS: u64 = 8_000;

/// Typed answers at or above this similarity are "close"
pub const TYPING_CLOSE_THRESHOLD: f64 = 0.7;

// ==================== SM-2 Configuration ====================

/// Ease factor given to an item on first exposure
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Ease factor floor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Upper bound on a review interval (about a century)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Default target response time for accuracy → quality conversion
pub const DEFAULT_TARGET_TIME_MS: u64 = 5_000;

// ==================== Flow Configuration ====================

/// Below this accuracy the session is too hard
pub const FLOW_MIN: f64 = 0.65;

/// Above this accuracy the session is too easy
pub const FLOW_MAX: f64 = 0.85;

/// Results evaluated per adjustment
pub const FLOW_WINDOW_SIZE: usize = 5;

/// Results retained in the sliding window
pub const FLOW_HISTORY_SIZE: usize = FLOW_WINDOW_SIZE * 2;

/// Minimum results before any adjustment is attempted
pub const FLOW_MIN_SAMPLES: usize = 3;

pub const DIFFICULTY_STEP: u8 = 5;
pub const MIN_DIFFICULTY: u8 = 5;
pub const MAX_DIFFICULTY: u8 = 95;

// ==================== Session Configuration ====================

/// Number of distractor choices in multiple choice exercises
pub const DISTRACTOR_COUNT: usize = 3;

/// Placeholder options used when the bank cannot supply enough distractors
pub const PLACEHOLDER_OPTIONS: [&str; 3] = ["...", "---", "???"];

/// Pairs shown in a matching exercise
pub const MATCHING_PAIRS: usize = 4;

/// Default number of exercises per session
pub const DEFAULT_SESSION_SIZE: usize = 7;

/// Largest session the runner will build
pub const MAX_SESSION_SIZE: usize = 50;

/// Base XP for a correct answer inside a session
pub const ANSWER_XP: u32 = 15;

/// Bonus XP while on a combo of 3 or more
pub const COMBO_BONUS_XP: u32 = 10;

/// Combo length that unlocks the bonus
pub const COMBO_THRESHOLD: u32 = 3;

/// XP removed when a hint was used
pub const HINT_XP_PENALTY: u32 = 5;

/// Minimum XP for a correct answer
pub const MIN_ANSWER_XP: u32 = 5;

/// Hints a learner may reveal per session
pub const MAX_HINTS_PER_SESSION: u32 = 3;

/// Session score (percent) that earns the bonus rare pack
pub const BONUS_PACK_PERCENTAGE: u32 = 80;

/// Cards per pack earned from a session
pub const SESSION_PACK_CARDS: u32 = 3;

// ==================== Reward Configuration ====================

/// Streak lengths that are reported as milestones
pub const STREAK_MILESTONES: [u32; 6] = [3, 7, 14, 30, 60, 100];

pub const MAX_SHIELDS: u32 = 3;

/// A shield is earned on every multiple of this streak length
pub const SHIELD_EARN_INTERVAL: u32 = 7;

// ==================== Runtime Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    engine: Option<EngineSection>,
}

#[derive(Debug, Default, Deserialize)]
struct EngineSection {
    content_dir: Option<String>,
    seed: Option<u64>,
    theme: Option<String>,
    level: Option<String>,
    session_size: Option<usize>,
    simulated_accuracy: Option<f64>,
}

/// Error reading config.toml.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Runtime settings for the demo session runner.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Directory of JSON content files; `None` uses the starter bank
    pub content_dir: Option<PathBuf>,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    pub theme: String,
    pub level: Level,
    pub session_size: usize,
    /// Probability that the simulated learner answers correctly
    pub simulated_accuracy: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            seed: None,
            theme: "gaming".to_string(),
            level: Level::Beginner,
            session_size: DEFAULT_SESSION_SIZE,
            simulated_accuracy: 0.8,
        }
    }
}

impl EngineConfig {
    /// Load configuration with priority: config.toml > .env / environment > default
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());

        let path = Path::new("config.toml");
        if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            config.apply_toml(&contents).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!("Loaded engine settings from {}", path.display());
        }

        Ok(config)
    }

    /// Overlay values from a config.toml document.
    pub fn apply_toml(&mut self, contents: &str) -> Result<(), toml::de::Error> {
        let file: ConfigFile = toml::from_str(contents)?;
        let Some(engine) = file.engine else {
            return Ok(());
        };

        if let Some(dir) = engine.content_dir {
            self.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = engine.seed {
            self.seed = Some(seed);
        }
        if let Some(theme) = engine.theme {
            self.theme = theme;
        }
        if let Some(level) = engine.level {
            self.set_level(&level);
        }
        if let Some(size) = engine.session_size {
            self.set_session_size(size);
        }
        if let Some(accuracy) = engine.simulated_accuracy {
            self.simulated_accuracy = accuracy.clamp(0.0, 1.0);
        }
        Ok(())
    }

    /// Overlay values from `SPEAKQUEST_*` environment variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("SPEAKQUEST_CONTENT_DIR") {
            self.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = lookup("SPEAKQUEST_SEED") {
            match seed.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!("Ignoring invalid SPEAKQUEST_SEED: {}", seed),
            }
        }
        if let Some(theme) = lookup("SPEAKQUEST_THEME") {
            self.theme = theme;
        }
        if let Some(level) = lookup("SPEAKQUEST_LEVEL") {
            self.set_level(&level);
        }
        if let Some(size) = lookup("SPEAKQUEST_SESSION_SIZE") {
            match size.trim().parse() {
                Ok(size) => self.set_session_size(size),
                Err(_) => tracing::warn!("Ignoring invalid SPEAKQUEST_SESSION_SIZE: {}", size),
            }
        }
    }

    fn set_session_size(&mut self, size: usize) {
        if size > MAX_SESSION_SIZE {
            tracing::warn!("Session size {} too large, using {}", size, MAX_SESSION_SIZE);
        }
        self.session_size = size.min(MAX_SESSION_SIZE);
    }

    fn set_level(&mut self, value: &str) {
        match Level::from_str(value) {
            Some(level) => self.level = level,
            None => tracing::warn!("Unknown level '{}', keeping {}", value, self.level.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.theme, "gaming");
        assert_eq!(config.level, Level::Beginner);
        assert_eq!(config.session_size, 7);
        assert!(config.content_dir.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_apply_toml_engine_table() {
        let mut config = EngineConfig::default();
        config
            .apply_toml(
                r#"
                [engine]
                content_dir = "data/content"
                seed = 42
                theme = "sports"
                level = "intermediate"
                session_size = 10
                simulated_accuracy = 1.7
                "#,
            )
            .unwrap();

        assert_eq!(config.content_dir, Some(PathBuf::from("data/content")));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.theme, "sports");
        assert_eq!(config.level, Level::Intermediate);
        assert_eq!(config.session_size, 10);
        assert!((config.simulated_accuracy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_toml_without_engine_table() {
        let mut config = EngineConfig::default();
        config.apply_toml("[other]\nkey = 1\n").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_apply_toml_malformed() {
        let mut config = EngineConfig::default();
        assert!(config.apply_toml("[engine\nseed = ").is_err());
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = [
            ("SPEAKQUEST_SEED", "7"),
            ("SPEAKQUEST_THEME", "food"),
            ("SPEAKQUEST_LEVEL", "advanced"),
            ("SPEAKQUEST_SESSION_SIZE", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.theme, "food");
        assert_eq!(config.level, Level::Advanced);
        // Invalid size is ignored
        assert_eq!(config.session_size, DEFAULT_SESSION_SIZE);
    }

    #[test]
    fn test_toml_overrides_env() {
        let mut config = EngineConfig::default();
        config.apply_env(|key| (key == "SPEAKQUEST_THEME").then(|| "music".to_string()));
        config.apply_toml("[engine]\ntheme = \"travel\"\n").unwrap();
        assert_eq!(config.theme, "travel");
    }

    #[test]
    fn test_session_size_is_capped() {
        let mut config = EngineConfig::default();
        config.apply_toml("[engine]\nsession_size = 100000\n").unwrap();
        assert_eq!(config.session_size, MAX_SESSION_SIZE);

        let mut config = EngineConfig::default();
        config.apply_env(|key| (key == "SPEAKQUEST_SESSION_SIZE").then(|| usize::MAX.to_string()));
        assert_eq!(config.session_size, MAX_SESSION_SIZE);

        let mut config = EngineConfig::default();
        config.apply_toml("[engine]\nsession_size = 12\n").unwrap();
        assert_eq!(config.session_size, 12);
    }

    #[test]
    fn test_unknown_level_keeps_current() {
        let mut config = EngineConfig::default();
        config.apply_toml("[engine]\nlevel = \"wizard\"\n").unwrap();
        assert_eq!(config.level, Level::Beginner);
    }
}
