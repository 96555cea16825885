// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Daily activity goal used for goal-progress analytics, in minutes.
pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 30;

/// Engine configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OctoGym API (no trailing slash)
    pub api_base_url: String,
    /// Daily activity goal in minutes, for goal-progress analytics
    pub daily_goal_minutes: u32,
    /// Path of the persisted session file (survives restarts until logout)
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default matching the reference deployment; the
    /// only failure mode is a platform with no resolvable data directory
    /// and no `OCTOGYM_STATE_DIR` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let state_dir = match env::var("OCTOGYM_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .map(|d| d.join("octogym"))
                .ok_or(ConfigError::Missing("OCTOGYM_STATE_DIR"))?,
        };

        Ok(Self {
            api_base_url: env::var("OCTOGYM_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            daily_goal_minutes: env::var("OCTOGYM_DAILY_GOAL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DAILY_GOAL_MINUTES),
            session_file: state_dir.join("session.json"),
        })
    }

    /// Default config for tests (no environment access).
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
            session_file: env::temp_dir().join("octogym-test").join("session.json"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: environment variables are process-global, so the
    // set/load/remove sequences must not interleave across test threads.
    #[test]
    fn test_config_from_env() {
        env::set_var("OCTOGYM_API_URL", "http://gym.example.test:9000/");
        env::set_var("OCTOGYM_DAILY_GOAL_MINUTES", "45");
        env::set_var("OCTOGYM_STATE_DIR", "/tmp/octogym-config-test");

        let config = Config::from_env().expect("Config should load");

        // Trailing slash is stripped so URL joins stay well-formed
        assert_eq!(config.api_base_url, "http://gym.example.test:9000");
        assert_eq!(config.daily_goal_minutes, 45);
        assert_eq!(
            config.session_file,
            PathBuf::from("/tmp/octogym-config-test/session.json")
        );

        // An unparseable goal falls back to the default
        env::set_var("OCTOGYM_DAILY_GOAL_MINUTES", "half an hour");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.daily_goal_minutes, DEFAULT_DAILY_GOAL_MINUTES);

        env::remove_var("OCTOGYM_API_URL");
        env::remove_var("OCTOGYM_DAILY_GOAL_MINUTES");
        env::remove_var("OCTOGYM_STATE_DIR");
    }
}
