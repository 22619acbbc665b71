// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator configuration
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! actors = 5
//! wake_mode = "split"
//! cancel_poll_interval = "20ms"
//! history_capacity = 256
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Which condition variables waiters sleep on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WakeMode {
    /// One channel for hungry actors and token waiters alike; every release
    /// wakes everybody
    #[default]
    Shared,
    /// Separate channels; releasing the token wakes only token waiters and
    /// putting down wakes only hungry actors
    Split,
}

/// Coordinator configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Number of actors seated at the table, fixed for the coordinator's lifetime
    pub actors: usize,
    #[serde(default)]
    pub wake_mode: WakeMode,
    /// How often a cancellable wait re-checks its cancel token
    #[serde(default = "default_cancel_poll_interval", with = "humantime_serde")]
    pub cancel_poll_interval: Duration,
    /// Number of events kept in the history ring (0 disables it)
    #[serde(default)]
    pub history_capacity: usize,
}

fn default_cancel_poll_interval() -> Duration {
    Duration::from_millis(50)
}

impl CoordinatorConfig {
    pub fn new(actors: usize) -> Self {
        Self {
            actors,
            wake_mode: WakeMode::default(),
            cancel_poll_interval: default_cancel_poll_interval(),
            history_capacity: 0,
        }
    }

    pub fn with_wake_mode(mut self, mode: WakeMode) -> Self {
        self.wake_mode = mode;
        self
    }

    pub fn with_cancel_poll_interval(mut self, interval: Duration) -> Self {
        self.cancel_poll_interval = interval;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actors == 0 {
            return Err(ConfigError::NoActors);
        }
        if self.cancel_poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CoordinatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
