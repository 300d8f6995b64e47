//! Configuration for the arbiter exchange.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for talking to the mothership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Group identifier used in every topic.
    /// Default: "000"
    pub group_id: String,

    /// How long to wait for a required reply before re-sending (milliseconds).
    /// Default: 3000
    pub reply_timeout_ms: u64,

    /// Re-sends after the first attempt before giving up.
    /// Default: 2
    pub max_retries: u32,

    /// How long to listen for optional replies such as a path override (milliseconds).
    /// Default: 1000
    pub optional_reply_window_ms: u64,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            group_id: "000".to_string(),
            reply_timeout_ms: 3000,
            max_retries: 2,
            optional_reply_window_ms: 1000,
        }
    }
}

impl ArbiterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for group id.
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Builder-style setter for reply timeout.
    pub fn with_reply_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.reply_timeout_ms = timeout_ms;
        self
    }

    /// Builder-style setter for max retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builder-style setter for the optional reply window.
    pub fn with_optional_reply_window_ms(mut self, window_ms: u64) -> Self {
        self.optional_reply_window_ms = window_ms;
        self
    }

    /// Required reply timeout as a [`Duration`].
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    /// Optional reply window as a [`Duration`].
    pub fn optional_reply_window(&self) -> Duration {
        Duration::from_millis(self.optional_reply_window_ms)
    }

    /// Total sends for a required request.
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
