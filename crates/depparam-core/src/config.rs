//! Notification channel configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// What the channel does with an emitted notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Deliver every notification
    #[default]
    Always,
    /// Deliver each distinct message once per process
    Once,
    /// Drop notifications
    Ignore,
}

/// Process-wide channel configuration
///
/// ```toml
/// action = "once"
/// log = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Delivery action
    pub action: Action,
    /// Forward delivered notifications to `tracing`
    pub log: bool,
}

impl ChannelConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With delivery action
    #[inline]
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// With log forwarding
    #[inline]
    #[must_use]
    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// [`ConfigError::Toml`] on syntax or schema errors.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            action: Action::Always,
            log: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ChannelConfig::default();
        assert_eq!(config.action, Action::Always);
        assert!(config.log);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ChannelConfig::from_toml_str(r#"action = "once""#).unwrap();
        assert_eq!(config, ChannelConfig::new().with_action(Action::Once));
    }

    #[test]
    fn bad_action_rejected() {
        let err = ChannelConfig::from_toml_str(r#"action = "error""#).unwrap_err();
        assert!(err.to_string().starts_with("invalid channel configuration"));
    }
}
