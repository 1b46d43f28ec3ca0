//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub play: Option<bool>,
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: None,
            play: Some(true),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            play: other.play.or(self.play),
            notify: other.notify.or(self.notify),
        }
    }

    /// Get playback setting, or true if not set
    pub fn play_or_default(&self) -> bool {
        self.play.unwrap_or(true)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_endpoint() {
        let config = AppConfig::defaults();
        assert!(config.endpoint.is_none());
        assert_eq!(config.play, Some(true));
        assert_eq!(config.notify, Some(false));
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            endpoint: Some("https://a.example/ask".to_string()),
            play: Some(true),
            notify: Some(false),
        };
        let other = AppConfig {
            endpoint: Some("https://b.example/ask".to_string()),
            play: None,
            notify: Some(true),
        };

        let merged = base.merge(other);
        assert_eq!(merged.endpoint.as_deref(), Some("https://b.example/ask"));
        assert_eq!(merged.play, Some(true));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_chain_defaults_file_cli() {
        let file = AppConfig {
            endpoint: Some("https://file.example/ask".to_string()),
            play: Some(false),
            notify: None,
        };
        let cli = AppConfig {
            endpoint: None,
            play: None,
            notify: Some(true),
        };

        let merged = AppConfig::defaults().merge(file).merge(cli);
        assert_eq!(merged.endpoint.as_deref(), Some("https://file.example/ask"));
        assert_eq!(merged.play, Some(false));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert!(config.play_or_default());
        assert!(!config.notify_or_default());
    }
}
