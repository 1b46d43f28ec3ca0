//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// voice-ask - ask questions out loud, read and hear the answers
#[derive(Parser, Debug)]
#[command(name = "voice-ask")]
#[command(version)]
#[command(about = "Voice question-answering client: record a question, read and hear the answer")]
#[command(long_about = None)]
pub struct Cli {
    /// Answer endpoint URL
    #[arg(short, long, value_name = "URL", env = "VOICE_ASK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Play the spoken answer when it arrives
    #[arg(long, overrides_with = "no_play")]
    pub play: bool,

    /// Print the answer audio URL without playing it
    #[arg(long, overrides_with = "play")]
    pub no_play: bool,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Tri-state playback preference, for config merging
    pub fn play_preference(&self) -> Option<bool> {
        if self.play {
            Some(true)
        } else if self.no_play {
            Some(false)
        } else {
            None
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed interactive-session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub endpoint: String,
    pub play: bool,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "play", "notify"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voice-ask"]);
        assert!(cli.endpoint.is_none());
        assert!(!cli.play);
        assert!(!cli.no_play);
        assert!(!cli.notify);
        assert!(cli.command.is_none());
        assert_eq!(cli.play_preference(), None);
    }

    #[test]
    fn cli_parses_endpoint() {
        let cli = Cli::parse_from(["voice-ask", "--endpoint", "https://api.example/ask"]);
        assert_eq!(cli.endpoint.as_deref(), Some("https://api.example/ask"));
    }

    #[test]
    fn cli_parses_play_flags() {
        let cli = Cli::parse_from(["voice-ask", "--play"]);
        assert_eq!(cli.play_preference(), Some(true));

        let cli = Cli::parse_from(["voice-ask", "--no-play"]);
        assert_eq!(cli.play_preference(), Some(false));
    }

    #[test]
    fn later_play_flag_wins() {
        let cli = Cli::parse_from(["voice-ask", "--play", "--no-play"]);
        assert_eq!(cli.play_preference(), Some(false));
    }

    #[test]
    fn cli_parses_notify() {
        let cli = Cli::parse_from(["voice-ask", "-n"]);
        assert!(cli.notify);
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["voice-ask", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voice-ask", "config", "set", "endpoint", "https://x/ask"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "endpoint");
            assert_eq!(value, "https://x/ask");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("play"));
        assert!(is_valid_config_key("notify"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
