//! Interactive session runner

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ask::{AskConfig, AskUseCase};
use crate::application::ports::{AnswerPlayer, ConfigStore, Notifier};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    CpalVoiceRecorder, DesktopNotifier, HttpAnswerClient, NoopAnswerPlayer, NoopNotifier,
    RodioAnswerPlayer, XdgConfigStore,
};

use super::args::SessionOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the interactive ask session
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    // The whole client is a recording front end; without an input device
    // every recording action stays disabled.
    if !CpalVoiceRecorder::device_available() {
        presenter.error("No audio input device available; recording is disabled");
        return ExitCode::from(EXIT_ERROR);
    }

    let recorder = CpalVoiceRecorder::new();
    let client = HttpAnswerClient::new(&options.endpoint);
    let player: Box<dyn AnswerPlayer> = if options.play {
        Box::new(RodioAnswerPlayer::new())
    } else {
        Box::new(NoopAnswerPlayer)
    };
    let notifier: Box<dyn Notifier> = if options.notify {
        Box::new(DesktopNotifier::new())
    } else {
        Box::new(NoopNotifier)
    };

    let config = AskConfig {
        enable_playback: options.play,
        enable_notify: options.notify,
    };
    let use_case = AskUseCase::new(
        recorder,
        client,
        player,
        notifier,
        Arc::clone(&presenter),
        config,
    );

    // stdin is the single control: every Enter is a press.
    let (press_tx, press_rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            if press_tx.send(()).await.is_err() {
                break;
            }
        }
        // Dropping the sender ends the machine loop.
    });

    presenter.info(&format!("Endpoint: {}", options.endpoint));
    presenter.info("Press Enter to record a question, Enter again to stop. Ctrl-C to quit.");

    tokio::select! {
        _ = use_case.run(press_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            debug!("interrupted");
        }
    }

    presenter.info("Goodbye");
    ExitCode::from(EXIT_SUCCESS)
}

/// Load and merge configuration from file and CLI.
/// The endpoint environment variable arrives through clap's env support.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli (env folded into cli by clap)
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Get the endpoint from merged config, with a usage hint when absent
pub fn require_endpoint(config: &AppConfig) -> Result<String, String> {
    if let Some(endpoint) = config.endpoint.clone().filter(|e| !e.is_empty()) {
        return Ok(endpoint);
    }
    // A stale empty env var should read as unset.
    if let Ok(endpoint) = env::var("VOICE_ASK_ENDPOINT") {
        if !endpoint.is_empty() {
            return Ok(endpoint);
        }
    }
    Err("Missing answer endpoint. Pass --endpoint <url>, set VOICE_ASK_ENDPOINT, or run 'voice-ask config set endpoint <url>'".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_endpoint_prefers_config() {
        let config = AppConfig {
            endpoint: Some("https://api.example/ask".to_string()),
            ..Default::default()
        };
        assert_eq!(
            require_endpoint(&config).unwrap(),
            "https://api.example/ask"
        );
    }

    #[test]
    fn require_endpoint_reports_usage_hint() {
        let config = AppConfig::empty();
        // The test environment has no endpoint set.
        if env::var("VOICE_ASK_ENDPOINT").is_err() {
            let err = require_endpoint(&config).unwrap_err();
            assert!(err.contains("--endpoint"));
            assert!(err.contains("VOICE_ASK_ENDPOINT"));
        }
    }
}
