//! voice-ask CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voice_ask::cli::{
    app::{load_merged_config, require_endpoint, run_session, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, SessionOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_ask::domain::config::AppConfig;
use voice_ask::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so the transcript on stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command.take() {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        play: cli.play_preference(),
        notify: if cli.notify { Some(true) } else { None },
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let endpoint = match require_endpoint(&config) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let options = SessionOptions {
        endpoint,
        play: config.play_or_default(),
        notify: config.notify_or_default(),
    };

    run_session(options).await
}
