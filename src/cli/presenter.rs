//! Terminal presenter
//!
//! Renders machine status and answers. Status lines share one spinner
//! whose message is replaced, never stacked; the spinner lives for the
//! duration of a cycle and is cleared by the answer or an error.

use std::sync::Mutex;

use async_trait::async_trait;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::StatusPresenter;
use crate::domain::answer::AnswerPayload;
use crate::domain::status::{Severity, UiStatus};

/// Presenter for terminal output
pub struct Presenter {
    spinner: Mutex<Option<ProgressBar>>,
    last_status: Mutex<String>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            last_status: Mutex::new(String::new()),
        }
    }

    fn lock_spinner(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        match self.spinner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Show or update the status spinner
    fn spin(&self, message: &str) {
        if let Ok(mut last) = self.last_status.lock() {
            *last = message.to_string();
        }
        let mut guard = self.lock_spinner();
        match guard.as_ref() {
            Some(spinner) => spinner.set_message(message.to_string()),
            None => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message(message.to_string());
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));
                *guard = Some(spinner);
            }
        }
    }

    /// Clear the spinner, returning the message it was showing
    fn clear_spinner(&self) -> Option<String> {
        let mut guard = self.lock_spinner();
        guard.take().map(|spinner| {
            spinner.finish_and_clear();
            self.last_status
                .lock()
                .map(|m| m.clone())
                .unwrap_or_default()
        })
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the answer transcript)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusPresenter for Presenter {
    async fn status(&self, status: &UiStatus) {
        match status.severity() {
            Severity::Normal => self.spin(status.message()),
            Severity::Error => self.error(status.message()),
        }
    }

    async fn answer(&self, answer: &AnswerPayload) {
        if let Some(message) = self.clear_spinner() {
            if !message.is_empty() {
                eprintln!("{} {}", "✓".green(), message);
            }
        }
        self.output(answer.transcript());
        eprintln!("{} {}", "♪".cyan(), answer.audio_url());
    }
}
