//! Notification sink for lifecycle status messages.
//!
//! The adapter never writes to the terminal itself; it hands a message and a
//! [`Severity`] to whichever [`Notifier`] it was built with.

use colored::Colorize;
use serde::Serialize;
use std::fmt;

/// Severity tag attached to every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pending,
    Success,
    Failed,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Pending => "pending",
            Severity::Success => "success",
            Severity::Failed => "failed",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives status messages. Return values are never consumed.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}

/// Prints one coloured status line per notification on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn render(message: &str, severity: Severity) -> String {
        let marker = match severity {
            Severity::Pending => "=>".blue().bold(),
            Severity::Success => "✓".green().bold(),
            Severity::Failed => "✗".red().bold(),
        };
        format!("{} {}", marker, message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        println!("{}", Self::render(message, severity));
    }
}

/// Emits notifications as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Failed => tracing::error!(severity = %severity, "{}", message),
            _ => tracing::info!(severity = %severity, "{}", message),
        }
    }
}
