//! Error types for skin resolution and generator dispatch.
//!
//! Every error carries a [`Severity`]. The engine and the runner branch on it:
//! recoverable errors skip one report or one generator, fatal errors end the run.

use std::path::PathBuf;
use thiserror::Error;

/// Whether a failure may be skipped or must end the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Recoverable,
    Fatal,
}

#[derive(Debug, Error)]
pub enum ReportError {
    /// The report's skin document is absent, unreadable or malformed.
    #[error("No skin configuration for report '{report}' at {path:?}: {reason}")]
    ConfigMissing {
        report: String,
        path: PathBuf,
        reason: String,
    },

    /// A generator identifier could not be turned into a unit.
    #[error("Unable to instantiate generator '{generator}': {reason}")]
    Instantiation { generator: String, reason: String },

    #[error("Generator '{generator}' failed in report '{report}': {source}")]
    GeneratorFailed {
        report: String,
        generator: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Generator '{generator}' panicked in report '{report}': {message}")]
    GeneratorPanicked {
        report: String,
        generator: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Output formatting failed: {0}")]
    Output(String),

    #[error("Unable to start report task: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Report task panicked: {0}")]
    TaskPanicked(String),
}

impl ReportError {
    pub fn severity(&self) -> Severity {
        match self {
            ReportError::ConfigMissing { .. } | ReportError::Instantiation { .. } => {
                Severity::Recoverable
            }
            _ => Severity::Fatal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}

impl From<config::ConfigError> for ReportError {
    fn from(err: config::ConfigError) -> Self {
        ReportError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Config(err.to_string())
    }
}

/// Render a caught panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
