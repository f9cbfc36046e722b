//! Configuration System
//!
//! The global configuration document drives a whole run. Typed engine settings
//! (`[station]`, `[logging]`) go through the `config` crate so defaults and
//! environment overrides apply; the `[reports]` tree is kept as an
//! order-preserving TOML table because report order and opaque override keys
//! both matter to the engine.

use crate::error::ReportError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod defaults;
pub mod sources;

pub use defaults::{
    ReportDefaults, DEFAULT_HTML_ROOT, DEFAULT_SKIN, DEFAULT_SKIN_ROOT, SKIN_CONFIG_FILE,
};

/// Name of the reports section in the global document.
pub const REPORTS_SECTION: &str = "reports";

/// Typed engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub station: StationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Station-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Root directory every other station path is relative to
    #[serde(default = "default_station_root")]
    pub root: PathBuf,
}

fn default_station_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            root: default_station_root(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Station(String),
    Reports(String),
    Report(String, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Station(msg) => write!(f, "Station: {}", msg),
            ValidationError::Reports(msg) => write!(f, "Reports: {}", msg),
            ValidationError::Report(name, msg) => write!(f, "Report '{}': {}", name, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Process-wide configuration, read-only for the duration of a run.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    source: Option<PathBuf>,
    document: toml::Table,
    settings: EngineSettings,
}

impl GlobalConfig {
    /// Build from document text. Environment overrides apply to the typed settings.
    pub fn from_toml_str(text: &str) -> Result<Self, ReportError> {
        let document = sources::global_file::parse_document(text)?;
        Self::from_parts(None, text, document)
    }

    fn from_parts(
        source: Option<PathBuf>,
        text: &str,
        document: toml::Table,
    ) -> Result<Self, ReportError> {
        let builder = defaults::builder_with_defaults()?;
        let settings: EngineSettings = sources::global_file::add_to_builder(builder, text)
            .build()?
            .try_deserialize()?;

        let config = Self {
            source,
            document,
            settings,
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ReportError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(config)
    }

    /// Validate the parts of the document the engine interprets.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.settings.station.root.as_os_str().is_empty() {
            errors.push(ValidationError::Station(
                "Station root cannot be empty".to_string(),
            ));
        }

        match self.document.get(REPORTS_SECTION) {
            None | Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(ValidationError::Reports(
                "'reports' must be a table".to_string(),
            )),
        }

        // Reports-wide keys the engine reads itself
        for key in ["skin_root", "html_root"] {
            if let Some(value) = self.reports_scalar(key) {
                if !value.is_str() {
                    errors.push(ValidationError::Reports(format!("'{}' must be a string", key)));
                }
            }
        }

        // Per-report skin selection
        for name in self.report_names() {
            if let Some(skin) = self.report_section(&name).and_then(|s| s.get("skin")) {
                if !skin.is_str() {
                    errors.push(ValidationError::Report(
                        name.clone(),
                        "'skin' must be a string".to_string(),
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// File the configuration was loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn station_root(&self) -> &Path {
        &self.settings.station.root
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.settings.logging
    }

    /// The raw document
    pub fn document(&self) -> &toml::Table {
        &self.document
    }

    fn reports_section(&self) -> Option<&toml::Table> {
        self.document.get(REPORTS_SECTION).and_then(toml::Value::as_table)
    }

    /// Report names in declaration order
    pub fn report_names(&self) -> Vec<String> {
        self.reports_section()
            .map(|reports| {
                reports
                    .iter()
                    // Subtables are reports, anything else is a shared scalar
                    .filter(|(_, value)| value.is_table())
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One report's override subsection
    pub fn report_section(&self, name: &str) -> Option<&toml::Table> {
        self.reports_section()
            .and_then(|reports| reports.get(name))
            .and_then(toml::Value::as_table)
    }

    /// Non-table entries of the reports section; they apply to every report.
    pub fn report_scalars(&self) -> Vec<(&str, &toml::Value)> {
        self.reports_section()
            .map(|reports| {
                reports
                    .iter()
                    .filter(|(_, value)| !value.is_table())
                    .map(|(key, value)| (key.as_str(), value))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn reports_scalar(&self, key: &str) -> Option<&toml::Value> {
        self.reports_section()
            .and_then(|reports| reports.get(key))
            .filter(|value| !value.is_table())
    }

    /// Skin root subpath, falling back to the given default
    pub fn skin_root<'a>(&'a self, defaults: &'a ReportDefaults) -> &'a str {
        self.reports_scalar("skin_root")
            .and_then(toml::Value::as_str)
            .unwrap_or(&defaults.skin_root)
    }
}

/// Loads the global configuration document.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_file(path: &Path) -> Result<GlobalConfig, ReportError> {
        let (text, document) = sources::global_file::read_document(path)?;
        GlobalConfig::from_parts(Some(path.to_path_buf()), &text, document)
    }
}
