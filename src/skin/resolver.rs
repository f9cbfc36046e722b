//! Skin resolver: locate, load and merge one report's skin configuration.

use crate::config::sources::skin_file;
use crate::config::{GlobalConfig, ReportDefaults};
use crate::error::ReportError;
use crate::skin::merge::{assign_scalars, merge_into};
use crate::skin::SkinConfig;
use tracing::debug;

/// Resolves report names into merged skin configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    defaults: ReportDefaults,
}

impl ConfigResolver {
    pub fn new(defaults: ReportDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ReportDefaults {
        &self.defaults
    }

    /// Skin name chosen by a report
    pub fn skin_name<'a>(&'a self, report: &'a toml::Table) -> &'a str {
        report
            .get("skin")
            .and_then(toml::Value::as_str)
            .unwrap_or(&self.defaults.skin)
    }

    /// Load the report's skin document and layer the overrides on top:
    /// skin document, then reports-wide scalars, then the report's own section.
    pub fn resolve(&self, report: &str, global: &GlobalConfig) -> Result<SkinConfig, ReportError> {
        let empty = toml::Table::new();
        let section = global.report_section(report);
        let skin = self.skin_name(section.unwrap_or(&empty));
        let path = skin_file::skin_config_path(
            global.station_root(),
            global.skin_root(&self.defaults),
            skin,
            &self.defaults.skin_config_file,
        );

        let Some(section) = section else {
            return Err(ReportError::ConfigMissing {
                report: report.to_string(),
                path,
                reason: "no such report in the reports section".to_string(),
            });
        };

        let mut table = skin_file::load(&path).map_err(|reason| ReportError::ConfigMissing {
            report: report.to_string(),
            path: path.clone(),
            reason,
        })?;
        debug!(
            report = %report,
            path = %path.display(),
            "Found configuration file for report"
        );

        // Reports-wide scalars first, then the report's own section wins
        assign_scalars(&mut table, global.report_scalars());
        merge_into(&mut table, section);

        Ok(SkinConfig::new(report, skin, path, table)
            .with_default_html_root(self.defaults.html_root.as_str()))
    }
}
