//! Global config file source: the document named on the command line,
//! followed by `SKINRUN__<SECTION>__<KEY>` environment overrides.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;
use config::File;
use config::FileFormat;
use std::path::Path;

use crate::error::ReportError;

/// Environment variable prefix for setting overrides.
pub const ENV_PREFIX: &str = "SKINRUN";

/// Read the global document and parse it as an order-preserving table.
pub fn read_document(path: &Path) -> Result<(String, toml::Table), ReportError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ReportError::Config(format!(
            "Unable to open configuration file {}: {}",
            path.display(),
            e
        ))
    })?;
    let table = parse_document(&text)?;
    Ok((text, table))
}

pub fn parse_document(text: &str) -> Result<toml::Table, ReportError> {
    text.parse::<toml::Table>().map_err(ReportError::from)
}

/// Add the document text and the environment overrides to the builder.
/// Environment wins over the file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    text: &str,
) -> ConfigBuilder<DefaultState> {
    builder
        .add_source(File::from_str(text, FileFormat::Toml))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
}
