//! Default resolution: every implicit default the engine relies on lives here.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Skin used by a report that does not name one.
pub const DEFAULT_SKIN: &str = "Standard";

/// Directory under the station root holding one subdirectory per skin.
pub const DEFAULT_SKIN_ROOT: &str = "skins";

/// Directory under the station root receiving generated artifacts.
pub const DEFAULT_HTML_ROOT: &str = "public_html";

/// File name of a skin's configuration document.
pub const SKIN_CONFIG_FILE: &str = "skin.conf";

/// Report-level defaults consulted by the skin resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDefaults {
    pub skin: String,
    pub skin_root: String,
    pub html_root: String,
    pub skin_config_file: String,
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            skin: DEFAULT_SKIN.to_string(),
            skin_root: DEFAULT_SKIN_ROOT.to_string(),
            html_root: DEFAULT_HTML_ROOT.to_string(),
            skin_config_file: SKIN_CONFIG_FILE.to_string(),
        }
    }
}

/// Create a Config builder with engine setting defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("station.root", ".")?
        .set_default("logging.level", "info")
}
