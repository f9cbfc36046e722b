//! Skin document source: `<station_root>/<skin_root>/<skin>/skin.conf`

use std::path::{Path, PathBuf};

/// Path of a skin's configuration document.
pub fn skin_config_path(
    station_root: &Path,
    skin_root: &str,
    skin: &str,
    file_name: &str,
) -> PathBuf {
    station_root.join(skin_root).join(skin).join(file_name)
}

/// Load a skin document. The error is a human-readable reason; the caller
/// decides how to classify it.
pub fn load(path: &Path) -> Result<toml::Table, String> {
    if !path.is_file() {
        return Err("file not found".to_string());
    }
    let text = std::fs::read_to_string(path).map_err(|e| format!("unreadable: {}", e))?;
    text.parse::<toml::Table>()
        .map_err(|e| format!("malformed: {}", e))
}
