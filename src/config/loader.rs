//! Configuration file loading.

use std::path::Path;

use super::{
    ConfigError,
    TranslatableSettings,
};

/// Name of the configuration file looked up in a workspace root.
pub const CONFIG_FILE_NAME: &str = ".translatable.json";

/// Loads settings from `.translatable.json` in `workspace_root`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no configuration file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<TranslatableSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: TranslatableSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
