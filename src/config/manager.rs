//! Holds the current settings and derives policies and registries from them.

use std::path::PathBuf;

use super::{
    ConfigError,
    Policy,
    TranslatableSettings,
    loader,
};
use crate::attribute::AttributeRegistry;

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: TranslatableSettings,

    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: TranslatableSettings::default(), workspace_root: None }
    }

    /// Loads `.translatable.json` from `workspace_root`, falling back to defaults.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(TranslatableSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            TranslatableSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    pub fn update_settings(&mut self, new_settings: TranslatableSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &TranslatableSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// Builds a policy from the current settings. No callback is attached.
    #[must_use]
    pub fn policy(&self) -> Policy {
        Policy::from_settings(&self.current_settings)
    }

    /// Builds the attribute registry declared for `model`.
    ///
    /// # Errors
    /// - Model not declared
    /// - Invalid cast
    pub fn registry_for(&self, model: &str) -> Result<AttributeRegistry, ConfigError> {
        let config = self
            .current_settings
            .models
            .get(model)
            .ok_or_else(|| ConfigError::UnknownModel(model.to_string()))?;

        Ok(AttributeRegistry::from_declarations(&config.attributes)?)
    }
}
