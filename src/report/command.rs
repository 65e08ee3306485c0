//! The missing-translations command behind `translatable-missing`.

use std::path::PathBuf;

use super::{
    MissingTranslationsReport,
    ReportError,
    find_missing_translations,
    load_records,
};
use crate::config::{
    AttributeFilter,
    ConfigManager,
};
use crate::store::TranslationStore;

/// Inputs of [`run`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Model to check, as declared in the settings.
    pub model: String,
    /// Directory holding `.translatable.json`.
    pub config_root: PathBuf,
    /// Record file or directory. Defaults to `config_root`.
    pub records: Option<PathBuf>,
    /// Locales to check. Empty means the required locales of the settings.
    pub locales: Vec<String>,
    /// Attribute names or glob patterns. Empty means every declared attribute.
    pub attributes: Vec<String>,
}

/// Loads the settings and records described by `options` and checks them.
///
/// Fails with [`ReportError::NoMatchingAttributes`] when `attributes` patterns
/// select none of the model's translatable attributes.
pub fn run(options: &ReportOptions) -> Result<MissingTranslationsReport, ReportError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(options.config_root.clone()))?;
    let settings = config_manager.get_settings();

    let store =
        TranslationStore::new(config_manager.registry_for(&options.model)?).with_policy(config_manager.policy());

    let locales = if options.locales.is_empty() { settings.required_locales() } else { options.locales.clone() };

    let declared = store.registry().attribute_names();
    let attributes = if options.attributes.is_empty() {
        declared.iter().map(ToString::to_string).collect()
    } else {
        AttributeFilter::new(&options.attributes)?.select(declared.iter().copied())
    };
    if attributes.is_empty() {
        return Err(ReportError::NoMatchingAttributes {
            model: options.model.clone(),
            patterns: options.attributes.clone(),
        });
    }

    let records_path = options.records.as_ref().unwrap_or(&options.config_root);
    let records = load_records(&options.model, records_path, &settings.records)?;
    tracing::debug!(model = %options.model, count = records.len(), "Loaded records");

    find_missing_translations(&store, &options.model, &records, &locales, &attributes)
}
