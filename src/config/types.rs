use std::collections::{
    BTreeMap,
    HashSet,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::attribute::ValueKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Model `{0}` is not declared in the configuration")]
    UnknownModel(String),

    #[error(transparent)]
    InvalidCast(#[from] crate::attribute::InvalidCast),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatableSettings {
    /// Current locale used when an entity has not set its own.
    pub locale: String,

    /// If a translation has not been set for a given locale, use this locale instead.
    pub fallback_locale: Option<String>,

    /// Fall back to the first translated locale when `fallback_locale` is missing too.
    pub fallback_any: bool,

    pub allow_null_values: bool,
    pub allow_empty_string_values: bool,

    /// Write non-ASCII characters verbatim instead of `\uXXXX` escapes.
    pub unescaped_unicode: bool,

    /// Locales every translatable attribute is expected to have.
    ///
    /// Empty means `[locale]`.
    pub locales: Vec<String>,

    /// Translatable attributes per model name.
    pub models: BTreeMap<String, ModelConfig>,

    pub records: RecordFilesConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    pub attributes: Vec<AttributeDeclaration>,
}

/// One translatable attribute, either a bare name (string kind) or a name with a cast.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttributeDeclaration {
    Name(String),
    Typed {
        name: String,
        #[serde(default = "default_cast")]
        cast: String,
    },
}

impl AttributeDeclaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Typed { name, .. } => name,
        }
    }
}

fn default_cast() -> String {
    ValueKind::String.to_string()
}

/// Which files under a records directory are read by the report.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for RecordFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/*.json".to_string(), "**/*.jsonl".to_string()],
            exclude_patterns: vec![".translatable.json".to_string()],
        }
    }
}

impl TranslatableSettings {
    /// Locales the missing-translations report checks.
    #[must_use]
    pub fn required_locales(&self) -> Vec<String> {
        if self.locales.is_empty() { vec![self.locale.clone()] } else { self.locales.clone() }
    }

    /// # Errors
    /// - Required field is empty
    /// - Duplicate locale
    /// - Model without attributes
    /// - Unknown cast
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locale.is_empty() {
            errors.push(ValidationError::new(
                "locale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(fallback) = &self.fallback_locale
            && fallback.is_empty()
        {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The fallback locale cannot be empty. Please specify a locale (e.g., \"en\"), or set it to null",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.locales.iter().enumerate() {
            if locale.is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    "The locale cannot be empty",
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        for (model, config) in &self.models {
            if config.attributes.is_empty() {
                errors.push(ValidationError::new(
                    format!("models.{model}.attributes"),
                    "At least one translatable attribute is required. Example: [\"name\"]",
                ));
            }

            for (index, declaration) in config.attributes.iter().enumerate() {
                if declaration.name().is_empty() {
                    errors.push(ValidationError::new(
                        format!("models.{model}.attributes[{index}]"),
                        "The attribute name cannot be empty",
                    ));
                }
                if let AttributeDeclaration::Typed { cast, .. } = declaration
                    && let Err(e) = cast.parse::<ValueKind>()
                {
                    errors.push(ValidationError::new(
                        format!("models.{model}.attributes[{index}].cast"),
                        e.to_string(),
                    ));
                }
            }
        }

        for (index, pattern) in self.records.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("records.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.records.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("records.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslatableSettings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            fallback_locale: Some("en".to_string()),
            fallback_any: false,
            allow_null_values: false,
            allow_empty_string_values: false,
            unescaped_unicode: false,
            locales: Vec::new(),
            models: BTreeMap::new(),
            records: RecordFilesConfig::default(),
        }
    }
}
