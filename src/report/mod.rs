//! Missing-translations report over a collection of entities.

mod command;
mod records;
mod table;

use std::fmt;
use std::path::PathBuf;

pub use command::{
    ReportOptions,
    run,
};
pub use records::load_records;
use serde::Serialize;
use serde_json::Value;
pub use table::render_table;

use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::entity::{
    AttributeHost,
    RecordError,
};
use crate::store::{
    StoreError,
    TranslationStore,
};

/// Number of entities checked per batch.
pub const CHUNK_SIZE: usize = 100;

/// Table headers of the rendered report.
const HEADERS: [&str; 4] = ["Model", "ID", "Attribute", "Missing Locales"];

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No records found for model {model}.")]
    NoRecords { model: String },

    #[error("No translatable attribute of {model} matches `{}`", patterns.join(", "))]
    NoMatchingAttributes { model: String, patterns: Vec<String> },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidPattern(#[from] MatcherError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record in {}: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}

/// One entity attribute lacking translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingTranslationRow {
    pub model: String,
    pub id: String,
    pub attribute: String,
    pub missing_locales: Vec<String>,
}

impl MissingTranslationRow {
    fn cells(&self) -> Vec<String> {
        vec![self.model.clone(), self.id.clone(), self.attribute.clone(), self.missing_locales.join(", ")]
    }
}

/// Result of [`find_missing_translations`]. `Display` renders the console output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingTranslationsReport {
    pub model: String,
    pub checked: usize,
    pub rows: Vec<MissingTranslationRow>,
}

impl MissingTranslationsReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for MissingTranslationsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checking model: {}", self.model)?;

        if self.is_complete() {
            return writeln!(f, "All translations are complete for model!");
        }

        writeln!(f, "Missing Translations")?;
        let rows: Vec<Vec<String>> = self.rows.iter().map(MissingTranslationRow::cells).collect();
        f.write_str(&render_table(&HEADERS, &rows))
    }
}

/// Lists, per entity and attribute, the `locales` without a retained translation.
///
/// Entities are processed in chunks of [`CHUNK_SIZE`].
pub fn find_missing_translations<H: AttributeHost>(
    store: &TranslationStore,
    model: &str,
    records: &[H],
    locales: &[String],
    attributes: &[String],
) -> Result<MissingTranslationsReport, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoRecords { model: model.to_string() });
    }

    let mut rows = Vec::new();
    for (index, chunk) in records.chunks(CHUNK_SIZE).enumerate() {
        tracing::debug!(model, chunk = index, size = chunk.len(), "Checking chunk");

        for record in chunk {
            for attribute in attributes {
                let missing_locales = missing_locales(store, record, attribute, locales)?;
                if missing_locales.is_empty() {
                    continue;
                }
                rows.push(MissingTranslationRow {
                    model: model.to_string(),
                    id: record.key().map(|key| display_key(&key)).unwrap_or_default(),
                    attribute: attribute.clone(),
                    missing_locales,
                });
            }
        }
    }

    Ok(MissingTranslationsReport { model: model.to_string(), checked: records.len(), rows })
}

fn missing_locales<H: AttributeHost>(
    store: &TranslationStore,
    record: &H,
    attribute: &str,
    locales: &[String],
) -> Result<Vec<String>, StoreError> {
    let mut missing = Vec::new();
    for locale in locales {
        if !store.has_translation(record, attribute, Some(locale.as_str()))? {
            missing.push(locale.clone());
        }
    }
    Ok(missing)
}

fn display_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
