//! In-memory reference implementation of [`AttributeHost`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use super::{
    AttributeHost,
    ValueTransformer,
};

/// Errors raised while building a [`Record`] from JSON.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Record must be a JSON object, got: {0}")]
    NotAnObject(Value),

    #[error("Failed to encode attribute `{attribute}`: {source}")]
    Encode {
        attribute: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A plain entity holding raw serialized attributes.
#[derive(Clone, Default)]
pub struct Record {
    model: String,
    key: Option<Value>,
    attributes: BTreeMap<String, Option<String>>,
    locale: Option<String>,
    fallback_locale: Option<String>,
    without_fallback: bool,
    transformer: Option<Arc<dyn ValueTransformer + Send + Sync>>,
}

impl Record {
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into(), ..Self::default() }
    }

    /// Builds a record from a JSON object.
    ///
    /// `id` becomes the key. Other fields become raw attributes: strings are kept
    /// verbatim, `null` is stored as a null column, and anything else is
    /// serialized back to JSON text.
    pub fn from_json(model: impl Into<String>, value: Value) -> Result<Self, RecordError> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAnObject(value));
        };

        let mut record = Self::new(model);
        for (name, field) in fields {
            if name == "id" {
                record.key = Some(field);
                continue;
            }
            let raw = match field {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(serde_json::to_string(&other).map_err(|source| {
                    RecordError::Encode { attribute: name.clone(), source }
                })?),
            };
            record.attributes.insert(name, raw);
        }
        Ok(record)
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<Value>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_raw_attribute(mut self, column: impl Into<String>, raw: impl Into<String>) -> Self {
        self.attributes.insert(column.into(), Some(raw.into()));
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.set_locale(locale);
        self
    }

    #[must_use]
    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    /// Disables fallback for every read on this record.
    #[must_use]
    pub fn without_fallback(mut self) -> Self {
        self.without_fallback = true;
        self
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: Arc<dyn ValueTransformer + Send + Sync>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    /// True if the column exists, even when it holds null.
    #[must_use]
    pub fn contains_attribute(&self, column: &str) -> bool {
        self.attributes.contains_key(column)
    }

    /// Raw attributes as a JSON object, columns decoded where they hold JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        if let Some(key) = &self.key {
            fields.insert("id".to_string(), key.clone());
        }
        for (name, raw) in &self.attributes {
            let value = raw.as_deref().map_or(Value::Null, |raw| {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
            });
            fields.insert(name.clone(), value);
        }
        Value::Object(fields)
    }
}

impl AttributeHost for Record {
    fn raw_attribute(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).and_then(Option::as_deref)
    }

    fn set_raw_attribute(&mut self, column: &str, value: Option<String>) {
        self.attributes.insert(column.to_string(), value);
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn key(&self) -> Option<Value> {
        self.key.clone()
    }

    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    fn uses_fallback_locale(&self) -> bool {
        !self.without_fallback
    }

    fn transformer(&self) -> Option<&dyn ValueTransformer> {
        self.transformer.as_deref().map(|t| t as &dyn ValueTransformer)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("model", &self.model)
            .field("key", &self.key)
            .field("attributes", &self.attributes)
            .field("locale", &self.locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("without_fallback", &self.without_fallback)
            .field("transformer", &self.transformer.as_ref().map(|_| "<dyn ValueTransformer>"))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn from_json_splits_key_and_attributes() {
        let record = Record::from_json(
            "Article",
            json!({"id": 3, "name": {"en": "Hello"}, "slug": "hello", "deleted_at": null}),
        )
        .unwrap();

        assert_that!(record.key(), some(eq(&json!(3))));
        assert_that!(record.raw_attribute("name"), some(eq(r#"{"en":"Hello"}"#)));
        assert_that!(record.raw_attribute("slug"), some(eq("hello")));
        assert_that!(record.raw_attribute("deleted_at"), none());
        assert_that!(record.contains_attribute("deleted_at"), eq(true));
        assert_that!(record.contains_attribute("id"), eq(false));
    }

    #[rstest]
    fn from_json_rejects_non_objects() {
        assert_that!(Record::from_json("Article", json!([1, 2])), err(anything()));
    }

    #[rstest]
    fn to_json_decodes_columns() {
        let record = Record::new("Article")
            .with_key(1)
            .with_raw_attribute("name", r#"{"en":"Hello"}"#)
            .with_raw_attribute("slug", "hello");

        assert_eq!(record.to_json(), json!({"id": 1, "name": {"en": "Hello"}, "slug": "hello"}));
    }

    #[rstest]
    fn host_capabilities_reflect_builder() {
        let record = Record::new("Article")
            .with_locale("fr")
            .with_fallback_locale("de")
            .without_fallback();

        assert_that!(record.locale(), some(eq("fr")));
        assert_that!(record.fallback_locale(), some(eq("de")));
        assert_that!(record.uses_fallback_locale(), eq(false));
        assert_that!(record.transformer().is_none(), eq(true));
        assert_that!(record.entity_ref().model, eq("Article"));
    }
}
