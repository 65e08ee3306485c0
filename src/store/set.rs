//! Locale to value dictionaries.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// Translations of one attribute, keyed by locale.
///
/// Iteration follows insertion order, which is also the order locales were first stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationSet {
    values: Map<String, Value>,
}

impl TranslationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.values.get(locale)
    }

    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.values.contains_key(locale)
    }

    pub fn insert(&mut self, locale: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(locale.into(), value.into())
    }

    pub fn remove(&mut self, locale: &str) -> Option<Value> {
        self.values.shift_remove(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(locale, value)| (locale.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

impl From<Map<String, Value>> for TranslationSet {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl From<TranslationSet> for Value {
    fn from(set: TranslationSet) -> Self {
        Self::Object(set.values)
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl IntoIterator for TranslationSet {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
