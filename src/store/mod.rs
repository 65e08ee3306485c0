//! Translation store: per-attribute CRUD over locale dictionaries.

mod codec;
mod error;
mod locale;
mod set;

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fmt;
use std::sync::Arc;

pub use codec::encode;
pub use error::StoreError;
pub use locale::{
    Fallback,
    normalize_locale,
};
use serde_json::{
    Map,
    Value,
};
pub use set::TranslationSet;

use crate::attribute::{
    AttributeDescriptor,
    AttributePath,
    AttributeRegistry,
};
use crate::config::{
    MissingTranslation,
    Policy,
};
use crate::entity::AttributeHost;
use crate::events::{
    EventSink,
    TracingSink,
    TranslationChanged,
};

/// Reads and writes translatable attributes on any [`AttributeHost`].
///
/// The store itself is stateless apart from shared configuration; the host owns the data.
/// Cloning is cheap.
#[derive(Clone)]
pub struct TranslationStore {
    registry: Arc<AttributeRegistry>,
    policy: Arc<Policy>,
    events: Arc<dyn EventSink>,
}

impl TranslationStore {
    /// Creates a store with the default policy that logs change events.
    #[must_use]
    pub fn new(registry: AttributeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            policy: Arc::new(Policy::default()),
            events: Arc::new(TracingSink),
        }
    }

    /// Returns a store sharing this registry and sink, with `policy` in effect.
    #[must_use]
    pub fn with_policy(&self, policy: Policy) -> Self {
        Self { registry: Arc::clone(&self.registry), policy: Arc::new(policy), events: Arc::clone(&self.events) }
    }

    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The host's locale override, else the policy locale.
    #[must_use]
    pub fn current_locale<'a>(&'a self, host: &'a dyn AttributeHost) -> &'a str {
        host.locale().unwrap_or(&self.policy.locale)
    }

    /// Retained translations of `attribute`, optionally restricted to `allowed_locales`.
    pub fn translations(
        &self,
        host: &dyn AttributeHost,
        attribute: &str,
        allowed_locales: Option<&[&str]>,
    ) -> Result<TranslationSet, StoreError> {
        let descriptor = self.registry.describe(attribute)?;
        let dictionary = codec::read_dictionary(host, descriptor.path());
        Ok(self.retained(dictionary.as_ref(), allowed_locales))
    }

    /// Resolves `attribute` in `locale`, falling back per policy when `use_fallback`.
    pub fn translation(
        &self,
        host: &dyn AttributeHost,
        attribute: &str,
        locale: &str,
        use_fallback: bool,
    ) -> Result<Value, StoreError> {
        let descriptor = self.registry.describe(attribute)?;
        Ok(self.resolve(host, descriptor, locale, use_fallback))
    }

    /// [`TranslationStore::translation`] with fallback. `None` means the current locale.
    pub fn translate(
        &self,
        host: &dyn AttributeHost,
        attribute: &str,
        locale: Option<&str>,
    ) -> Result<Value, StoreError> {
        let locale = locale.unwrap_or_else(|| self.current_locale(host));
        self.translation(host, attribute, locale, true)
    }

    pub fn translation_with_fallback(
        &self,
        host: &dyn AttributeHost,
        attribute: &str,
        locale: &str,
    ) -> Result<Value, StoreError> {
        self.translation(host, attribute, locale, true)
    }

    pub fn translation_without_fallback(
        &self,
        host: &dyn AttributeHost,
        attribute: &str,
        locale: &str,
    ) -> Result<Value, StoreError> {
        self.translation(host, attribute, locale, false)
    }

    /// Stores one translation and publishes a [`TranslationChanged`] event.
    pub fn set_translation(
        &self,
        host: &mut dyn AttributeHost,
        attribute: &str,
        locale: &str,
        value: impl Into<Value>,
    ) -> Result<&Self, StoreError> {
        let descriptor = self.registry.describe(attribute)?;

        let mut value = value.into();
        if let Some(transformer) = host.transformer() {
            value = transformer.before_set(attribute, locale, value);
        }

        let dictionary = codec::read_dictionary(&*host, descriptor.path());
        let mut translations = self.retained(dictionary.as_ref(), None);
        let old_value = translations.get(locale).cloned().unwrap_or_else(|| Value::String(String::new()));
        translations.insert(locale, value.clone());

        self.write(host, descriptor.path(), translations.into());
        tracing::debug!(model = host.model_name(), attribute, locale, "Translation set");

        self.events.publish(&TranslationChanged {
            entity: host.entity_ref(),
            attribute: attribute.to_string(),
            locale: locale.to_string(),
            old_value,
            new_value: value,
        });

        Ok(self)
    }

    /// Stores every `(locale, value)` pair in the given order.
    ///
    /// An empty input resets the attribute to `{}` without publishing events.
    pub fn set_translations<I, K, V>(
        &self,
        host: &mut dyn AttributeHost,
        attribute: &str,
        values: I,
    ) -> Result<&Self, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let descriptor = self.registry.describe(attribute)?;
        let values: Vec<(String, Value)> = values.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

        if values.is_empty() {
            self.write(host, descriptor.path(), Value::Object(Map::new()));
            return Ok(self);
        }

        for (locale, value) in values {
            self.set_translation(host, attribute, &locale, value)?;
        }

        Ok(self)
    }

    /// Removes one locale. The remaining translations are written back through
    /// [`TranslationStore::set_translations`], so each publishes an event.
    pub fn forget_translation(
        &self,
        host: &mut dyn AttributeHost,
        attribute: &str,
        locale: &str,
    ) -> Result<&Self, StoreError> {
        let descriptor = self.registry.describe(attribute)?;

        let dictionary = codec::read_dictionary(&*host, descriptor.path());
        let mut translations = self.retained(dictionary.as_ref(), None);
        translations.remove(locale);

        codec::clear(host, descriptor.path(), self.policy.unescaped_unicode);
        self.set_translations(host, attribute, translations)
    }

    /// Removes every locale, leaving `{}` or, with `set_null`, a null value.
    pub fn forget_translations(
        &self,
        host: &mut dyn AttributeHost,
        attribute: &str,
        set_null: bool,
    ) -> Result<&Self, StoreError> {
        let descriptor = self.registry.describe(attribute)?;

        for locale in self.translated_locales(&*host, attribute)? {
            self.forget_translation(host, attribute, &locale)?;
        }

        let empty = if set_null { Value::Null } else { Value::Object(Map::new()) };
        self.write(host, descriptor.path(), empty);

        Ok(self)
    }

    /// Forgets `locale` on every registered attribute.
    pub fn forget_all_translations(
        &self,
        host: &mut dyn AttributeHost,
        locale: &str,
    ) -> Result<&Self, StoreError> {
        for attribute in self.registry.attribute_names() {
            self.forget_translation(host, attribute, locale)?;
        }
        Ok(self)
    }

    pub fn translated_locales(&self, host: &dyn AttributeHost, attribute: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.translations(host, attribute, None)?.locales().map(ToString::to_string).collect())
    }

    /// Whether a retained translation exists. `None` means the current locale.
    pub fn has_translation(
        &self,
        host: &dyn AttributeHost,
        attribute: &str,
        locale: Option<&str>,
    ) -> Result<bool, StoreError> {
        let locale = locale.unwrap_or_else(|| self.current_locale(host));
        Ok(self.translations(host, attribute, None)?.contains(locale))
    }

    /// Makes the dictionary exactly `values`.
    pub fn replace_translations<I, K, V>(
        &self,
        host: &mut dyn AttributeHost,
        attribute: &str,
        values: I,
    ) -> Result<&Self, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for locale in self.translated_locales(&*host, attribute)? {
            self.forget_translation(host, attribute, &locale)?;
        }
        self.set_translations(host, attribute, values)
    }

    /// Retained translations of every registered attribute.
    #[must_use]
    pub fn all_translations(&self, host: &dyn AttributeHost) -> BTreeMap<String, TranslationSet> {
        self.registry
            .descriptors()
            .map(|descriptor| {
                let dictionary = codec::read_dictionary(host, descriptor.path());
                (descriptor.name().to_string(), self.retained(dictionary.as_ref(), None))
            })
            .collect()
    }

    /// Sorted union of translated locales over all registered attributes.
    #[must_use]
    pub fn locales(&self, host: &dyn AttributeHost) -> Vec<String> {
        self.all_translations(host)
            .values()
            .flat_map(TranslationSet::locales)
            .map(ToString::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Reads `name` the way a model accessor would.
    ///
    /// Translatable attributes resolve in the current locale with fallback. Other
    /// columns are decoded as JSON, or returned as a string when they are not JSON.
    #[must_use]
    pub fn attribute(&self, host: &dyn AttributeHost, name: &str) -> Value {
        if let Ok(descriptor) = self.registry.describe(name) {
            return self.resolve(host, descriptor, self.current_locale(host), true);
        }

        host.raw_attribute(name).map_or(Value::Null, |raw| {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        })
    }

    /// Writes `name` the way a model mutator would.
    ///
    /// A JSON object assigned to a translatable attribute is treated as a full
    /// locale map. Any other value is stored in the current locale.
    pub fn set_attribute(
        &self,
        host: &mut dyn AttributeHost,
        name: &str,
        value: Value,
    ) -> Result<&Self, StoreError> {
        if !self.registry.is_translatable(name) {
            let raw = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(codec::encode(&other, self.policy.unescaped_unicode)),
            };
            host.set_raw_attribute(name, raw);
            return Ok(self);
        }

        match value {
            Value::Object(values) => self.set_translations(host, name, values),
            value => {
                let locale = self.current_locale(&*host).to_string();
                self.set_translation(host, name, &locale, value)
            }
        }
    }

    /// Every registered attribute resolved in the current locale.
    #[must_use]
    pub fn localized_attributes(&self, host: &dyn AttributeHost) -> Map<String, Value> {
        let locale = self.current_locale(host);
        self.registry
            .descriptors()
            .map(|descriptor| (descriptor.name().to_string(), self.resolve(host, descriptor, locale, true)))
            .collect()
    }

    fn resolve(
        &self,
        host: &dyn AttributeHost,
        descriptor: &AttributeDescriptor,
        locale: &str,
        use_fallback: bool,
    ) -> Value {
        let attribute = descriptor.name();
        let dictionary = codec::read_dictionary(host, descriptor.path());
        let translated = self.retained(dictionary.as_ref(), None);
        let translated_locales: Vec<&str> = translated.locales().collect();

        let fallback = Fallback {
            enabled: use_fallback && host.uses_fallback_locale(),
            locale: host.fallback_locale().or(self.policy.fallback_locale.as_deref()),
            any: self.policy.fallback_any,
        };
        let normalized = normalize_locale(locale, &translated_locales, fallback);

        let mut value = dictionary
            .as_ref()
            .and_then(|dictionary| dictionary.get(normalized))
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| self.policy.empty_value());

        if normalized != locale
            && let Some(callback) = self.policy.missing_translation_callback()
        {
            let entity = host.entity_ref();
            let missing = MissingTranslation {
                entity: &entity,
                attribute,
                requested_locale: locale,
                value: &value,
                resolved_locale: normalized,
            };
            match callback(&missing) {
                Ok(Some(replacement)) => value = Value::String(replacement),
                Ok(None) => {},
                Err(e) => {
                    tracing::warn!(attribute, locale, error = %e, "Missing translation callback failed");
                },
            }
        }

        let value = self.registry.cast_value(value, descriptor);
        match host.transformer() {
            Some(transformer) => transformer.after_get(attribute, value),
            None => value,
        }
    }

    fn retained(&self, dictionary: Option<&Map<String, Value>>, allowed_locales: Option<&[&str]>) -> TranslationSet {
        dictionary
            .into_iter()
            .flatten()
            .filter(|(locale, value)| {
                self.policy.retains(value)
                    && allowed_locales.is_none_or(|allowed| allowed.contains(&locale.as_str()))
            })
            .map(|(locale, value)| (locale.clone(), value.clone()))
            .collect()
    }

    fn write(&self, host: &mut dyn AttributeHost, path: &AttributePath, value: Value) {
        codec::write_value(host, path, value, self.policy.unescaped_unicode);
    }
}

impl fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationStore")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("events", &"<sink>")
            .finish()
    }
}
