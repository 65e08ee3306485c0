//! Capabilities the translation store needs from its host entity.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Identity of an entity as carried by events and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub model: String,
    /// Primary key, `None` for entities that were never persisted.
    pub key: Option<Value>,
}

impl EntityRef {
    #[must_use]
    pub fn new(model: impl Into<String>, key: Option<Value>) -> Self {
        Self { model: model.into(), key }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(Value::String(key)) => write!(f, "{}#{key}", self.model),
            Some(key) => write!(f, "{}#{key}", self.model),
            None => f.write_str(&self.model),
        }
    }
}

/// Attribute-level hooks applied around translation reads and writes.
///
/// Both hooks default to the identity.
pub trait ValueTransformer {
    /// Runs on every value passed to `set_translation`, before it is stored.
    ///
    /// Must be idempotent: `forget_translation` writes the remaining locales
    /// back through `set_translations`, so stored values pass through it again.
    fn before_set(&self, _attribute: &str, _locale: &str, value: Value) -> Value {
        value
    }

    /// Runs last on every value returned by `translation`.
    fn after_get(&self, _attribute: &str, value: Value) -> Value {
        value
    }
}

/// The host entity a translation store reads from and writes to.
///
/// Raw attributes are opaque serialized strings (normally JSON objects). A
/// `None` column means absent or null.
pub trait AttributeHost {
    fn raw_attribute(&self, column: &str) -> Option<&str>;

    fn set_raw_attribute(&mut self, column: &str, value: Option<String>);

    fn model_name(&self) -> &str;

    fn key(&self) -> Option<Value> {
        None
    }

    /// Per-instance locale. `None` defers to the policy's current locale.
    fn locale(&self) -> Option<&str> {
        None
    }

    /// Per-instance fallback locale, taking precedence over the policy's.
    fn fallback_locale(&self) -> Option<&str> {
        None
    }

    /// When `false`, reads never fall back regardless of what the caller asks for.
    fn uses_fallback_locale(&self) -> bool {
        true
    }

    fn transformer(&self) -> Option<&dyn ValueTransformer> {
        None
    }

    fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.model_name(), self.key())
    }
}
