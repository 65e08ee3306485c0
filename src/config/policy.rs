//! Request-scoped translation policy.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::TranslatableSettings;
use crate::entity::EntityRef;

/// Error type user callbacks may return. It is logged and discarded.
pub type CallbackError = Box<dyn Error + Send + Sync>;

/// Everything a missing-translation callback gets to see.
#[derive(Debug, Clone, Copy)]
pub struct MissingTranslation<'a> {
    pub entity: &'a EntityRef,
    pub attribute: &'a str,
    /// The locale the caller asked for.
    pub requested_locale: &'a str,
    /// The value resolved so far (possibly a fallback or the empty default).
    pub value: &'a Value,
    /// The locale normalization settled on.
    pub resolved_locale: &'a str,
}

/// Hook invoked when a read falls back to another locale.
///
/// `Ok(Some(text))` replaces the value, `Ok(None)` keeps it.
pub type MissingTranslationCallback =
    Arc<dyn Fn(&MissingTranslation<'_>) -> Result<Option<String>, CallbackError> + Send + Sync>;

/// Fallback and filtering rules consulted by the store.
///
/// Built once per process or request and shared behind an `Arc`.
#[derive(Clone)]
pub struct Policy {
    pub locale: String,
    pub fallback_locale: Option<String>,
    pub fallback_any: bool,
    pub allow_null_values: bool,
    pub allow_empty_string_values: bool,
    pub unescaped_unicode: bool,
    missing_translation_callback: Option<MissingTranslationCallback>,
}

impl Policy {
    #[must_use]
    pub fn from_settings(settings: &TranslatableSettings) -> Self {
        Self {
            locale: settings.locale.clone(),
            fallback_locale: settings.fallback_locale.clone(),
            fallback_any: settings.fallback_any,
            allow_null_values: settings.allow_null_values,
            allow_empty_string_values: settings.allow_empty_string_values,
            unescaped_unicode: settings.unescaped_unicode,
            missing_translation_callback: None,
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn with_fallback_locale(mut self, locale: Option<&str>) -> Self {
        self.fallback_locale = locale.map(ToString::to_string);
        self
    }

    #[must_use]
    pub const fn with_fallback_any(mut self, fallback_any: bool) -> Self {
        self.fallback_any = fallback_any;
        self
    }

    #[must_use]
    pub const fn allow_null_values(mut self, allow: bool) -> Self {
        self.allow_null_values = allow;
        self
    }

    #[must_use]
    pub const fn allow_empty_string_values(mut self, allow: bool) -> Self {
        self.allow_empty_string_values = allow;
        self
    }

    #[must_use]
    pub const fn with_unescaped_unicode(mut self, unescaped: bool) -> Self {
        self.unescaped_unicode = unescaped;
        self
    }

    #[must_use]
    pub fn with_missing_translation_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&MissingTranslation<'_>) -> Result<Option<String>, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.missing_translation_callback = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn missing_translation_callback(&self) -> Option<&MissingTranslationCallback> {
        self.missing_translation_callback.as_ref()
    }

    /// Retain predicate: only `null` and `""` are filtered, and only unless allowed.
    #[must_use]
    pub fn retains(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.allow_null_values,
            Value::String(s) if s.is_empty() => self.allow_empty_string_values,
            _ => true,
        }
    }

    /// What a read returns when nothing is stored.
    #[must_use]
    pub fn empty_value(&self) -> Value {
        if self.allow_null_values { Value::Null } else { Value::String(String::new()) }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_settings(&TranslatableSettings::default())
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("locale", &self.locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("fallback_any", &self.fallback_any)
            .field("allow_null_values", &self.allow_null_values)
            .field("allow_empty_string_values", &self.allow_empty_string_values)
            .field("unescaped_unicode", &self.unescaped_unicode)
            .field(
                "missing_translation_callback",
                &self.missing_translation_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::text(json!("Hello"), false, false, true)]
    #[case::zero_string(json!("0"), false, false, true)]
    #[case::zero(json!(0), false, false, true)]
    #[case::false_value(json!(false), false, false, true)]
    #[case::null(json!(null), false, false, false)]
    #[case::null_allowed(json!(null), true, false, true)]
    #[case::empty(json!(""), false, false, false)]
    #[case::empty_allowed(json!(""), false, true, true)]
    fn retains_only_filters_null_and_empty(
        #[case] value: Value,
        #[case] allow_null: bool,
        #[case] allow_empty: bool,
        #[case] expected: bool,
    ) {
        let policy =
            Policy::default().allow_null_values(allow_null).allow_empty_string_values(allow_empty);

        assert_that!(policy.retains(&value), eq(expected));
    }

    #[rstest]
    fn empty_value_depends_on_null_flag() {
        assert_eq!(Policy::default().empty_value(), json!(""));
        assert_eq!(Policy::default().allow_null_values(true).empty_value(), json!(null));
    }

    #[rstest]
    fn defaults_match_settings() {
        let policy = Policy::default();

        assert_that!(policy.locale, eq("en"));
        assert_eq!(policy.fallback_locale.as_deref(), Some("en"));
        assert_that!(policy.fallback_any, eq(false));
        assert_that!(policy.missing_translation_callback().is_none(), eq(true));
    }

    #[rstest]
    fn builder_sets_callback() {
        let policy = Policy::default()
            .with_fallback_locale(None)
            .with_missing_translation_callback(|_| Ok(Some("missing".to_string())));

        assert!(policy.fallback_locale.is_none());
        assert_that!(policy.missing_translation_callback().is_some(), eq(true));
    }
}
