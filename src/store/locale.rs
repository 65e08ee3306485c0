//! Locale normalization for fallback-aware reads.

/// Fallback rules in effect for a single read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fallback<'a> {
    /// Whether the caller accepts a locale other than the requested one.
    pub enabled: bool,
    pub locale: Option<&'a str>,
    pub any: bool,
}

/// Picks the locale a read should use.
///
/// The order is: exact hit, then the fallback locale, then the first translated locale
/// when `any` is set. A miss returns `locale` unchanged.
#[must_use]
pub fn normalize_locale<'a>(locale: &'a str, translated: &[&'a str], fallback: Fallback<'a>) -> &'a str {
    if translated.contains(&locale) || !fallback.enabled {
        return locale;
    }

    if let Some(fallback_locale) = fallback.locale
        && !fallback_locale.is_empty()
        && translated.contains(&fallback_locale)
    {
        return fallback_locale;
    }

    if fallback.any
        && let Some(first) = translated.first()
    {
        return first;
    }

    locale
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    const fn fallback(enabled: bool, locale: Option<&'static str>, any: bool) -> Fallback<'static> {
        Fallback { enabled, locale, any }
    }

    #[rstest]
    #[case::exact_hit("fr", &["en", "fr"], fallback(true, Some("en"), false), "fr")]
    #[case::exact_hit_without_fallback("fr", &["fr"], fallback(false, None, false), "fr")]
    #[case::fallback_disabled("de", &["en"], fallback(false, Some("en"), true), "de")]
    #[case::fallback_locale("de", &["fr", "en"], fallback(true, Some("en"), false), "en")]
    #[case::fallback_locale_untranslated("de", &["fr"], fallback(true, Some("en"), false), "de")]
    #[case::empty_fallback_locale("de", &["", "fr"], fallback(true, Some(""), false), "de")]
    #[case::fallback_any_takes_first("de", &["fr", "nl"], fallback(true, Some("en"), true), "fr")]
    #[case::fallback_locale_beats_any("de", &["fr", "en"], fallback(true, Some("en"), true), "en")]
    #[case::fallback_any_nothing_translated("de", &[], fallback(true, None, true), "de")]
    #[case::miss("de", &["fr"], fallback(true, None, false), "de")]
    fn normalize_locale_cases(
        #[case] locale: &str,
        #[case] translated: &[&str],
        #[case] fallback: Fallback<'static>,
        #[case] expected: &str,
    ) {
        assert_that!(normalize_locale(locale, translated, fallback), eq(expected));
    }
}
