//! Glob matchers for record files and attribute names.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};

use super::RecordFilesConfig;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid record include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid record exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid attribute pattern '{pattern}': {source}")]
    InvalidAttributePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files under a records directory against the configured patterns.
#[derive(Debug, Clone)]
pub struct RecordFileMatcher {
    root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl RecordFileMatcher {
    pub fn new(root: PathBuf, config: &RecordFilesConfig) -> Result<Self, MatcherError> {
        let include_set = build_glob_set(&config.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = build_glob_set(&config.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { root, include_set, exclude_set })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the path matches `includePatterns` but not `excludePatterns`.
    ///
    /// The path must be absolute and under the root.
    #[must_use]
    pub fn is_record_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.root).ok() else {
            return false;
        };

        self.is_record_file_relative(relative_path)
    }

    /// Same as [`RecordFileMatcher::is_record_file`] for a path relative to the root.
    #[must_use]
    pub fn is_record_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

/// Selects attribute names with glob patterns (`meta->*`, `title`).
///
/// Patterns are matched against the full display name, and `*` also matches `->`.
#[derive(Debug, Clone)]
pub struct AttributeFilter {
    set: GlobSet,
}

impl AttributeFilter {
    pub fn new(patterns: &[String]) -> Result<Self, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern).literal_separator(false).build().map_err(
                |source| MatcherError::InvalidAttributePattern { pattern: pattern.clone(), source },
            )?;
            builder.add(glob);
        }
        Ok(Self { set: builder.build()? })
    }

    #[must_use]
    pub fn matches(&self, attribute: &str) -> bool {
        self.set.is_match(attribute)
    }

    /// Keeps the names matching any pattern, preserving their order.
    #[must_use]
    pub fn select<'a>(&self, attributes: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        attributes.into_iter().filter(|a| self.matches(a)).map(ToString::to_string).collect()
    }
}

fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
where
    F: Fn(String, globset::Error) -> MatcherError,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn create_config(include: &[&str], exclude: &[&str]) -> RecordFilesConfig {
        RecordFilesConfig {
            include_patterns: include.iter().copied().map(String::from).collect(),
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
        }
    }

    #[rstest]
    fn is_record_file_with_default_patterns() {
        let matcher = RecordFileMatcher::new(PathBuf::from("/data"), &RecordFilesConfig::default())
            .expect("valid patterns");

        assert!(matcher.is_record_file(Path::new("/data/articles.json")));
        assert!(matcher.is_record_file(Path::new("/data/2024/articles.jsonl")));

        assert!(!matcher.is_record_file(Path::new("/data/.translatable.json")));
        assert!(!matcher.is_record_file(Path::new("/data/README.md")));
        assert!(!matcher.is_record_file(Path::new("/other/articles.json")));
    }

    #[rstest]
    fn is_record_file_with_exclude_patterns() {
        let matcher =
            RecordFileMatcher::new(PathBuf::from("/data"), &create_config(&["**/*.json"], &["archive/**"]))
                .expect("valid patterns");

        assert!(matcher.is_record_file_relative(Path::new("current/a.json")));
        assert!(!matcher.is_record_file_relative(Path::new("archive/a.json")));
        assert_eq!(matcher.root(), Path::new("/data"));
    }

    #[rstest]
    fn new_with_invalid_include_pattern() {
        let result = RecordFileMatcher::new(PathBuf::from("/data"), &create_config(&["**/*.{json"], &[]));

        assert!(matches!(result, Err(MatcherError::InvalidIncludePattern { .. })));
    }

    #[rstest]
    fn new_with_invalid_exclude_pattern() {
        let result =
            RecordFileMatcher::new(PathBuf::from("/data"), &create_config(&["**/*.json"], &["[invalid"]));

        assert!(matches!(result, Err(MatcherError::InvalidExcludePattern { .. })));
    }

    #[rstest]
    fn attribute_filter_selects_in_order() {
        let filter =
            AttributeFilter::new(&["meta->*".to_string(), "title".to_string()]).unwrap();

        let selected = filter.select(["title", "body", "meta->seo", "meta->og"]);

        assert_eq!(selected, vec!["title", "meta->seo", "meta->og"]);
    }

    #[rstest]
    fn attribute_filter_rejects_invalid_pattern() {
        let result = AttributeFilter::new(&["{title".to_string()]);

        assert!(matches!(result, Err(MatcherError::InvalidAttributePattern { .. })));
    }
}
