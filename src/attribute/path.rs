//! Structured addressing of a translation dictionary inside a raw column.

use std::fmt;

/// Separator used by the textual form of nested attribute names (`meta->title`).
pub const NESTED_SEPARATOR: &str = "->";

/// Location of a translation dictionary.
///
/// A plain attribute owns its whole column (`segments` is empty). A nested
/// attribute lives inside a JSON object stored in `column`, under the keys in
/// `segments`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    column: String,
    segments: Vec<String>,
}

impl AttributePath {
    /// Parses the textual form, splitting on [`NESTED_SEPARATOR`].
    ///
    /// # Examples
    /// ```
    /// use translatable::attribute::AttributePath;
    ///
    /// let path = AttributePath::parse("meta->title");
    /// assert_eq!(path.column(), "meta");
    /// assert_eq!(path.segments(), ["title"]);
    /// assert!(path.is_nested());
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let mut parts = name.split(NESTED_SEPARATOR);
        let column = parts.next().unwrap_or_default().to_string();
        let segments = parts.map(ToString::to_string).collect();
        Self { column, segments }
    }

    /// Builds a path from explicit segments.
    ///
    /// Unlike [`AttributePath::parse`], keys may contain a literal `->`.
    #[must_use]
    pub fn from_segments<I, S>(column: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { column: column.into(), segments: segments.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Renders a JSON-path column reference for a single locale, e.g. `meta->title->en`.
    ///
    /// Hosts use this when building `where` clauses against translated columns.
    #[must_use]
    pub fn query_column(&self, locale: &str) -> String {
        let mut column = self.to_string();
        column.push_str(NESTED_SEPARATOR);
        column.push_str(locale);
        column
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column)?;
        for segment in &self.segments {
            write!(f, "{NESTED_SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}
