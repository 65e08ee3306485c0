//! Translatable attribute declarations.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use super::AttributePath;

/// Cast names accepted by [`ValueKind::from_str`].
pub const AVAILABLE_CASTS: &[&str] = &[
    "string", "bool", "boolean", "int", "integer", "float", "double", "real", "array", "json",
    "object",
];

/// Raised when an attribute declares a cast outside [`AVAILABLE_CASTS`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot cast to type `{cast}`. Available casts are: {available}")]
pub struct InvalidCast {
    pub cast: String,
    /// [`AVAILABLE_CASTS`], comma separated.
    pub available: String,
}

impl InvalidCast {
    /// Rejects `cast`, listing every accepted name.
    fn new(cast: &str) -> Self {
        Self { cast: cast.to_string(), available: AVAILABLE_CASTS.join(", ") }
    }
}

/// The type a stored translation is coerced to on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Integer,
    Float,
    /// Arrays and objects, passed through as structured JSON.
    Array,
}

impl FromStr for ValueKind {
    type Err = InvalidCast;

    fn from_str(cast: &str) -> Result<Self, Self::Err> {
        match cast {
            "string" => Ok(Self::String),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Integer),
            "float" | "double" | "real" => Ok(Self::Float),
            "array" | "json" | "object" => Ok(Self::Array),
            _ => Err(InvalidCast::new(cast)),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

/// Static declaration of one translatable attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    name: String,
    path: AttributePath,
    kind: ValueKind,
}

impl AttributeDescriptor {
    /// Declares a string attribute. `name` may use the `parent->child` nested form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::typed(name, ValueKind::String)
    }

    #[must_use]
    pub fn typed(name: impl Into<String>, kind: ValueKind) -> Self {
        let name = name.into();
        let path = AttributePath::parse(&name);
        Self { name, path, kind }
    }

    /// Declares an attribute from a cast name such as `"bool"` or `"array"`.
    pub fn with_cast(name: impl Into<String>, cast: &str) -> Result<Self, InvalidCast> {
        Ok(Self::typed(name, cast.parse()?))
    }

    /// Declares a nested attribute from an explicit path.
    ///
    /// The descriptor is still looked up by its display name (`path.to_string()`).
    #[must_use]
    pub fn at_path(path: AttributePath, kind: ValueKind) -> Self {
        Self { name: path.to_string(), path, kind }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn path(&self) -> &AttributePath {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case("string", ValueKind::String)]
    #[case("bool", ValueKind::Bool)]
    #[case("boolean", ValueKind::Bool)]
    #[case("integer", ValueKind::Integer)]
    #[case("int", ValueKind::Integer)]
    #[case("float", ValueKind::Float)]
    #[case("double", ValueKind::Float)]
    #[case("array", ValueKind::Array)]
    #[case("json", ValueKind::Array)]
    fn with_cast_resolves_kind(#[case] cast: &str, #[case] expected: ValueKind) {
        let descriptor = AttributeDescriptor::with_cast("name", cast).unwrap();

        assert_that!(descriptor.name(), eq("name"));
        assert_that!(descriptor.kind(), eq(expected));
    }

    #[rstest]
    fn new_defaults_to_string() {
        assert_that!(AttributeDescriptor::new("name").kind(), eq(ValueKind::String));
    }

    #[rstest]
    fn with_cast_rejects_unknown_cast() {
        let result = AttributeDescriptor::with_cast("name", "unknown cast");

        assert_that!(
            result,
            err(all![
                field!(InvalidCast.cast, eq("unknown cast")),
                field!(InvalidCast.available, starts_with("string, bool, boolean, int")),
                displays_as(contains_substring("Available casts are: string, bool"))
            ])
        );
    }

    #[rstest]
    fn nested_name_is_parsed_into_path() {
        let descriptor = AttributeDescriptor::new("meta->title");

        assert_that!(descriptor.path().column(), eq("meta"));
        assert_that!(descriptor.path().is_nested(), eq(true));
    }

    #[rstest]
    fn at_path_uses_display_name() {
        let path = AttributePath::from_segments("meta", ["title"]);
        let descriptor = AttributeDescriptor::at_path(path, ValueKind::Bool);

        assert_that!(descriptor.name(), eq("meta->title"));
        assert_that!(descriptor.kind(), eq(ValueKind::Bool));
    }
}
