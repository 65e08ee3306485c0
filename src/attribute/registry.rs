//! Registry of translatable attributes for one model.

use serde_json::Value;

use super::{
    AttributeDescriptor,
    InvalidCast,
    cast_value,
};
use crate::config::AttributeDeclaration;
use crate::store::StoreError;

/// Source of truth for "is this attribute translatable, and what type is it".
///
/// Descriptors keep their declaration order, which is also the order used by
/// operations that touch every attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRegistry {
    descriptors: Vec<AttributeDescriptor>,
}

impl AttributeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry of string attributes.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(Self::new(), |registry, name| {
            registry.with(AttributeDescriptor::new(name))
        })
    }

    /// Builds a registry from configuration declarations, validating every cast.
    pub fn from_declarations(declarations: &[AttributeDeclaration]) -> Result<Self, InvalidCast> {
        let mut registry = Self::new();
        for declaration in declarations {
            let descriptor = match declaration {
                AttributeDeclaration::Name(name) => AttributeDescriptor::new(name.clone()),
                AttributeDeclaration::Typed { name, cast } => {
                    AttributeDescriptor::with_cast(name.clone(), cast)?
                }
            };
            registry.register(descriptor);
        }
        Ok(registry)
    }

    /// Adds a descriptor, replacing any previous declaration with the same name.
    pub fn register(&mut self, descriptor: AttributeDescriptor) {
        if let Some(existing) = self.descriptors.iter_mut().find(|d| d.name() == descriptor.name())
        {
            *existing = descriptor;
        } else {
            self.descriptors.push(descriptor);
        }
    }

    #[must_use]
    pub fn with(mut self, descriptor: AttributeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    #[must_use]
    pub fn is_translatable(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Looks up a descriptor.
    ///
    /// # Errors
    /// [`StoreError::AttributeNotTranslatable`] when `name` is not registered.
    pub fn describe(&self, name: &str) -> Result<&AttributeDescriptor, StoreError> {
        self.find(name).ok_or_else(|| StoreError::AttributeNotTranslatable {
            attribute: name.to_string(),
            available: self.attribute_names().join(", "),
        })
    }

    /// Coerces a stored value to the descriptor's kind.
    #[must_use]
    pub fn cast_value(&self, raw: Value, descriptor: &AttributeDescriptor) -> Value {
        cast_value(raw, descriptor.kind())
    }

    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.descriptors.iter().map(AttributeDescriptor::name).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.descriptors.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn find(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }
}
