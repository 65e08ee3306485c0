//! Test helpers shared by unit test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use serde_json::Value;

use crate::attribute::{
    AttributeDescriptor,
    AttributeRegistry,
    ValueKind,
};
use crate::entity::Record;

/// Registry used across store tests: plain, nested and typed attributes.
pub(crate) fn create_registry() -> AttributeRegistry {
    AttributeRegistry::from_names(["name", "other_field", "meta->title"])
        .with(AttributeDescriptor::typed("views", ValueKind::Integer))
}

/// Builds a record from a JSON object literal.
///
/// # Arguments
/// * `model` - model name
/// * `value` - object with an optional `id` and the raw columns
pub(crate) fn create_record(model: &str, value: Value) -> Record {
    Record::from_json(model, value).unwrap()
}
