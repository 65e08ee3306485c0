//! Translatable attribute declarations, nested paths and cast coercion.

/// Value coercion
mod cast;
/// Attribute descriptors and value kinds
mod descriptor;
/// Nested attribute paths
mod path;
/// Attribute registry
mod registry;

pub use cast::cast_value;
pub use descriptor::{
    AVAILABLE_CASTS,
    AttributeDescriptor,
    InvalidCast,
    ValueKind,
};
pub use path::{
    AttributePath,
    NESTED_SEPARATOR,
};
pub use registry::AttributeRegistry;
