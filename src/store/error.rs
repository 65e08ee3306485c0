use thiserror::Error;

/// Errors raised by translation store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The attribute is not declared in the registry.
    #[error(
        "Cannot translate attribute `{attribute}` as it's not one of the translatable attributes: `{available}`"
    )]
    AttributeNotTranslatable { attribute: String, available: String },
}
