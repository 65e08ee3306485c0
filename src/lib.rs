//! translatable
//!
//! Multi-locale attribute storage for entities that persist translations as a JSON
//! object per column, with fallback-aware reads and change notifications.

pub mod attribute;
pub mod config;
pub mod entity;
pub mod events;
pub mod report;
pub mod store;

mod test_utils;

pub use attribute::{
    AttributeDescriptor,
    AttributeRegistry,
    ValueKind,
};
pub use config::Policy;
pub use entity::{
    AttributeHost,
    Record,
};
pub use store::{
    StoreError,
    TranslationSet,
    TranslationStore,
};
