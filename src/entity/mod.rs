//! Host entity capabilities and the in-memory [`Record`] host.

mod host;
mod record;

pub use host::{
    AttributeHost,
    EntityRef,
    ValueTransformer,
};
pub use record::{
    Record,
    RecordError,
};
