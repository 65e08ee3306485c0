//! Change notifications emitted by translation writes.

use std::sync::{
    Mutex,
    PoisonError,
};

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::entity::EntityRef;

/// Published once per `set_translation`, synchronously, at the point of write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationChanged {
    pub entity: EntityRef,
    pub attribute: String,
    pub locale: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Receiver of [`TranslationChanged`] events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &TranslationChanged);
}

impl<F> EventSink for F
where
    F: Fn(&TranslationChanged) + Send + Sync,
{
    fn publish(&self, event: &TranslationChanged) {
        self(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: &TranslationChanged) {}
}

/// Logs every event at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&self, event: &TranslationChanged) {
        tracing::debug!(
            entity = %event.entity,
            attribute = %event.attribute,
            locale = %event.locale,
            old_value = %event.old_value,
            new_value = %event.new_value,
            "Translation has been set"
        );
    }
}

/// Collects events in memory, in publication order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TranslationChanged>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events published so far.
    #[must_use]
    pub fn events(&self) -> Vec<TranslationChanged> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns the events published so far.
    pub fn take(&self) -> Vec<TranslationChanged> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: &TranslationChanged) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };

    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    fn event(locale: &str) -> TranslationChanged {
        TranslationChanged {
            entity: EntityRef::new("Article", Some(json!(1))),
            attribute: "name".to_string(),
            locale: locale.to_string(),
            old_value: json!(""),
            new_value: json!("value"),
        }
    }

    #[googletest::test]
    fn recording_sink_keeps_order_and_drains() {
        let sink = RecordingSink::new();
        sink.publish(&event("en"));
        sink.publish(&event("fr"));

        expect_that!(sink.len(), eq(2));
        let locales: Vec<String> = sink.take().into_iter().map(|e| e.locale).collect();
        expect_that!(locales, elements_are![eq("en"), eq("fr")]);
        expect_that!(sink.is_empty(), eq(true));
    }

    #[googletest::test]
    fn closures_are_sinks() {
        let count = AtomicUsize::new(0);
        let sink = |_: &TranslationChanged| {
            count.fetch_add(1, Ordering::SeqCst);
        };

        sink.publish(&event("en"));
        NullSink.publish(&event("en"));
        TracingSink.publish(&event("en"));

        expect_that!(count.load(Ordering::SeqCst), eq(1));
    }

    #[googletest::test]
    fn serializes_in_camel_case() {
        let value = serde_json::to_value(event("en")).unwrap_or_default();

        expect_that!(value.get("oldValue").is_some(), eq(true));
        expect_that!(value.get("newValue").is_some(), eq(true));
    }
}
