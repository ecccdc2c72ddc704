use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Wrapper type for Actix-web app data.
pub type SinkData = Arc<dyn NotificationSink>;

/// Lifecycle events handed to the notification/export sink. Delivery,
/// retries and templating are the sink's problem; the core only emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    OfferSubmitted,
    QuestionAsked,
    QuestionAnswered,
    WinnerSelected,
}

#[derive(Debug, Clone, Serialize)]
pub struct LifecycleEvent {
    pub request_id: i32,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    /// Offer/contract/question ids the event is about.
    pub relevant_ids: Vec<i32>,
}

impl LifecycleEvent {
    pub fn new(
        request_id: i32,
        event_type: EventType,
        timestamp: DateTime<Utc>,
        relevant_ids: Vec<i32>,
    ) -> Self {
        Self {
            request_id,
            event_type,
            timestamp,
            relevant_ids,
        }
    }
}

/// Receives lifecycle events. Implementations must not block the caller;
/// anything slow belongs behind a queue on the sink side.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, event: LifecycleEvent);
}

/// Default sink: one structured log line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn publish(&self, event: LifecycleEvent) {
        tracing::info!(
            request_id = event.request_id,
            event_type = ?event.event_type,
            relevant_ids = ?event.relevant_ids,
            "lifecycle event",
        );
    }
}
