//! Tests for the lifecycle event payload handed to the notification sink.
//!
//! Run with: `cargo test --test events_test`

use chrono::Utc;

use lexbid_backend::lifecycle::events::{EventType, LifecycleEvent};

#[test]
fn test_event_type_serializes_screaming_snake() {
    assert_eq!(
        serde_json::to_string(&EventType::WinnerSelected).unwrap(),
        "\"WINNER_SELECTED\""
    );
    assert_eq!(
        serde_json::to_string(&EventType::OfferSubmitted).unwrap(),
        "\"OFFER_SUBMITTED\""
    );
    assert_eq!(
        serde_json::to_string(&EventType::QuestionAsked).unwrap(),
        "\"QUESTION_ASKED\""
    );
    assert_eq!(
        serde_json::to_string(&EventType::QuestionAnswered).unwrap(),
        "\"QUESTION_ANSWERED\""
    );
}

#[test]
fn test_event_payload_shape() {
    let event = LifecycleEvent::new(42, EventType::WinnerSelected, Utc::now(), vec![7, 9]);

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["request_id"], 42);
    assert_eq!(value["event_type"], "WINNER_SELECTED");
    assert_eq!(value["relevant_ids"], serde_json::json!([7, 9]));
    assert!(value["timestamp"].is_string());
}
