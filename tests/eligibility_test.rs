//! Unit tests for the provider eligibility filter.
//!
//! The filter is a pure function over a request, a capability snapshot and a
//! point in time, so no running server or database is needed.
//!
//! Run with: `cargo test --test eligibility_test`

use chrono::{Duration, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use lexbid_backend::lifecycle::eligibility::{
    threshold_floor, visible, ProviderCapabilities, RequestFilter,
};
use lexbid_backend::models::requests::{
    self, AssignmentType, Categories, RequestState, SelectionPolicy,
};

/// Helper: a pending request with always-pass thresholds and a deadline
/// 24 hours out.
fn open_request(id: i32) -> requests::Model {
    let now = Utc::now();
    requests::Model {
        id,
        owner_id: Uuid::new_v4(),
        title: "Supplier agreement review".to_string(),
        description: "Review and redline a supplier agreement".to_string(),
        state: RequestState::Pending,
        offers_deadline: now + Duration::hours(24),
        selection_policy: SelectionPolicy::Automatic,
        category: Categories::Corporate,
        subcategory: None,
        assignment_type: AssignmentType::OneTime,
        min_provider_size: "0".to_string(),
        min_provider_rating: "0".to_string(),
        details: None,
        contract_result: None,
        created_at: now,
    }
}

/// Helper: a provider snapshot with both capability attributes on file.
fn caps(size: i32, rating: f64) -> ProviderCapabilities {
    ProviderCapabilities {
        company_name: Some("Acme Legal".to_string()),
        company_size: Some(size),
        rating: Some(rating),
    }
}

fn no_filter() -> RequestFilter {
    RequestFilter::default()
}

#[test]
fn test_threshold_parsing() {
    assert_eq!(threshold_floor("10"), 10.0);
    assert_eq!(threshold_floor(">=10"), 10.0);
    assert_eq!(threshold_floor("≥10"), 10.0);
    assert_eq!(threshold_floor("4.5+"), 4.5);
    // Unparseable thresholds default to 0 (always pass), by policy.
    assert_eq!(threshold_floor("Any"), 0.0);
    assert_eq!(threshold_floor(""), 0.0);
    assert_eq!(threshold_floor("N/A"), 0.0);
}

#[test]
fn test_size_floor_gates_visibility() {
    let mut request = open_request(1);
    request.min_provider_size = "≥10".to_string();
    let now = Utc::now();
    let none = HashSet::new();

    assert!(!visible(&request, &caps(5, 4.0), &[], &none, now, &no_filter()));
    assert!(visible(&request, &caps(15, 4.0), &[], &none, now, &no_filter()));
    // Meets-or-exceeds: the boundary passes.
    assert!(visible(&request, &caps(10, 4.0), &[], &none, now, &no_filter()));
}

#[test]
fn test_rating_floor_gates_visibility() {
    let mut request = open_request(1);
    request.min_provider_rating = "4.5".to_string();
    let now = Utc::now();
    let none = HashSet::new();

    assert!(!visible(&request, &caps(10, 4.0), &[], &none, now, &no_filter()));
    assert!(visible(&request, &caps(10, 4.5), &[], &none, now, &no_filter()));
}

#[test]
fn test_missing_capability_data_sees_nothing() {
    let request = open_request(1);
    let now = Utc::now();
    let none = HashSet::new();

    // Even with always-pass thresholds, absent size or rating means no
    // visibility at all.
    let no_size = ProviderCapabilities {
        company_name: Some("Acme Legal".to_string()),
        company_size: None,
        rating: Some(4.8),
    };
    let no_rating = ProviderCapabilities {
        company_name: Some("Acme Legal".to_string()),
        company_size: Some(25),
        rating: None,
    };
    assert!(!visible(&request, &no_size, &[], &none, now, &no_filter()));
    assert!(!visible(&request, &no_rating, &[], &none, now, &no_filter()));
}

#[test]
fn test_only_open_requests_are_visible() {
    let now = Utc::now();
    let none = HashSet::new();

    let mut on_hold = open_request(1);
    on_hold.state = RequestState::OnHold;
    assert!(!visible(&on_hold, &caps(10, 4.0), &[], &none, now, &no_filter()));

    let mut expired = open_request(2);
    expired.state = RequestState::Expired;
    assert!(!visible(&expired, &caps(10, 4.0), &[], &none, now, &no_filter()));

    let mut past_deadline = open_request(3);
    past_deadline.offers_deadline = now - Duration::minutes(1);
    assert!(!visible(&past_deadline, &caps(10, 4.0), &[], &none, now, &no_filter()));
}

#[test]
fn test_already_offered_requests_are_hidden() {
    let request = open_request(7);
    let now = Utc::now();
    let offered: HashSet<i32> = [7].into_iter().collect();

    assert!(!visible(&request, &caps(10, 4.0), &[], &offered, now, &no_filter()));
}

#[test]
fn test_blocklist_hides_request() {
    let request = open_request(1);
    let now = Utc::now();
    let none = HashSet::new();

    let blocklist = vec!["acme legal".to_string()];
    // Case-insensitive match against the purchaser's blocklist.
    assert!(!visible(&request, &caps(10, 4.0), &blocklist, &none, now, &no_filter()));

    let other_blocklist = vec!["Some Other Firm".to_string()];
    assert!(visible(&request, &caps(10, 4.0), &other_blocklist, &none, now, &no_filter()));
}

#[test]
fn test_category_filters_match_exactly() {
    let mut request = open_request(1);
    request.subcategory = Some("mergers".to_string());
    let now = Utc::now();
    let none = HashSet::new();

    let matching = RequestFilter {
        category: Some(Categories::Corporate),
        subcategory: Some("mergers".to_string()),
        assignment_type: Some(AssignmentType::OneTime),
    };
    assert!(visible(&request, &caps(10, 4.0), &[], &none, now, &matching));

    let wrong_category = RequestFilter {
        category: Some(Categories::Tax),
        ..RequestFilter::default()
    };
    assert!(!visible(&request, &caps(10, 4.0), &[], &none, now, &wrong_category));

    let wrong_subcategory = RequestFilter {
        subcategory: Some("ipo".to_string()),
        ..RequestFilter::default()
    };
    assert!(!visible(&request, &caps(10, 4.0), &[], &none, now, &wrong_subcategory));

    let wrong_assignment = RequestFilter {
        assignment_type: Some(AssignmentType::Ongoing),
        ..RequestFilter::default()
    };
    assert!(!visible(&request, &caps(10, 4.0), &[], &none, now, &wrong_assignment));
}
