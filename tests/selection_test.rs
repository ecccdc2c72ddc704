//! Unit tests for winner picking and the deadline evaluation decision.
//!
//! Both are pure functions (the clock is injected), so no running server or
//! database is needed.
//!
//! Run with: `cargo test --test selection_test`

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use lexbid_backend::lifecycle::clock::{Clock, FixedClock};
use lexbid_backend::lifecycle::requests::{deadline_action, DeadlineAction};
use lexbid_backend::lifecycle::selection::pick_winner;
use lexbid_backend::models::offers::{self, OfferStatus};
use lexbid_backend::models::requests::{
    self, validate_details, AssignmentType, Categories, RequestState, SelectionPolicy,
};

fn offer(id: i32, price: Decimal) -> offers::Model {
    offers::Model {
        id,
        request_id: 1,
        provider_id: Uuid::new_v4(),
        price,
        note: None,
        status: OfferStatus::Pending,
        created_at: Utc::now(),
    }
}

fn request(state: RequestState, policy: SelectionPolicy) -> requests::Model {
    let now = Utc::now();
    requests::Model {
        id: 1,
        owner_id: Uuid::new_v4(),
        title: "Lease negotiation".to_string(),
        description: "Negotiate an office lease renewal".to_string(),
        state,
        offers_deadline: now,
        selection_policy: policy,
        category: Categories::RealEstate,
        subcategory: None,
        assignment_type: AssignmentType::OneTime,
        min_provider_size: "0".to_string(),
        min_provider_rating: "0".to_string(),
        details: None,
        contract_result: None,
        created_at: now - Duration::days(7),
    }
}

#[test]
fn test_lowest_price_wins_with_earliest_tiebreak() {
    // 300 and 300.00 tie numerically; the earlier-submitted one (lower id)
    // must win, never the 450 or 500.
    let offers = vec![
        offer(10, dec!(500)),
        offer(11, dec!(300)),
        offer(12, dec!(300.00)),
        offer(13, dec!(450)),
    ];

    let winner = pick_winner(&offers).expect("a winner");
    assert_eq!(winner.id, 11);
    assert_eq!(winner.price, dec!(300));
}

#[test]
fn test_prices_compare_numerically_not_textually() {
    // As text "1000" < "999"; numerically the 999 offer must win.
    let offers = vec![offer(1, dec!(1000)), offer(2, dec!(999))];
    assert_eq!(pick_winner(&offers).unwrap().id, 2);
}

#[test]
fn test_only_pending_offers_are_considered() {
    let mut lost = offer(1, dec!(100));
    lost.status = OfferStatus::Lost;
    let offers = vec![lost, offer(2, dec!(200))];

    assert_eq!(pick_winner(&offers).unwrap().id, 2);
}

#[test]
fn test_no_offers_no_winner() {
    assert!(pick_winner(&[]).is_none());
}

#[test]
fn test_deadline_not_reached_is_a_noop() {
    let mut req = request(RequestState::Pending, SelectionPolicy::Automatic);
    req.offers_deadline = Utc::now() + Duration::hours(1);

    assert_eq!(deadline_action(&req, Utc::now()), DeadlineAction::None);
}

#[test]
fn test_due_automatic_request_selects() {
    let req = request(RequestState::Pending, SelectionPolicy::Automatic);
    let after = req.offers_deadline + Duration::seconds(1);

    assert_eq!(
        deadline_action(&req, after),
        DeadlineAction::SelectAutomatically
    );
    // Boundary: now == deadline counts as passed.
    assert_eq!(
        deadline_action(&req, req.offers_deadline),
        DeadlineAction::SelectAutomatically
    );
}

#[test]
fn test_due_manual_request_goes_on_hold() {
    let req = request(RequestState::Pending, SelectionPolicy::Manual);
    let after = req.offers_deadline + Duration::seconds(1);

    assert_eq!(deadline_action(&req, after), DeadlineAction::Hold);
}

#[test]
fn test_terminal_states_are_never_reevaluated() {
    let after = Utc::now() + Duration::days(1);

    let on_hold = request(RequestState::OnHold, SelectionPolicy::Manual);
    assert_eq!(deadline_action(&on_hold, after), DeadlineAction::None);

    let expired = request(RequestState::Expired, SelectionPolicy::Automatic);
    assert_eq!(deadline_action(&expired, after), DeadlineAction::None);
}

#[test]
fn test_fixed_clock_pins_time() {
    let instant = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let clock = FixedClock(instant);

    assert_eq!(clock.now(), instant);

    // A request due at that exact instant evaluates as due under the pinned
    // clock, regardless of the wall clock running the tests.
    let mut req = request(RequestState::Pending, SelectionPolicy::Automatic);
    req.offers_deadline = instant;
    assert_eq!(
        deadline_action(&req, clock.now()),
        DeadlineAction::SelectAutomatically
    );
}

#[test]
fn test_details_must_be_a_flat_string_map() {
    let ok = serde_json::json!({"practice_area": "real estate", "urgency": "high"});
    assert!(validate_details(&ok).is_ok());

    let nested = serde_json::json!({"meta": {"inner": "x"}});
    assert!(validate_details(&nested).is_err());

    let non_string_value = serde_json::json!({"count": 3});
    assert!(validate_details(&non_string_value).is_err());

    let not_an_object = serde_json::json!(["a", "b"]);
    assert!(validate_details(&not_an_object).is_err());
}
