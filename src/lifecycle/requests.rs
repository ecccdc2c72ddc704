use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::db::requests as request_db;
use crate::lifecycle::clock::Clock;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::events::NotificationSink;
use crate::lifecycle::selection;
use crate::models::accounts;
use crate::models::requests::{self, validate_details, CreateRequest, RequestState, SelectionPolicy};

/// What a deadline evaluation decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineAction {
    /// Deadline not reached, or the request already left `Pending`.
    None,
    /// Manual policy: park the request until the purchaser picks a winner.
    Hold,
    /// Automatic policy: run winner selection now.
    SelectAutomatically,
}

/// Pure decision half of deadline evaluation. A request that is `OnHold` or
/// `Expired` is never re-evaluated, and nothing moves a request backward.
pub fn deadline_action(request: &requests::Model, now: DateTime<Utc>) -> DeadlineAction {
    if request.state != RequestState::Pending {
        return DeadlineAction::None;
    }
    if now < request.offers_deadline {
        return DeadlineAction::None;
    }
    match request.selection_policy {
        SelectionPolicy::Automatic => DeadlineAction::SelectAutomatically,
        SelectionPolicy::Manual => DeadlineAction::Hold,
    }
}

/// Evaluate a request against its deadline and persist the transition.
///
/// Evaluation is lazy: this runs whenever a request is read or listed, not
/// from a background timer, so a request can sit logically expired until the
/// next read touches it. Safe to race: the hold transition is idempotent and
/// automatic selection is guarded by the contract uniqueness constraint.
pub async fn evaluate_deadline(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    request: requests::Model,
) -> Result<requests::Model, LifecycleError> {
    match deadline_action(&request, clock.now()) {
        DeadlineAction::None => Ok(request),
        DeadlineAction::Hold => {
            let updated = request_db::set_state(db, request.id, RequestState::OnHold).await?;
            tracing::info!(
                request_id = updated.id,
                "deadline passed, request on hold awaiting manual selection",
            );
            Ok(updated)
        }
        DeadlineAction::SelectAutomatically => {
            let outcome = selection::select_automatic(db, clock, sink, request).await?;
            Ok(outcome.request)
        }
    }
}

/// Create a request owned by `owner`. The eligibility criteria and the
/// selection policy are snapshotted here and never mutated afterwards.
pub async fn create(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    owner: &accounts::Model,
    input: CreateRequest,
) -> Result<requests::Model, LifecycleError> {
    if owner.role != accounts::Roles::Purchaser && owner.role != accounts::Roles::Admin {
        return Err(LifecycleError::Unauthorized(
            "Only purchasers can post requests".to_string(),
        ));
    }
    let now = clock.now();
    if input.offers_deadline <= now {
        return Err(LifecycleError::InvalidState(
            "The offer deadline must be in the future".to_string(),
        ));
    }
    if let Some(details) = &input.details {
        validate_details(details).map_err(LifecycleError::InvalidState)?;
    }

    let request = request_db::insert_request(db, input, owner, now).await?;
    tracing::info!(
        request_id = request.id,
        owner_id = %owner.id,
        "request created",
    );
    Ok(request)
}
