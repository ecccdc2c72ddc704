use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

use crate::db::{offers as offer_db, requests as request_db};
use crate::lifecycle::clock::Clock;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::events::{EventType, LifecycleEvent, NotificationSink};
use crate::models::accounts::{self, Roles};
use crate::models::offers::{self, SubmitOffer};
use crate::models::requests::RequestState;

/// Submit an offer against an open request.
///
/// Fails with `Conflict` on a duplicate bid or a passed deadline, and with
/// `InvalidState` once the request has left `Pending`. The duplicate check is
/// backed by the unique index on `(request_id, provider_id)`: a lost race on
/// the pre-check still surfaces as `Conflict`, never as a second offer.
pub async fn submit(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    provider: &accounts::Model,
    input: SubmitOffer,
) -> Result<offers::Model, LifecycleError> {
    if provider.role != Roles::Provider {
        return Err(LifecycleError::Unauthorized(
            "Only providers can submit offers".to_string(),
        ));
    }
    if input.price.is_sign_negative() || input.price.is_zero() {
        return Err(LifecycleError::InvalidState(
            "Offer price must be positive".to_string(),
        ));
    }

    let request = request_db::get_request_by_id(db, input.request_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Request", input.request_id))?;

    // Lazy deadline evaluation: a logically-expired request must transition
    // (and possibly auto-select) before this submission is judged against it.
    let request = super::requests::evaluate_deadline(db, clock, sink, request).await?;

    if request.owner_id == provider.id {
        return Err(LifecycleError::Unauthorized(
            "You cannot submit an offer on your own request".to_string(),
        ));
    }
    if request.state != RequestState::Pending {
        return Err(LifecycleError::InvalidState(format!(
            "Request {} is no longer open for offers",
            request.id
        )));
    }
    if clock.now() >= request.offers_deadline {
        return Err(LifecycleError::Conflict(format!(
            "The offer deadline for request {} has passed",
            request.id
        )));
    }
    if offer_db::offer_exists(db, request.id, provider.id).await? {
        return Err(duplicate_offer(request.id));
    }

    let offer = match offer_db::insert_offer(db, &input, provider.id, clock.now()).await {
        Ok(offer) => offer,
        Err(err) if LifecycleError::is_unique_violation(&err) => {
            return Err(duplicate_offer(request.id));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        request_id = request.id,
        offer_id = offer.id,
        provider_id = %provider.id,
        "offer submitted",
    );
    sink.publish(LifecycleEvent::new(
        request.id,
        EventType::OfferSubmitted,
        clock.now(),
        vec![offer.id],
    ));

    Ok(offer)
}

fn duplicate_offer(request_id: i32) -> LifecycleError {
    LifecycleError::Conflict(format!(
        "You have already submitted an offer for request {request_id}"
    ))
}

/// Set the winning offer to `Won` and every sibling to `Lost`, inside the
/// caller's transaction. Only the winner selection engine calls this; it is
/// all-or-nothing with the contract insert and the request transition.
pub(crate) async fn finalize_offers<C: ConnectionTrait>(
    conn: &C,
    request_id: i32,
    winner_id: i32,
) -> Result<(), DbErr> {
    offer_db::finalize_statuses(conn, request_id, winner_id).await
}
