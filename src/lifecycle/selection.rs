use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::db::{contracts as contract_db, offers as offer_db, requests as request_db};
use crate::lifecycle::clock::Clock;
use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::events::{EventType, LifecycleEvent, NotificationSink};
use crate::lifecycle::offers::finalize_offers;
use crate::models::accounts;
use crate::models::contracts;
use crate::models::offers::{self, OfferStatus};
use crate::models::requests::{self, RequestState};

/// Result of a selection run. `contract` is `None` only for the
/// zero-offer automatic path, which expires the request without a winner.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub request: requests::Model,
    pub contract: Option<contracts::Model>,
}

/// Deterministic winner choice: lowest numeric price, ties broken by the
/// smallest offer id (earliest submitted). Prices compare as decimals, so
/// `300` and `300.00` tie.
pub fn pick_winner(offers: &[offers::Model]) -> Option<&offers::Model> {
    offers
        .iter()
        .filter(|o| o.status == OfferStatus::Pending)
        .min_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)))
}

/// Automatic mode, reached from deadline evaluation. With no pending offers
/// the request simply expires; otherwise the lowest-priced offer wins.
pub async fn select_automatic(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    request: requests::Model,
) -> Result<SelectionOutcome, LifecycleError> {
    let pending = offer_db::get_pending_by_request_id(db, request.id).await?;
    let Some(winner) = pick_winner(&pending).cloned() else {
        let updated = request_db::set_state(db, request.id, RequestState::Expired).await?;
        tracing::info!(
            request_id = updated.id,
            "deadline passed with no offers, request expired without a contract",
        );
        return Ok(SelectionOutcome {
            request: updated,
            contract: None,
        });
    };
    finalize(db, clock, sink, request, winner).await
}

/// Manual mode: the owning purchaser picks a winner for a request that is
/// on hold. Selecting before the deadline (request still pending) or after
/// the decision fell is `InvalidState`; a repeated click on an already
/// decided request returns the existing contract as a success no-op.
pub async fn select_winner(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    caller: &accounts::Model,
    request_id: i32,
    offer_id: i32,
) -> Result<SelectionOutcome, LifecycleError> {
    let request = request_db::get_request_by_id(db, request_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Request", request_id))?;

    if request.owner_id != caller.id {
        return Err(LifecycleError::Unauthorized(
            "Only the requesting purchaser can select a winner".to_string(),
        ));
    }
    match request.state {
        RequestState::OnHold => {}
        RequestState::Pending => {
            return Err(LifecycleError::InvalidState(
                "Offers are still open; a winner can be selected once the request is on hold"
                    .to_string(),
            ));
        }
        RequestState::Expired => {
            // Decided already: report the standing outcome instead of erroring
            // on a double-submitted selection.
            if request.contract_result.is_some() {
                let contract = existing_contract(db, &request).await?;
                return Ok(SelectionOutcome {
                    request,
                    contract: Some(contract),
                });
            }
            return Err(LifecycleError::InvalidState(format!(
                "Request {request_id} expired without offers and cannot be awarded"
            )));
        }
    }

    let offer = offer_db::get_offer_by_id(db, offer_id)
        .await?
        .filter(|o| o.request_id == request.id)
        .ok_or_else(|| {
            LifecycleError::NotFound(format!(
                "Offer {offer_id} does not belong to request {request_id}"
            ))
        })?;

    finalize(db, clock, sink, request, offer).await
}

/// Shared finalize sequence: one transaction creating the contract, setting
/// terminal offer states, and expiring the request.
///
/// At-most-one-contract is enforced by the unique index on
/// `contracts.request_id`. A violation there means a concurrent finalize got
/// in first; this caller rolls back, reads the standing outcome, and reports
/// success. Any other storage failure rolls back completely and surfaces as
/// `Transient`, so the call is safe to retry.
async fn finalize(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    request: requests::Model,
    winner: offers::Model,
) -> Result<SelectionOutcome, LifecycleError> {
    // Cheap idempotency marker, saves the transaction round-trip.
    if request.contract_result.is_some() {
        let contract = existing_contract(db, &request).await?;
        return Ok(SelectionOutcome {
            request,
            contract: Some(contract),
        });
    }

    let txn = db.begin().await?;

    let contract =
        match contract_db::insert_contract(&txn, &request, &winner, clock.now()).await {
            Ok(contract) => contract,
            Err(err) if LifecycleError::is_unique_violation(&err) => {
                txn.rollback().await?;
                return adopt_concurrent_outcome(db, request.id).await;
            }
            Err(err) => {
                txn.rollback().await?;
                return Err(err.into());
            }
        };

    finalize_offers(&txn, request.id, winner.id).await?;
    let request = request_db::mark_decided(&txn, request, contract.id).await?;

    txn.commit().await?;

    tracing::info!(
        request_id = request.id,
        contract_id = contract.id,
        winning_offer_id = winner.id,
        "winner selected",
    );
    sink.publish(LifecycleEvent::new(
        request.id,
        EventType::WinnerSelected,
        clock.now(),
        vec![winner.id, contract.id],
    ));

    Ok(SelectionOutcome {
        request,
        contract: Some(contract),
    })
}

/// A concurrent caller decided this request first; observe and return the
/// state it produced.
async fn adopt_concurrent_outcome(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<SelectionOutcome, LifecycleError> {
    let request = request_db::get_request_by_id(db, request_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Request", request_id))?;
    let contract = existing_contract(db, &request).await?;
    Ok(SelectionOutcome {
        request,
        contract: Some(contract),
    })
}

async fn existing_contract(
    db: &DatabaseConnection,
    request: &requests::Model,
) -> Result<contracts::Model, LifecycleError> {
    contract_db::get_contract_by_request_id(db, request.id)
        .await?
        .ok_or_else(|| {
            LifecycleError::Transient(DbErr::RecordNotFound(format!(
                "Contract for decided request {} missing",
                request.id
            )))
        })
}
