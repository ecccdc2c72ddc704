use actix_web::{web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedAccount;
use crate::db::{offers as offer_db, requests as request_db};
use crate::lifecycle::clock::ClockData;
use crate::lifecycle::events::SinkData;
use crate::lifecycle::{self, LifecycleError};
use crate::models::accounts::Roles;
use crate::models::offers::SubmitOffer;

use super::error_response;

/// POST /api/offers — a provider submits an offer on an open request.
///
/// Rejected with `Conflict` on a duplicate bid or a passed deadline, and
/// with a 400 once the request has left the pending state.
pub async fn submit_offer(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    body: web::Json<SubmitOffer>,
) -> impl Responder {
    match lifecycle::offers::submit(
        db.get_ref(),
        clock.get_ref().as_ref(),
        sink.get_ref().as_ref(),
        &account.0,
        body.into_inner(),
    )
    .await
    {
        Ok(offer) => HttpResponse::Created().json(offer),
        Err(e) => error_response(e),
    }
}

/// GET /api/offers/mine — all offers the authenticated provider submitted.
pub async fn get_my_offers(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match offer_db::get_offers_by_provider_id(db.get_ref(), account.0.id).await {
        Ok(offers) => HttpResponse::Ok().json(offers),
        Err(e) => error_response(e.into()),
    }
}

/// GET /api/offers/{id} — a single offer.
///
/// Visible to the provider who made it, the owner of the request it targets,
/// and admins.
pub async fn get_offer(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    let db = db.get_ref();

    let offer = match offer_db::get_offer_by_id(db, id).await {
        Ok(Some(offer)) => offer,
        Ok(None) => return error_response(LifecycleError::not_found("Offer", id)),
        Err(e) => return error_response(e.into()),
    };

    if offer.provider_id == account.0.id || account.0.role == Roles::Admin {
        return HttpResponse::Ok().json(offer);
    }

    match request_db::get_request_by_id(db, offer.request_id).await {
        Ok(Some(request)) if request.owner_id == account.0.id => HttpResponse::Ok().json(offer),
        Ok(_) => error_response(LifecycleError::Unauthorized(
            "You can only view offers you made or received".to_string(),
        )),
        Err(e) => error_response(e.into()),
    }
}
