use actix_web::{web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use std::collections::HashSet;

use crate::auth::authorization::verify_request_owner;
use crate::auth::middleware::AuthenticatedAccount;
use crate::db::{offers as offer_db, requests as request_db};
use crate::lifecycle::clock::{Clock, ClockData};
use crate::lifecycle::eligibility::{self, ProviderCapabilities, RequestFilter};
use crate::lifecycle::events::{NotificationSink, SinkData};
use crate::lifecycle::{self, LifecycleError};
use crate::models::accounts::{self, Roles};
use crate::models::requests::{self, CreateRequest};

use super::error_response;

/// POST /api/requests — a purchaser posts a new tender.
pub async fn create_request(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    body: web::Json<CreateRequest>,
) -> impl Responder {
    match lifecycle::requests::create(
        db.get_ref(),
        clock.get_ref().as_ref(),
        &account.0,
        body.into_inner(),
    )
    .await
    {
        Ok(request) => HttpResponse::Created().json(request),
        Err(e) => error_response(e),
    }
}

/// GET /api/requests — list requests for the caller's role.
///
/// Providers get the eligibility-filtered open list (optionally narrowed by
/// `?category=`/`?subcategory=`/`?assignment_type=`); purchasers their own
/// requests; admins everything. Every path runs lazy deadline evaluation, so
/// a request past its deadline transitions before it is reported.
pub async fn get_requests(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    query: web::Query<RequestFilter>,
) -> impl Responder {
    let db = db.get_ref();
    let clock = clock.get_ref().as_ref();
    let sink = sink.get_ref().as_ref();

    let result = match account.0.role {
        Roles::Provider => list_for_provider(db, clock, sink, &account.0, &query).await,
        Roles::Purchaser => match request_db::get_requests_by_owner(db, account.0.id).await {
            Ok(list) => evaluate_all(db, clock, sink, list).await,
            Err(e) => Err(e.into()),
        },
        Roles::Admin => match request_db::get_all_requests(db).await {
            Ok(list) => evaluate_all(db, clock, sink, list).await,
            Err(e) => Err(e.into()),
        },
    };

    match result {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

/// GET /api/requests/{id} — fetch a single request.
///
/// Visible to the owner and admins; a provider sees it only while it is
/// eligible for them, or once they have an offer on it.
pub async fn get_request(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    let db = db.get_ref();
    let clock = clock.get_ref().as_ref();
    let sink = sink.get_ref().as_ref();

    let request = match request_db::get_request_by_id(db, id).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            return error_response(LifecycleError::not_found("Request", id));
        }
        Err(e) => return error_response(e.into()),
    };

    let request = match lifecycle::requests::evaluate_deadline(db, clock, sink, request).await {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };

    match may_view(db, clock, &account.0, &request).await {
        Ok(true) => HttpResponse::Ok().json(request),
        // Invisible requests read as absent, not as forbidden.
        Ok(false) => error_response(LifecycleError::not_found("Request", id)),
        Err(e) => error_response(e),
    }
}

/// POST /api/requests/{id}/select — manual winner selection.
///
/// Only valid while the request is on hold; the purchaser picks one of its
/// offers and the engine finalizes contract and offer states atomically.
pub async fn select_winner(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    path: web::Path<i32>,
    body: web::Json<SelectWinnerRequest>,
) -> impl Responder {
    match lifecycle::selection::select_winner(
        db.get_ref(),
        clock.get_ref().as_ref(),
        sink.get_ref().as_ref(),
        &account.0,
        path.into_inner(),
        body.offer_id,
    )
    .await
    {
        Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({
            "request": outcome.request,
            "contract": outcome.contract,
        })),
        Err(e) => error_response(e),
    }
}

/// GET /api/requests/{id}/offers — all offers on a request, owner only.
pub async fn get_offers_for_request(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    clock: web::Data<ClockData>,
    sink: web::Data<SinkData>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    let db = db.get_ref();

    let request = match verify_request_owner(db, id, &account.0).await {
        Ok(request) => request,
        Err(e) => return error_response(e),
    };

    // Reading the offer list is a read of the request: evaluate its deadline
    // first so the statuses reflect any automatic decision that is due.
    if let Err(e) = lifecycle::requests::evaluate_deadline(
        db,
        clock.get_ref().as_ref(),
        sink.get_ref().as_ref(),
        request,
    )
    .await
    {
        return error_response(e);
    }

    match offer_db::get_offers_by_request_id(db, id).await {
        Ok(offers) => HttpResponse::Ok().json(offers),
        Err(e) => error_response(e.into()),
    }
}

async fn list_for_provider(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    account: &accounts::Model,
    filter: &RequestFilter,
) -> Result<Vec<requests::Model>, LifecycleError> {
    let caps = ProviderCapabilities::from_account(account);
    let offered = offer_db::get_offered_request_ids(db, account.id).await?;
    let candidates = request_db::find_pending_with_owners(db).await?;
    let now = clock.now();

    let mut visible = Vec::new();
    for (request, owner) in candidates {
        let request = lifecycle::requests::evaluate_deadline(db, clock, sink, request).await?;
        let blocklist = owner.as_ref().map(|o| o.blocklist()).unwrap_or_default();
        if eligibility::visible(&request, &caps, &blocklist, &offered, now, filter) {
            visible.push(request);
        }
    }
    Ok(visible)
}

async fn evaluate_all(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    sink: &dyn NotificationSink,
    list: Vec<requests::Model>,
) -> Result<Vec<requests::Model>, LifecycleError> {
    let mut evaluated = Vec::with_capacity(list.len());
    for request in list {
        evaluated.push(lifecycle::requests::evaluate_deadline(db, clock, sink, request).await?);
    }
    Ok(evaluated)
}

async fn may_view(
    db: &DatabaseConnection,
    clock: &dyn Clock,
    account: &accounts::Model,
    request: &requests::Model,
) -> Result<bool, LifecycleError> {
    if request.owner_id == account.id || account.role == Roles::Admin {
        return Ok(true);
    }
    if account.role != Roles::Provider {
        return Ok(false);
    }
    // A provider with an offer on the request stays a participant after the
    // deadline; otherwise the eligibility filter decides.
    if offer_db::offer_exists(db, request.id, account.id).await? {
        return Ok(true);
    }
    let owner = crate::db::accounts::get_account_by_id(db, request.owner_id).await?;
    let blocklist = owner.as_ref().map(|o| o.blocklist()).unwrap_or_default();
    Ok(eligibility::visible(
        request,
        &ProviderCapabilities::from_account(account),
        &blocklist,
        &HashSet::new(),
        clock.now(),
        &RequestFilter::default(),
    ))
}

// ── Request DTOs ──

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SelectWinnerRequest {
    pub offer_id: i32,
}
