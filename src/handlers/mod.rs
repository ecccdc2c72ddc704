pub mod accounts;
pub mod auth;
pub mod contracts;
pub mod offers;
pub mod questions;
pub mod requests;

use actix_web::{web, HttpResponse};

use crate::lifecycle::LifecycleError;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedAccount extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/complete-profile", web::post().to(auth::complete_profile)),
    );

    // ── Account routes (all protected — require valid JWT) ──
    cfg.service(web::resource("/accounts").route(web::get().to(accounts::get_accounts)));
    cfg.service(
        web::resource("/accounts/{id}")
            .route(web::get().to(accounts::get_account))
            .route(web::put().to(accounts::update_account))
            .route(web::delete().to(accounts::delete_account)),
    );

    // ── Request routes ──
    cfg.service(
        web::scope("/requests")
            .route("", web::get().to(requests::get_requests))
            .route("", web::post().to(requests::create_request))
            .route("/{id}", web::get().to(requests::get_request))
            .route("/{id}/select", web::post().to(requests::select_winner))
            .route("/{id}/offers", web::get().to(requests::get_offers_for_request))
            .route("/{id}/questions", web::get().to(questions::get_questions))
            .route("/{id}/questions", web::post().to(questions::ask_question)),
    );

    // ── Offer routes ──
    cfg.service(
        web::scope("/offers")
            .route("", web::post().to(offers::submit_offer))
            .route("/mine", web::get().to(offers::get_my_offers))
            .route("/{id}", web::get().to(offers::get_offer)),
    );

    // ── Contract routes ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("/{id}", web::get().to(contracts::get_contract)),
    );

    // ── Question routes ──
    cfg.service(
        web::resource("/questions/{id}/answer").route(web::post().to(questions::answer_question)),
    );
}

/// Map a lifecycle error kind to its HTTP response. Every handler funnels
/// core errors through here so the wire shape stays uniform.
pub(crate) fn error_response(err: LifecycleError) -> HttpResponse {
    match &err {
        LifecycleError::Unauthorized(_) => HttpResponse::Forbidden().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::InvalidState(_) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::Conflict(_) => HttpResponse::Conflict().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::Transient(e) => {
            tracing::error!("storage error: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Database error, safe to retry",
            }))
        }
    }
}
