use actix_web::{web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedAccount;
use crate::cache::{keys, CacheData};
use crate::db::accounts;
use crate::models::accounts::{AccountResponse, CompleteProfile};

/// GET /api/auth/me — return the currently authenticated account's profile.
pub async fn me(account: AuthenticatedAccount) -> impl Responder {
    HttpResponse::Ok().json(AccountResponse::from(account.0))
}

/// POST /api/auth/complete-profile — set role, company data and the default
/// selection policy after first login.
pub async fn complete_profile(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CompleteProfile>,
) -> impl Responder {
    match accounts::complete_profile(db.get_ref(), account.0.id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::account(&updated.id.to_string())).await;
            HttpResponse::Ok().json(AccountResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update profile: {e}"),
        })),
    }
}
