use actix_web::{web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedAccount;
use crate::cache::{keys, CacheConfig, CacheData};
use crate::db::accounts as account_db;
use crate::models::accounts::{AccountResponse, Roles, UpdateAccount};
use crate::models::PaginationQuery;

/// GET /api/accounts — list accounts with pagination (admin only).
/// Query params: ?page=1&limit=20
pub async fn get_accounts(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    if account.0.role != Roles::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only admins can list accounts",
        }));
    }

    match account_db::get_accounts_paginated(db.get_ref(), query.page(), query.limit()).await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch accounts: {e}"),
        })),
    }
}

/// GET /api/accounts/{id} — get a single account (requires authentication).
pub async fn get_account(
    _account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    cache_config: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::account(&id.to_string());

    if let Ok(Some(cached)) = cache.get::<AccountResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match account_db::get_account_by_id(db.get_ref(), id).await {
        Ok(Some(account)) => {
            let response = AccountResponse::from(account);
            let ttl = cache_config.account_ttl.as_secs();
            let _ = cache.set(&cache_key, &response, Some(ttl)).await;
            HttpResponse::Ok().json(response)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Account {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/accounts/{id} — update an account.
///
/// Accounts can update themselves; only admins may touch another account,
/// and the trust attributes (rating, blocklist, role) are admin-only even
/// on your own account.
pub async fn update_account(
    auth_account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAccount>,
) -> impl Responder {
    let id = path.into_inner();
    let is_admin = auth_account.0.role == Roles::Admin;

    if auth_account.0.id != id && !is_admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only update your own account",
        }));
    }

    let mut input = body.into_inner();
    if !is_admin {
        input.rating = None;
        input.blocked_company_names = None;
        input.role = None;
    }

    match account_db::update_account(db.get_ref(), id, input).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::account(&id.to_string())).await;
            HttpResponse::Ok().json(AccountResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update account: {e}"),
        })),
    }
}

/// DELETE /api/accounts/{id} — delete an account (self or admin).
pub async fn delete_account(
    auth_account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if auth_account.0.id != id && auth_account.0.role != Roles::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own account",
        }));
    }

    match account_db::delete_account(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::account(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Account {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Account {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete account: {e}"),
        })),
    }
}
