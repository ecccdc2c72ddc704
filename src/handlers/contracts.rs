use actix_web::{web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;

use crate::auth::authorization::verify_contract_party;
use crate::auth::middleware::AuthenticatedAccount;
use crate::db::contracts as contract_db;

use super::error_response;

/// GET /api/contracts — contracts the authenticated account is party to,
/// as client or as provider. Contracts are only ever written by the winner
/// selection engine; this surface is read-only.
pub async fn get_contracts(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match contract_db::get_contracts_for_account(db.get_ref(), account.0.id).await {
        Ok(contracts) => HttpResponse::Ok().json(contracts),
        Err(e) => error_response(e.into()),
    }
}

/// GET /api/contracts/{id} — a single contract, parties and admins only.
pub async fn get_contract(
    account: AuthenticatedAccount,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> impl Responder {
    match verify_contract_party(
        db.get_ref(),
        path.into_inner(),
        account.0.id,
        &account.0.role,
    )
    .await
    {
        Ok(contract) => HttpResponse::Ok().json(contract),
        Err(e) => error_response(e),
    }
}
