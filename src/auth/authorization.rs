use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::{contracts as contract_db, requests as request_db};
use crate::lifecycle::LifecycleError;
use crate::models::accounts::{self, Roles};
use crate::models::{contracts, requests};

/// Load a request and check the caller owns it (admins pass too).
pub async fn verify_request_owner(
    db: &DatabaseConnection,
    request_id: i32,
    caller: &accounts::Model,
) -> Result<requests::Model, LifecycleError> {
    let request = request_db::get_request_by_id(db, request_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Request", request_id))?;

    if request.owner_id != caller.id && caller.role != Roles::Admin {
        return Err(LifecycleError::Unauthorized(
            "You do not own this request".to_string(),
        ));
    }

    Ok(request)
}

/// Load a contract and check the caller is a party to it: the client, the
/// provider, or an admin.
pub async fn verify_contract_party(
    db: &DatabaseConnection,
    contract_id: i32,
    caller_id: Uuid,
    caller_role: &Roles,
) -> Result<contracts::Model, LifecycleError> {
    let contract = contract_db::get_contract_by_id(db, contract_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("Contract", contract_id))?;

    let is_party = contract.client_id == caller_id || contract.provider_id == caller_id;
    if !is_party && *caller_role != Roles::Admin {
        return Err(LifecycleError::Unauthorized(
            "You are not a party to this contract".to_string(),
        ));
    }

    Ok(contract)
}
