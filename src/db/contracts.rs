use sea_orm::*;
use uuid::Uuid;

use crate::models::{contracts, offers, requests};

/// Insert the contract for a decided request, copying the price from the
/// winning offer. Runs on the winner selection transaction; a unique
/// violation on `request_id` here means a concurrent selection won.
pub async fn insert_contract<C: ConnectionTrait>(
    conn: &C,
    request: &requests::Model,
    winner: &offers::Model,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<contracts::Model, DbErr> {
    let new_contract = contracts::ActiveModel {
        request_id: Set(request.id),
        client_id: Set(request.owner_id),
        provider_id: Set(winner.provider_id),
        price: Set(winner.price),
        contract_date: Set(now),
        ..Default::default()
    };

    new_contract.insert(conn).await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Fetch the contract for a request, if the request is decided.
pub async fn get_contract_by_request_id(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::RequestId.eq(request_id))
        .one(db)
        .await
}

/// Fetch all contracts an account is party to, as client or provider.
pub async fn get_contracts_for_account(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(
            Condition::any()
                .add(contracts::Column::ClientId.eq(account_id))
                .add(contracts::Column::ProviderId.eq(account_id)),
        )
        .order_by_desc(contracts::Column::ContractDate)
        .all(db)
        .await
}
