use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::offers::{self, OfferStatus, SubmitOffer};

/// Insert a new offer (always starts out pending).
pub async fn insert_offer(
    db: &DatabaseConnection,
    input: &SubmitOffer,
    provider_id: Uuid,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<offers::Model, DbErr> {
    let new_offer = offers::ActiveModel {
        request_id: Set(input.request_id),
        provider_id: Set(provider_id),
        price: Set(input.price),
        note: Set(input.note.clone()),
        status: Set(OfferStatus::Pending),
        created_at: Set(now),
        ..Default::default()
    };

    new_offer.insert(db).await
}

/// Whether a provider already has an offer on a request.
pub async fn offer_exists(
    db: &DatabaseConnection,
    request_id: i32,
    provider_id: Uuid,
) -> Result<bool, DbErr> {
    let count = offers::Entity::find()
        .filter(offers::Column::RequestId.eq(request_id))
        .filter(offers::Column::ProviderId.eq(provider_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Fetch a single offer by ID.
pub async fn get_offer_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<offers::Model>, DbErr> {
    offers::Entity::find_by_id(id).one(db).await
}

/// Fetch all offers on a request.
pub async fn get_offers_by_request_id(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<Vec<offers::Model>, DbErr> {
    offers::Entity::find()
        .filter(offers::Column::RequestId.eq(request_id))
        .order_by_asc(offers::Column::Id)
        .all(db)
        .await
}

/// Fetch the still-pending offers on a request, in submission order.
pub async fn get_pending_by_request_id(
    db: &DatabaseConnection,
    request_id: i32,
) -> Result<Vec<offers::Model>, DbErr> {
    offers::Entity::find()
        .filter(offers::Column::RequestId.eq(request_id))
        .filter(offers::Column::Status.eq(OfferStatus::Pending))
        .order_by_asc(offers::Column::Id)
        .all(db)
        .await
}

/// Fetch all offers a provider has submitted.
pub async fn get_offers_by_provider_id(
    db: &DatabaseConnection,
    provider_id: Uuid,
) -> Result<Vec<offers::Model>, DbErr> {
    offers::Entity::find()
        .filter(offers::Column::ProviderId.eq(provider_id))
        .order_by_desc(offers::Column::CreatedAt)
        .all(db)
        .await
}

/// Ids of every request this provider has already bid on, for the
/// eligibility filter's already-offered check.
pub async fn get_offered_request_ids(
    db: &DatabaseConnection,
    provider_id: Uuid,
) -> Result<HashSet<i32>, DbErr> {
    let ids: Vec<i32> = offers::Entity::find()
        .filter(offers::Column::ProviderId.eq(provider_id))
        .select_only()
        .column(offers::Column::RequestId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids.into_iter().collect())
}

/// Terminal-state flip for a decided request: the winner goes to `Won`,
/// every sibling to `Lost`. Runs on the winner selection transaction.
pub async fn finalize_statuses<C: ConnectionTrait>(
    conn: &C,
    request_id: i32,
    winner_id: i32,
) -> Result<(), DbErr> {
    offers::Entity::update_many()
        .col_expr(offers::Column::Status, Expr::value(OfferStatus::Won))
        .filter(offers::Column::RequestId.eq(request_id))
        .filter(offers::Column::Id.eq(winner_id))
        .exec(conn)
        .await?;

    offers::Entity::update_many()
        .col_expr(offers::Column::Status, Expr::value(OfferStatus::Lost))
        .filter(offers::Column::RequestId.eq(request_id))
        .filter(offers::Column::Id.ne(winner_id))
        .exec(conn)
        .await?;

    Ok(())
}
