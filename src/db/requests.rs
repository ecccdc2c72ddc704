use sea_orm::*;
use uuid::Uuid;

use crate::models::accounts;
use crate::models::requests::{self, AssignmentType, Categories, CreateRequest, RequestState};

/// Insert a new request. Criteria and policy are snapshotted from the input
/// (falling back to the owner's defaults) and immutable from here on.
pub async fn insert_request(
    db: &DatabaseConnection,
    input: CreateRequest,
    owner: &accounts::Model,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<requests::Model, DbErr> {
    let new_request = requests::ActiveModel {
        owner_id: Set(owner.id),
        title: Set(input.title),
        description: Set(input.description),
        state: Set(RequestState::Pending),
        offers_deadline: Set(input.offers_deadline),
        selection_policy: Set(input
            .selection_policy
            .unwrap_or_else(|| owner.selection_policy.clone())),
        category: Set(input.category.unwrap_or(Categories::Other)),
        subcategory: Set(input.subcategory),
        assignment_type: Set(input.assignment_type.unwrap_or(AssignmentType::OneTime)),
        min_provider_size: Set(input.min_provider_size.unwrap_or_else(|| "0".to_string())),
        min_provider_rating: Set(input.min_provider_rating.unwrap_or_else(|| "0".to_string())),
        details: Set(input.details),
        contract_result: Set(None),
        created_at: Set(now),
        ..Default::default()
    };

    new_request.insert(db).await
}

/// Fetch a single request by ID.
pub async fn get_request_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<requests::Model>, DbErr> {
    requests::Entity::find_by_id(id).one(db).await
}

/// Fetch all requests owned by a purchaser.
pub async fn get_requests_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<requests::Model>, DbErr> {
    requests::Entity::find()
        .filter(requests::Column::OwnerId.eq(owner_id))
        .order_by_desc(requests::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all requests (admin listing).
pub async fn get_all_requests(db: &DatabaseConnection) -> Result<Vec<requests::Model>, DbErr> {
    requests::Entity::find()
        .order_by_desc(requests::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch every pending request together with its owning account, the
/// candidate set for a provider's eligibility-filtered listing. The owner is
/// needed for its blocklist.
pub async fn find_pending_with_owners(
    db: &DatabaseConnection,
) -> Result<Vec<(requests::Model, Option<accounts::Model>)>, DbErr> {
    requests::Entity::find()
        .filter(requests::Column::State.eq(RequestState::Pending))
        .order_by_desc(requests::Column::CreatedAt)
        .find_also_related(accounts::Entity)
        .all(db)
        .await
}

/// Transition a request's state. Used for the hold and the no-offer expiry
/// transitions; the decided transition goes through `mark_decided`.
pub async fn set_state(
    db: &DatabaseConnection,
    id: i32,
    state: RequestState,
) -> Result<requests::Model, DbErr> {
    let request = requests::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Request not found".to_string()))?;

    let mut active: requests::ActiveModel = request.into();
    active.state = Set(state);

    active.update(db).await
}

/// Expire a request and stamp its contract marker, inside the winner
/// selection transaction.
pub async fn mark_decided<C: ConnectionTrait>(
    conn: &C,
    request: requests::Model,
    contract_id: i32,
) -> Result<requests::Model, DbErr> {
    let mut active: requests::ActiveModel = request.into();
    active.state = Set(RequestState::Expired);
    active.contract_result = Set(Some(contract_id));

    active.update(conn).await
}
