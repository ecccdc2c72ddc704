use sea_orm::*;
use uuid::Uuid;

use crate::models::accounts::{self, CompleteProfile, CreateAccountFromAuth, UpdateAccount};

/// Create a new account from identity-provider JWT claims (called by the
/// auth middleware on first sight of a subject).
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateAccountFromAuth,
) -> Result<accounts::Model, DbErr> {
    if let Some(existing) = accounts::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let new_account = accounts::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        display_name: Set(input.display_name),
        auth_provider: Set(input.auth_provider),
        role: Set(input.role),
        company_name: Set(None),
        company_size: Set(None),
        rating: Set(None),
        blocked_company_names: Set(None),
        selection_policy: Set(crate::models::requests::SelectionPolicy::Automatic),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_account.insert(db).await
}

/// Fetch a page of accounts.
pub async fn get_accounts_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<accounts::Model>, DbErr> {
    accounts::Entity::find()
        .order_by_asc(accounts::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch a single account by ID.
pub async fn get_account_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<accounts::Model>, DbErr> {
    accounts::Entity::find_by_id(id).one(db).await
}

/// Complete an account's profile after first login (role, company data,
/// default selection policy).
pub async fn complete_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: CompleteProfile,
) -> Result<accounts::Model, DbErr> {
    let account = accounts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Account not found".to_string()))?;

    let mut active: accounts::ActiveModel = account.into();

    if let Some(role) = input.role {
        active.role = Set(role);
    }
    if let Some(display_name) = input.display_name {
        active.display_name = Set(Some(display_name));
    }
    if let Some(company_name) = input.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(company_size) = input.company_size {
        active.company_size = Set(Some(company_size));
    }
    if let Some(selection_policy) = input.selection_policy {
        active.selection_policy = Set(selection_policy);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Update an existing account. The handler decides which fields the caller
/// may touch; this applies whatever survived that check.
pub async fn update_account(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateAccount,
) -> Result<accounts::Model, DbErr> {
    let account = accounts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Account not found".to_string()))?;

    let mut active: accounts::ActiveModel = account.into();

    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(display_name) = input.display_name {
        active.display_name = Set(Some(display_name));
    }
    if let Some(role) = input.role {
        active.role = Set(role);
    }
    if let Some(company_name) = input.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(company_size) = input.company_size {
        active.company_size = Set(Some(company_size));
    }
    if let Some(rating) = input.rating {
        active.rating = Set(Some(rating));
    }
    if let Some(blocked) = input.blocked_company_names {
        active.blocked_company_names = Set(Some(blocked));
    }
    if let Some(selection_policy) = input.selection_policy {
        active.selection_policy = Set(selection_policy);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete an account by ID.
pub async fn delete_account(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    accounts::Entity::delete_by_id(id).exec(db).await
}
