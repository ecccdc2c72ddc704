use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::requests::SelectionPolicy;

/// The `Roles` enum maps to a Postgres TEXT column stored as lowercase strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Roles {
    #[sea_orm(string_value = "purchaser")]
    Purchaser,
    #[sea_orm(string_value = "provider")]
    Provider,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// SeaORM entity for the `accounts` table.
///
/// An account is the local projection of the identity provider's user plus
/// the capability attributes the eligibility filter reads: company name and
/// size, the admin-maintained aggregate rating, and (for purchasers) the
/// blocked-company list.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: Option<String>,
    pub auth_provider: String,
    pub role: Roles,
    pub company_name: Option<String>,
    pub company_size: Option<i32>,
    /// Aggregate rating maintained by admins; `None` until one is on file.
    #[sea_orm(column_type = "Double", nullable)]
    pub rating: Option<f64>,
    /// JSON array of company names this purchaser never wants to see bids from.
    pub blocked_company_names: Option<Json>,
    /// Default winner-selection policy copied onto new requests.
    pub selection_policy: SelectionPolicy,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::requests::Entity")]
    Requests,
    #[sea_orm(has_many = "super::offers::Entity")]
    Offers,
}

impl Related<super::requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl Related<super::offers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Blocked-company names as plain strings; non-string entries are ignored.
    pub fn blocklist(&self) -> Vec<String> {
        self.blocked_company_names
            .as_ref()
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ── DTOs ──

/// Used internally by the auth middleware to create an account from JWT claims.
#[derive(Debug, Clone)]
pub struct CreateAccountFromAuth {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub auth_provider: String,
    pub role: Roles,
}

/// Used by the `POST /api/auth/complete-profile` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteProfile {
    pub role: Option<Roles>,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    pub company_size: Option<i32>,
    pub selection_policy: Option<SelectionPolicy>,
}

/// Used for account updates. Rating and the blocklist are admin-only fields;
/// the handler enforces that before this reaches the database.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccount {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<Roles>,
    pub company_name: Option<String>,
    pub company_size: Option<i32>,
    pub rating: Option<f64>,
    pub blocked_company_names: Option<Json>,
    pub selection_policy: Option<SelectionPolicy>,
}

/// A safe account representation for API responses (also the shape cached
/// in Redis, hence the round-trip derives).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Roles,
    pub company_name: Option<String>,
    pub company_size: Option<i32>,
    pub rating: Option<f64>,
    pub selection_policy: SelectionPolicy,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for AccountResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            display_name: m.display_name,
            role: m.role,
            company_name: m.company_name,
            company_size: m.company_size,
            rating: m.rating,
            selection_policy: m.selection_policy,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
