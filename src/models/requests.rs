use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a request. `Pending` is initial; `OnHold` is only
/// reachable under the manual selection policy once the deadline passes;
/// `Expired` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RequestState {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "on_hold")]
    OnHold,
    #[sea_orm(string_value = "expired")]
    Expired,
}

/// How a winner is chosen when the offer deadline passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum SelectionPolicy {
    /// Lowest-priced offer wins at the deadline, no purchaser action needed.
    #[sea_orm(string_value = "automatic")]
    Automatic,
    /// The request parks on hold at the deadline until the purchaser picks.
    #[sea_orm(string_value = "manual")]
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Categories {
    #[sea_orm(string_value = "corporate")]
    Corporate,
    #[sea_orm(string_value = "litigation")]
    Litigation,
    #[sea_orm(string_value = "real_estate")]
    RealEstate,
    #[sea_orm(string_value = "tax")]
    Tax,
    #[sea_orm(string_value = "intellectual_property")]
    IntellectualProperty,
    #[sea_orm(string_value = "employment")]
    Employment,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AssignmentType {
    #[sea_orm(string_value = "one_time")]
    OneTime,
    #[sea_orm(string_value = "ongoing")]
    Ongoing,
    #[sea_orm(string_value = "consultation")]
    Consultation,
}

/// SeaORM entity for the `requests` table.
///
/// The eligibility criteria (`category`, `subcategory`, `assignment_type`,
/// `min_provider_size`, `min_provider_rating`) are a snapshot taken at
/// creation and never mutated afterwards. The threshold columns hold the raw
/// strings as entered; the eligibility filter parses them into numeric floors.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub state: RequestState,
    pub offers_deadline: DateTimeUtc,
    pub selection_policy: SelectionPolicy,
    pub category: Categories,
    pub subcategory: Option<String>,
    pub assignment_type: AssignmentType,
    pub min_provider_size: String,
    pub min_provider_rating: String,
    /// Free-form per-request metadata, validated to be a flat string map.
    pub details: Option<Json>,
    /// Id of the winning contract once this request is decided.
    pub contract_result: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::OwnerId",
        to = "super::accounts::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::offers::Entity")]
    Offers,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::offers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offers.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Accept a `details` payload only if it is a flat JSON object whose values
/// are all strings. Anything else is rejected at creation time so the column
/// stays queryable as a plain key-value map.
pub fn validate_details(value: &Json) -> Result<(), String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "details must be a JSON object".to_string())?;
    for (key, val) in obj {
        if !val.is_string() {
            return Err(format!("details entry '{key}' must be a string value"));
        }
    }
    Ok(())
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub offers_deadline: DateTimeUtc,
    /// Falls back to the purchaser account's default policy when omitted.
    pub selection_policy: Option<SelectionPolicy>,
    pub category: Option<Categories>,
    pub subcategory: Option<String>,
    pub assignment_type: Option<AssignmentType>,
    pub min_provider_size: Option<String>,
    pub min_provider_rating: Option<String>,
    pub details: Option<Json>,
}
