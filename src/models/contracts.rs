use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `contracts` table.
///
/// `request_id` carries a unique index; that constraint, not application
/// locking, is what makes "at most one contract per request" hold under
/// concurrent selection. The price is copied verbatim from the winning offer
/// at selection time and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub request_id: i32,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub contract_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requests::Entity",
        from = "Column::RequestId",
        to = "super::requests::Column::Id"
    )]
    Request,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ClientId",
        to = "super::accounts::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ProviderId",
        to = "super::accounts::Column::Id"
    )]
    Provider,
}

impl Related<super::requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
