use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `requests` table and its columns.
#[derive(DeriveIden)]
enum Requests {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    State,
    OffersDeadline,
    SelectionPolicy,
    Category,
    Subcategory,
    AssignmentType,
    MinProviderSize,
    MinProviderRating,
    Details,
    ContractResult,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requests::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Requests::Title).string().not_null())
                    .col(ColumnDef::new(Requests::Description).text().not_null())
                    .col(ColumnDef::new(Requests::State).string().not_null())
                    .col(
                        ColumnDef::new(Requests::OffersDeadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requests::SelectionPolicy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requests::Category).string().not_null())
                    .col(ColumnDef::new(Requests::Subcategory).string())
                    .col(ColumnDef::new(Requests::AssignmentType).string().not_null())
                    .col(
                        ColumnDef::new(Requests::MinProviderSize)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requests::MinProviderRating)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requests::Details).json_binary())
                    .col(ColumnDef::new(Requests::ContractResult).integer())
                    .col(
                        ColumnDef::new(Requests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_owner_id")
                            .from(Requests::Table, Requests::OwnerId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await
    }
}
