use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    RequestId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // At most one contract per request. The winner selection engine leans
        // on this index to resolve concurrent finalize attempts.
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_request_unique")
                    .table(Contracts::Table)
                    .col(Contracts::RequestId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_contracts_request_unique")
                    .table(Contracts::Table)
                    .to_owned(),
            )
            .await
    }
}
