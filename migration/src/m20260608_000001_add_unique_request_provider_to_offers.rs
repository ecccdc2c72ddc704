use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Offers {
    Table,
    RequestId,
    ProviderId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One offer per provider per request.
        manager
            .create_index(
                Index::create()
                    .name("idx_offers_request_provider_unique")
                    .table(Offers::Table)
                    .col(Offers::RequestId)
                    .col(Offers::ProviderId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_offers_request_provider_unique")
                    .table(Offers::Table)
                    .to_owned(),
            )
            .await
    }
}
