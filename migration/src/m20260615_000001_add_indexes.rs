use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Requests {
    Table,
    OwnerId,
    State,
    OffersDeadline,
}

#[derive(DeriveIden)]
enum Offers {
    Table,
    ProviderId,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    RequestId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on requests.owner_id for the purchaser's own listing
        manager
            .create_index(
                Index::create()
                    .name("idx_requests_owner_id")
                    .table(Requests::Table)
                    .col(Requests::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Index on (state, offers_deadline) for finding due pending requests
        manager
            .create_index(
                Index::create()
                    .name("idx_requests_state_deadline")
                    .table(Requests::Table)
                    .col(Requests::State)
                    .col(Requests::OffersDeadline)
                    .to_owned(),
            )
            .await?;

        // Index on offers.provider_id for a provider's own offers
        manager
            .create_index(
                Index::create()
                    .name("idx_offers_provider_id")
                    .table(Offers::Table)
                    .col(Offers::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Index on questions.request_id for a request's Q&A thread
        manager
            .create_index(
                Index::create()
                    .name("idx_questions_request_id")
                    .table(Questions::Table)
                    .col(Questions::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_requests_owner_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_requests_state_deadline").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_offers_provider_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_questions_request_id").to_owned())
            .await?;

        Ok(())
    }
}
