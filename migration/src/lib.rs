pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_accounts_table;
mod m20260601_000002_create_requests_table;
mod m20260601_000003_create_offers_table;
mod m20260601_000004_create_contracts_table;
mod m20260601_000005_create_questions_table;
mod m20260608_000001_add_unique_request_provider_to_offers;
mod m20260608_000002_add_unique_request_to_contracts;
mod m20260615_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_accounts_table::Migration),
            Box::new(m20260601_000002_create_requests_table::Migration),
            Box::new(m20260601_000003_create_offers_table::Migration),
            Box::new(m20260601_000004_create_contracts_table::Migration),
            Box::new(m20260601_000005_create_questions_table::Migration),
            Box::new(m20260608_000001_add_unique_request_provider_to_offers::Migration),
            Box::new(m20260608_000002_add_unique_request_to_contracts::Migration),
            Box::new(m20260615_000001_add_indexes::Migration),
        ]
    }
}
