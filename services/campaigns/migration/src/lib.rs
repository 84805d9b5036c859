use sea_orm_migration::prelude::*;

mod m20260601_000001_create_campaigns;
mod m20260601_000002_create_posts;
mod m20260601_000003_create_credentials;
mod m20260601_000004_create_job_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_campaigns::Migration),
            Box::new(m20260601_000002_create_posts::Migration),
            Box::new(m20260601_000003_create_credentials::Migration),
            Box::new(m20260601_000004_create_job_logs::Migration),
        ]
    }
}
