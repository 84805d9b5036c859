use sea_orm_migration::prelude::*;

use relaya_campaigns_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
