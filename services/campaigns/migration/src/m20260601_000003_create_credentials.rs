use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Credentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Credentials::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Credentials::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Credentials::Platform).string().not_null())
                    .col(ColumnDef::new(Credentials::AccountId).string().not_null())
                    .col(ColumnDef::new(Credentials::AccountName).string().not_null())
                    .col(ColumnDef::new(Credentials::AccessToken).string().not_null())
                    .col(ColumnDef::new(Credentials::RefreshToken).string())
                    .col(ColumnDef::new(Credentials::ExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Credentials::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Credentials::Metadata).json_binary())
                    .col(
                        ColumnDef::new(Credentials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Credentials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (client, platform) — reconnects overwrite in place.
        manager
            .create_index(
                Index::create()
                    .table(Credentials::Table)
                    .col(Credentials::ClientId)
                    .col(Credentials::Platform)
                    .unique()
                    .name("uniq_credentials_client_platform")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Credentials::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Credentials {
    Table,
    Id,
    ClientId,
    Platform,
    AccountId,
    AccountName,
    AccessToken,
    RefreshToken,
    ExpiresAt,
    IsActive,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
