use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Posts::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Posts::Platform).string().not_null())
                    .col(ColumnDef::new(Posts::Content).json_binary().not_null())
                    .col(ColumnDef::new(Posts::ScheduleType).string().not_null())
                    .col(ColumnDef::new(Posts::ScheduledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Posts::Status).string().not_null())
                    .col(ColumnDef::new(Posts::ExternalId).string())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Posts::Table)
                    .col(Posts::ClientId)
                    .name("idx_posts_client_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    ClientId,
    CreatedBy,
    Platform,
    Content,
    ScheduleType,
    ScheduledAt,
    Status,
    ExternalId,
    CreatedAt,
    UpdatedAt,
}
