use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Campaigns::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Campaigns::Channel).string().not_null())
                    .col(ColumnDef::new(Campaigns::Content).json_binary().not_null())
                    .col(ColumnDef::new(Campaigns::Targets).json_binary().not_null())
                    .col(ColumnDef::new(Campaigns::ScheduleType).string().not_null())
                    .col(ColumnDef::new(Campaigns::ScheduledAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Campaigns::Status).string().not_null())
                    .col(
                        ColumnDef::new(Campaigns::TotalRecipients)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Campaigns::Successful)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Campaigns::Failed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Campaigns::Table)
                    .col(Campaigns::ClientId)
                    .name("idx_campaigns_client_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
    ClientId,
    CreatedBy,
    Channel,
    Content,
    Targets,
    ScheduleType,
    ScheduledAt,
    Status,
    TotalRecipients,
    Successful,
    Failed,
    CreatedAt,
    UpdatedAt,
}
