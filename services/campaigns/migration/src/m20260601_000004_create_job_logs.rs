use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JobLogs::Kind).string().not_null())
                    .col(ColumnDef::new(JobLogs::Status).string().not_null())
                    .col(ColumnDef::new(JobLogs::Detail).string())
                    .col(
                        ColumnDef::new(JobLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobLogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum JobLogs {
    Table,
    Id,
    Kind,
    Status,
    Detail,
    CreatedAt,
    UpdatedAt,
}
