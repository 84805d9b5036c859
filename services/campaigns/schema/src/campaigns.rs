use sea_orm::entity::prelude::*;

/// A bulk WhatsApp or email campaign.
///
/// `status` holds "draft" | "scheduled" | "sent". There is deliberately no
/// "failed" value: a campaign whose dispatch fails entirely reverts to
/// "draft" so it can be edited and retried. `content` and `targets` are
/// JSONB, decoded into domain types at the repository boundary.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub created_by: Uuid,
    pub channel: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub targets: Json,
    pub schedule_type: String,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: String,
    pub total_recipients: i32,
    pub successful: i32,
    pub failed: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
