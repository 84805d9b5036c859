use sea_orm::entity::prelude::*;

/// A single social-media post.
///
/// `status` holds "draft" | "scheduled" | "published" | "failed" — unlike
/// campaigns, posts have a genuine terminal failure state. `external_id`
/// is the platform-assigned post id once published.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub created_by: Uuid,
    pub platform: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Json,
    pub schedule_type: String,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: String,
    pub external_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
