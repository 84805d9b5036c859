use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use relaya_campaigns_schema::{campaigns, credentials, job_logs, posts};
use relaya_domain::platform::Platform;

use crate::domain::repository::{
    CampaignRepository, CredentialRepository, JobLogRepository, PostRepository,
};
use crate::domain::types::{
    Campaign, CampaignStatus, Credential, JobLog, JobStatus, Post, PostStatus,
};
use crate::error::CampaignServiceError;

// ── Campaign repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCampaignRepository {
    pub db: DatabaseConnection,
}

impl CampaignRepository for DbCampaignRepository {
    async fn create(&self, campaign: &Campaign) -> Result<(), CampaignServiceError> {
        campaigns::ActiveModel {
            id: Set(campaign.id),
            client_id: Set(campaign.client_id),
            created_by: Set(campaign.created_by),
            channel: Set(campaign.channel.as_str().to_owned()),
            content: Set(serde_json::to_value(&campaign.content).context("encode content")?),
            targets: Set(serde_json::to_value(&campaign.targets).context("encode targets")?),
            schedule_type: Set(campaign.schedule_type.as_str().to_owned()),
            scheduled_at: Set(campaign.scheduled_at),
            status: Set(campaign.status.as_str().to_owned()),
            total_recipients: Set(campaign.total_recipients),
            successful: Set(campaign.successful),
            failed: Set(campaign.failed),
            created_at: Set(campaign.created_at),
            updated_at: Set(campaign.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create campaign")?;
        Ok(())
    }

    async fn find(
        &self,
        id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Campaign>, CampaignServiceError> {
        let model = campaigns::Entity::find_by_id(id)
            .filter(campaigns::Column::ClientId.eq(client_id))
            .one(&self.db)
            .await
            .context("find campaign")?;
        model.map(campaign_from_model).transpose()
    }

    async fn list(&self, client_id: Uuid) -> Result<Vec<Campaign>, CampaignServiceError> {
        let models = campaigns::Entity::find()
            .filter(campaigns::Column::ClientId.eq(client_id))
            .order_by_desc(campaigns::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list campaigns")?;
        models.into_iter().map(campaign_from_model).collect()
    }

    async fn mark_sent(
        &self,
        id: Uuid,
        total: i32,
        successful: i32,
        failed: i32,
    ) -> Result<(), CampaignServiceError> {
        campaigns::ActiveModel {
            id: Set(id),
            status: Set(CampaignStatus::Sent.as_str().to_owned()),
            total_recipients: Set(total),
            successful: Set(successful),
            failed: Set(failed),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark campaign sent")?;
        Ok(())
    }

    async fn revert_draft(&self, id: Uuid) -> Result<(), CampaignServiceError> {
        campaigns::ActiveModel {
            id: Set(id),
            status: Set(CampaignStatus::Draft.as_str().to_owned()),
            successful: Set(0),
            failed: Set(0),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("revert campaign to draft")?;
        Ok(())
    }
}

fn campaign_from_model(model: campaigns::Model) -> Result<Campaign, CampaignServiceError> {
    Ok(Campaign {
        id: model.id,
        client_id: model.client_id,
        created_by: model.created_by,
        channel: model.channel.parse().context("campaign channel")?,
        content: serde_json::from_value(model.content).context("decode campaign content")?,
        targets: serde_json::from_value(model.targets).context("decode campaign targets")?,
        schedule_type: model
            .schedule_type
            .parse()
            .context("campaign schedule type")?,
        scheduled_at: model.scheduled_at,
        status: model.status.parse().context("campaign status")?,
        total_recipients: model.total_recipients,
        successful: model.successful,
        failed: model.failed,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Post repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPostRepository {
    pub db: DatabaseConnection,
}

impl PostRepository for DbPostRepository {
    async fn create(&self, post: &Post) -> Result<(), CampaignServiceError> {
        posts::ActiveModel {
            id: Set(post.id),
            client_id: Set(post.client_id),
            created_by: Set(post.created_by),
            platform: Set(post.platform.as_str().to_owned()),
            content: Set(serde_json::to_value(&post.content).context("encode post content")?),
            schedule_type: Set(post.schedule_type.as_str().to_owned()),
            scheduled_at: Set(post.scheduled_at),
            status: Set(post.status.as_str().to_owned()),
            external_id: Set(post.external_id.clone()),
            created_at: Set(post.created_at),
            updated_at: Set(post.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create post")?;
        Ok(())
    }

    async fn find(&self, id: Uuid, client_id: Uuid) -> Result<Option<Post>, CampaignServiceError> {
        let model = posts::Entity::find_by_id(id)
            .filter(posts::Column::ClientId.eq(client_id))
            .one(&self.db)
            .await
            .context("find post")?;
        model.map(post_from_model).transpose()
    }

    async fn list(&self, client_id: Uuid) -> Result<Vec<Post>, CampaignServiceError> {
        let models = posts::Entity::find()
            .filter(posts::Column::ClientId.eq(client_id))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list posts")?;
        models.into_iter().map(post_from_model).collect()
    }

    async fn mark_published(
        &self,
        id: Uuid,
        external_id: &str,
    ) -> Result<(), CampaignServiceError> {
        posts::ActiveModel {
            id: Set(id),
            status: Set(PostStatus::Published.as_str().to_owned()),
            external_id: Set(Some(external_id.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark post published")?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid) -> Result<(), CampaignServiceError> {
        posts::ActiveModel {
            id: Set(id),
            status: Set(PostStatus::Failed.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark post failed")?;
        Ok(())
    }
}

fn post_from_model(model: posts::Model) -> Result<Post, CampaignServiceError> {
    Ok(Post {
        id: model.id,
        client_id: model.client_id,
        created_by: model.created_by,
        platform: model.platform.parse().context("post platform")?,
        content: serde_json::from_value(model.content).context("decode post content")?,
        schedule_type: model.schedule_type.parse().context("post schedule type")?,
        scheduled_at: model.scheduled_at,
        status: model.status.parse().context("post status")?,
        external_id: model.external_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Credential repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCredentialRepository {
    pub db: DatabaseConnection,
}

impl CredentialRepository for DbCredentialRepository {
    async fn upsert(&self, credential: &Credential) -> Result<(), CampaignServiceError> {
        let existing = credentials::Entity::find()
            .filter(credentials::Column::ClientId.eq(credential.client_id))
            .filter(credentials::Column::Platform.eq(credential.platform.as_str()))
            .one(&self.db)
            .await
            .context("find credential for upsert")?;

        match existing {
            Some(row) => {
                // Reconnect: the new connection's token/name/expiry win and
                // the row is forced back to active.
                let mut active = row.into_active_model();
                active.account_id = Set(credential.account_id.clone());
                active.account_name = Set(credential.account_name.clone());
                active.access_token = Set(credential.access_token.clone());
                active.refresh_token = Set(credential.refresh_token.clone());
                active.expires_at = Set(credential.expires_at);
                active.is_active = Set(true);
                active.metadata = Set(credential.metadata.clone());
                active.updated_at = Set(Utc::now());
                active.update(&self.db).await.context("update credential")?;
            }
            None => {
                credentials::ActiveModel {
                    id: Set(credential.id),
                    client_id: Set(credential.client_id),
                    platform: Set(credential.platform.as_str().to_owned()),
                    account_id: Set(credential.account_id.clone()),
                    account_name: Set(credential.account_name.clone()),
                    access_token: Set(credential.access_token.clone()),
                    refresh_token: Set(credential.refresh_token.clone()),
                    expires_at: Set(credential.expires_at),
                    is_active: Set(true),
                    metadata: Set(credential.metadata.clone()),
                    created_at: Set(credential.created_at),
                    updated_at: Set(credential.updated_at),
                }
                .insert(&self.db)
                .await
                .context("insert credential")?;
            }
        }
        Ok(())
    }

    async fn find_active(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<Option<Credential>, CampaignServiceError> {
        let model = credentials::Entity::find()
            .filter(credentials::Column::ClientId.eq(client_id))
            .filter(credentials::Column::Platform.eq(platform.as_str()))
            .filter(credentials::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .context("find active credential")?;
        model.map(credential_from_model).transpose()
    }

    async fn list_active(&self, client_id: Uuid) -> Result<Vec<Credential>, CampaignServiceError> {
        let models = credentials::Entity::find()
            .filter(credentials::Column::ClientId.eq(client_id))
            .filter(credentials::Column::IsActive.eq(true))
            .order_by_asc(credentials::Column::Platform)
            .all(&self.db)
            .await
            .context("list active credentials")?;
        models.into_iter().map(credential_from_model).collect()
    }

    async fn deactivate(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<bool, CampaignServiceError> {
        let result = credentials::Entity::update_many()
            .col_expr(credentials::Column::IsActive, Expr::value(false))
            .col_expr(credentials::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(credentials::Column::ClientId.eq(client_id))
            .filter(credentials::Column::Platform.eq(platform.as_str()))
            .filter(credentials::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .context("deactivate credential")?;
        Ok(result.rows_affected > 0)
    }
}

fn credential_from_model(model: credentials::Model) -> Result<Credential, CampaignServiceError> {
    Ok(Credential {
        id: model.id,
        client_id: model.client_id,
        platform: model.platform.parse().context("credential platform")?,
        account_id: model.account_id,
        account_name: model.account_name,
        access_token: model.access_token,
        refresh_token: model.refresh_token,
        expires_at: model.expires_at,
        is_active: model.is_active,
        metadata: model.metadata,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Job log repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbJobLogRepository {
    pub db: DatabaseConnection,
}

impl JobLogRepository for DbJobLogRepository {
    async fn create(&self, job: &JobLog) -> Result<(), CampaignServiceError> {
        job_logs::ActiveModel {
            id: Set(job.id),
            kind: Set(job.kind.clone()),
            status: Set(job.status.as_str().to_owned()),
            detail: Set(job.detail.clone()),
            created_at: Set(job.created_at),
            updated_at: Set(job.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create job log")?;
        Ok(())
    }

    async fn mark_finished(
        &self,
        id: Uuid,
        status: JobStatus,
        detail: Option<&str>,
    ) -> Result<(), CampaignServiceError> {
        job_logs::ActiveModel {
            id: Set(id),
            status: Set(status.as_str().to_owned()),
            detail: Set(detail.map(str::to_owned)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark job finished")?;
        Ok(())
    }
}
