use chrono::{DateTime, Utc};
use uuid::Uuid;

use relaya_domain::content::PostContent;
use relaya_domain::outcome::PublishOutcome;
use relaya_domain::platform::Platform;

use crate::adapters::SocialPublisher;
use crate::domain::repository::{CredentialRepository, PostRepository};
use crate::domain::types::{Post, PostStatus, ScheduleType};
use crate::error::CampaignServiceError;
use crate::usecase::reconcile::ReconcilePostUseCase;

pub struct CreatePostInput {
    pub client_id: Uuid,
    pub created_by: Uuid,
    pub platform: Platform,
    pub content: PostContent,
    pub schedule_type: ScheduleType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

pub struct CreatePostOutput {
    pub post: Post,
    /// Present for immediate posts — the publish outcome, success or not.
    pub outcome: Option<PublishOutcome>,
}

/// Create a post and, for immediate posts, publish through the platform's
/// adapter — the N=1 form of the fan-out contract. The publish requires an
/// active credential for (client, platform); without one the post settles
/// as failed and the caller gets the credential error.
pub struct CreatePostUseCase<R, C, P>
where
    R: PostRepository + Clone,
    C: CredentialRepository,
    P: SocialPublisher,
{
    pub posts: R,
    pub credentials: C,
    pub publisher: P,
}

impl<R, C, P> CreatePostUseCase<R, C, P>
where
    R: PostRepository + Clone,
    C: CredentialRepository,
    P: SocialPublisher,
{
    pub async fn execute(
        &self,
        input: CreatePostInput,
    ) -> Result<CreatePostOutput, CampaignServiceError> {
        if input.content.caption.is_empty() && input.content.media.is_empty() {
            return Err(CampaignServiceError::MissingData);
        }
        if input.schedule_type == ScheduleType::Scheduled && input.scheduled_at.is_none() {
            return Err(CampaignServiceError::MissingData);
        }

        let now = Utc::now();
        let status = match input.schedule_type {
            ScheduleType::Immediate => PostStatus::Draft,
            ScheduleType::Scheduled => PostStatus::Scheduled,
        };
        let mut post = Post {
            id: Uuid::new_v4(),
            client_id: input.client_id,
            created_by: input.created_by,
            platform: input.platform,
            content: input.content,
            schedule_type: input.schedule_type,
            scheduled_at: input.scheduled_at,
            status,
            external_id: None,
            created_at: now,
            updated_at: now,
        };
        self.posts.create(&post).await?;

        if post.schedule_type == ScheduleType::Scheduled {
            return Ok(CreatePostOutput {
                post,
                outcome: None,
            });
        }

        let credential = match self
            .credentials
            .find_active(post.client_id, post.platform)
            .await?
        {
            Some(credential) => credential,
            None => {
                // Raised before the platform was contacted; posts have a
                // genuine terminal failure state, so use it.
                self.posts.mark_failed(post.id).await?;
                return Err(CampaignServiceError::CredentialNotFound);
            }
        };

        let outcome = self.publisher.publish(&credential, &post.content).await;

        let reconcile = ReconcilePostUseCase {
            posts: self.posts.clone(),
        };
        post.status = reconcile.execute(post.id, &outcome).await?;
        post.external_id = outcome.external_id.clone();

        Ok(CreatePostOutput {
            post,
            outcome: Some(outcome),
        })
    }
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct GetPostUseCase<R: PostRepository> {
    pub posts: R,
}

impl<R: PostRepository> GetPostUseCase<R> {
    pub async fn execute(&self, id: Uuid, client_id: Uuid) -> Result<Post, CampaignServiceError> {
        self.posts
            .find(id, client_id)
            .await?
            .ok_or(CampaignServiceError::PostNotFound)
    }
}

pub struct ListPostsUseCase<R: PostRepository> {
    pub posts: R,
}

impl<R: PostRepository> ListPostsUseCase<R> {
    pub async fn execute(&self, client_id: Uuid) -> Result<Vec<Post>, CampaignServiceError> {
        self.posts.list(client_id).await
    }
}
