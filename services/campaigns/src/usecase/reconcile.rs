use uuid::Uuid;

use relaya_domain::outcome::{DispatchSummary, PublishOutcome};

use crate::domain::repository::{CampaignRepository, PostRepository};
use crate::domain::types::{CampaignStatus, PostStatus};
use crate::error::CampaignServiceError;

/// Settle a campaign's durable status from a dispatch aggregate.
///
/// Any success counts as sent; zero successes reverts the campaign to
/// draft because the campaign schema carries no failure value — a known
/// compromise, flagged for schema evolution rather than silently assumed
/// away. Counter writes are absolute, so applying the same aggregate twice
/// changes nothing.
pub struct ReconcileCampaignUseCase<R: CampaignRepository> {
    pub campaigns: R,
}

impl<R: CampaignRepository> ReconcileCampaignUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        summary: &DispatchSummary,
    ) -> Result<CampaignStatus, CampaignServiceError> {
        if summary.successful > 0 {
            self.campaigns
                .mark_sent(
                    id,
                    summary.total as i32,
                    summary.successful as i32,
                    summary.failed as i32,
                )
                .await?;
            Ok(CampaignStatus::Sent)
        } else {
            self.campaigns.revert_draft(id).await?;
            Ok(CampaignStatus::Draft)
        }
    }
}

/// Settle a post's durable status from its publish outcome. Posts do have
/// a terminal failure state, so total failure uses it instead of the draft
/// fallback.
pub struct ReconcilePostUseCase<R: PostRepository> {
    pub posts: R,
}

impl<R: PostRepository> ReconcilePostUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        outcome: &PublishOutcome,
    ) -> Result<PostStatus, CampaignServiceError> {
        if outcome.success {
            self.posts
                .mark_published(id, outcome.external_id.as_deref().unwrap_or_default())
                .await?;
            Ok(PostStatus::Published)
        } else {
            self.posts.mark_failed(id).await?;
            Ok(PostStatus::Failed)
        }
    }
}
