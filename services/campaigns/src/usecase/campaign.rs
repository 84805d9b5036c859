use chrono::{DateTime, Utc};
use uuid::Uuid;

use relaya_domain::content::MessageContent;
use relaya_domain::outcome::DispatchSummary;
use relaya_domain::platform::Channel;

use crate::adapters::MessageAdapter;
use crate::domain::repository::CampaignRepository;
use crate::domain::types::{Campaign, CampaignStatus, ScheduleType};
use crate::error::CampaignServiceError;
use crate::usecase::dispatch::DispatchBulkUseCase;
use crate::usecase::reconcile::ReconcileCampaignUseCase;

pub struct CreateCampaignInput {
    pub client_id: Uuid,
    pub created_by: Uuid,
    pub channel: Channel,
    pub content: MessageContent,
    pub targets: Vec<String>,
    pub schedule_type: ScheduleType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

pub struct CreateCampaignOutput {
    pub campaign: Campaign,
    /// Present for immediate campaigns — the settled dispatch aggregate.
    pub summary: Option<DispatchSummary>,
}

/// Create a campaign and, for immediate sends, dispatch + reconcile within
/// the same request. Scheduled campaigns are persisted untouched for the
/// external scheduler.
///
/// The create commits before dispatch starts, so the row always has an id
/// to reconcile against. A crash between the two leaves the row in its
/// pre-dispatch status — accepted; there is no two-phase commit here.
pub struct CreateCampaignUseCase<R, A>
where
    R: CampaignRepository + Clone,
    A: MessageAdapter,
{
    pub campaigns: R,
    pub adapter: A,
}

impl<R, A> CreateCampaignUseCase<R, A>
where
    R: CampaignRepository + Clone,
    A: MessageAdapter,
{
    pub async fn execute(
        &self,
        input: CreateCampaignInput,
    ) -> Result<CreateCampaignOutput, CampaignServiceError> {
        // 1. Validate before anything external happens.
        if input.targets.is_empty() {
            return Err(CampaignServiceError::NoValidTargets);
        }
        if input.schedule_type == ScheduleType::Scheduled && input.scheduled_at.is_none() {
            return Err(CampaignServiceError::MissingData);
        }

        // 2. Persist in pre-dispatch status.
        let now = Utc::now();
        let status = match input.schedule_type {
            ScheduleType::Immediate => CampaignStatus::Draft,
            ScheduleType::Scheduled => CampaignStatus::Scheduled,
        };
        let mut campaign = Campaign {
            id: Uuid::new_v4(),
            client_id: input.client_id,
            created_by: input.created_by,
            channel: input.channel,
            content: input.content,
            targets: input.targets,
            schedule_type: input.schedule_type,
            scheduled_at: input.scheduled_at,
            status,
            total_recipients: 0,
            successful: 0,
            failed: 0,
            created_at: now,
            updated_at: now,
        };
        self.campaigns.create(&campaign).await?;

        if campaign.schedule_type == ScheduleType::Scheduled {
            return Ok(CreateCampaignOutput {
                campaign,
                summary: None,
            });
        }

        // 3. Fan out, then reconcile the durable row with the aggregate.
        let dispatch = DispatchBulkUseCase {
            adapter: &self.adapter,
        };
        let summary = match dispatch.execute(&campaign.targets, &campaign.content).await {
            Ok(summary) => summary,
            Err(e) => {
                // Nothing was attempted; the campaign stays editable.
                self.campaigns.revert_draft(campaign.id).await?;
                return Err(e);
            }
        };

        let reconcile = ReconcileCampaignUseCase {
            campaigns: self.campaigns.clone(),
        };
        campaign.status = reconcile.execute(campaign.id, &summary).await?;
        match campaign.status {
            CampaignStatus::Sent => {
                campaign.total_recipients = summary.total as i32;
                campaign.successful = summary.successful as i32;
                campaign.failed = summary.failed as i32;
            }
            // Reverted to draft: mirror the zeroed row, not the aggregate.
            _ => {
                campaign.successful = 0;
                campaign.failed = 0;
            }
        }

        Ok(CreateCampaignOutput {
            campaign,
            summary: Some(summary),
        })
    }
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub struct GetCampaignUseCase<R: CampaignRepository> {
    pub campaigns: R,
}

impl<R: CampaignRepository> GetCampaignUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        client_id: Uuid,
    ) -> Result<Campaign, CampaignServiceError> {
        self.campaigns
            .find(id, client_id)
            .await?
            .ok_or(CampaignServiceError::CampaignNotFound)
    }
}

pub struct ListCampaignsUseCase<R: CampaignRepository> {
    pub campaigns: R,
}

impl<R: CampaignRepository> ListCampaignsUseCase<R> {
    pub async fn execute(&self, client_id: Uuid) -> Result<Vec<Campaign>, CampaignServiceError> {
        self.campaigns.list(client_id).await
    }
}
