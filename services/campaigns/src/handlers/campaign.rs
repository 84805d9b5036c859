use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relaya_auth_types::identity::Identity;
use relaya_domain::content::MessageContent;
use relaya_domain::outcome::DispatchSummary;
use relaya_domain::platform::Channel;

use crate::domain::types::{Campaign, ScheduleType};
use crate::error::CampaignServiceError;
use crate::state::AppState;
use crate::usecase::campaign::{
    CreateCampaignInput, CreateCampaignUseCase, GetCampaignUseCase, ListCampaignsUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCampaignRequest {
    pub channel: Channel,
    pub content: MessageContent,
    pub targets: Vec<String>,
    pub schedule_type: ScheduleType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct CampaignResponse {
    pub id: Uuid,
    pub channel: Channel,
    pub status: String,
    pub schedule_type: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub total_recipients: i32,
    pub successful: i32,
    pub failed: i32,
    #[serde(serialize_with = "relaya_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            channel: campaign.channel,
            status: campaign.status.as_str().to_owned(),
            schedule_type: campaign.schedule_type.as_str().to_owned(),
            scheduled_at: campaign.scheduled_at,
            total_recipients: campaign.total_recipients,
            successful: campaign.successful,
            failed: campaign.failed,
            created_at: campaign.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CreateCampaignResponse {
    pub campaign: CampaignResponse,
    /// Aggregate dispatch result for immediate campaigns. Partial failure
    /// is a normal outcome — the request still answers 201.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchSummary>,
}

// ── POST /campaigns ──────────────────────────────────────────────────────────

pub async fn create_campaign(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCampaignRequest>,
) -> Result<impl IntoResponse, CampaignServiceError> {
    let input = CreateCampaignInput {
        client_id: identity.client_id,
        created_by: identity.user_id,
        channel: body.channel,
        content: body.content,
        targets: body.targets,
        schedule_type: body.schedule_type,
        scheduled_at: body.scheduled_at,
    };

    // The channel picks the adapter; the usecase is the same either way.
    let out = match body.channel {
        Channel::Whatsapp => {
            CreateCampaignUseCase {
                campaigns: state.campaign_repo(),
                adapter: state.whatsapp_adapter(),
            }
            .execute(input)
            .await?
        }
        Channel::Email => {
            CreateCampaignUseCase {
                campaigns: state.campaign_repo(),
                adapter: state.email_adapter(),
            }
            .execute(input)
            .await?
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateCampaignResponse {
            campaign: out.campaign.into(),
            dispatch: out.summary,
        }),
    ))
}

// ── GET /campaigns ───────────────────────────────────────────────────────────

pub async fn list_campaigns(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CampaignResponse>>, CampaignServiceError> {
    let usecase = ListCampaignsUseCase {
        campaigns: state.campaign_repo(),
    };
    let campaigns = usecase.execute(identity.client_id).await?;
    Ok(Json(campaigns.into_iter().map(Into::into).collect()))
}

// ── GET /campaigns/{id} ──────────────────────────────────────────────────────

pub async fn get_campaign(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CampaignResponse>, CampaignServiceError> {
    let usecase = GetCampaignUseCase {
        campaigns: state.campaign_repo(),
    };
    let campaign = usecase.execute(id, identity.client_id).await?;
    Ok(Json(campaign.into()))
}
