use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relaya_auth_types::identity::Identity;

use crate::domain::repository::JobLogRepository;
use crate::domain::types::{JobLog, JobStatus};
use crate::error::CampaignServiceError;
use crate::state::AppState;
use crate::usecase::proposal::{ProposalInput, SendProposalUseCase};

#[derive(Deserialize)]
pub struct QueueProposalRequest {
    pub recipient: String,
    pub brief: String,
}

#[derive(Serialize)]
pub struct QueueProposalResponse {
    pub job_id: Uuid,
    pub status: String,
}

// ── POST /proposals ──────────────────────────────────────────────────────────

/// Queue proposal generation + emailing. The request answers 202
/// immediately; the spawned task is not awaited and records its own
/// terminal status on the job-log row.
pub async fn queue_proposal(
    _identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<QueueProposalRequest>,
) -> Result<impl IntoResponse, CampaignServiceError> {
    if body.recipient.is_empty() || body.brief.is_empty() {
        return Err(CampaignServiceError::MissingData);
    }

    let now = Utc::now();
    let job = JobLog {
        id: Uuid::new_v4(),
        kind: "proposal_email".to_owned(),
        status: JobStatus::Queued,
        detail: None,
        created_at: now,
        updated_at: now,
    };
    state.job_log_repo().create(&job).await?;

    let usecase = SendProposalUseCase {
        generator: state.copy_generator(),
        mailer: state.email_adapter(),
        jobs: state.job_log_repo(),
    };
    let job_id = job.id;
    let input = ProposalInput {
        recipient: body.recipient,
        brief: body.brief,
    };
    tokio::spawn(async move {
        if let Err(e) = usecase.execute(job_id, input).await {
            tracing::error!(error = %e, job_id = %job_id, "proposal job could not record its outcome");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(QueueProposalResponse {
            job_id,
            status: JobStatus::Queued.as_str().to_owned(),
        }),
    ))
}
