use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use relaya_auth_types::identity::Identity;
use relaya_domain::platform::Platform;

use crate::domain::types::Credential;
use crate::error::CampaignServiceError;
use crate::state::AppState;
use crate::usecase::credential::ListCredentialsUseCase;

/// Connection summary. Tokens never leave the service.
#[derive(Serialize)]
pub struct CredentialResponse {
    pub platform: Platform,
    pub account_id: String,
    pub account_name: String,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "relaya_core::serde::to_rfc3339_ms")]
    pub connected_at: DateTime<Utc>,
}

impl From<Credential> for CredentialResponse {
    fn from(credential: Credential) -> Self {
        Self {
            platform: credential.platform,
            account_id: credential.account_id,
            account_name: credential.account_name,
            expires_at: credential.expires_at,
            connected_at: credential.created_at,
        }
    }
}

// ── GET /credentials ─────────────────────────────────────────────────────────

pub async fn list_credentials(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CredentialResponse>>, CampaignServiceError> {
    let usecase = ListCredentialsUseCase {
        credentials: state.credential_repo(),
    };
    let credentials = usecase.execute(identity.client_id).await?;
    Ok(Json(credentials.into_iter().map(Into::into).collect()))
}
