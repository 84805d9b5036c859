use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;

use relaya_auth_types::identity::Identity;
use relaya_domain::platform::Platform;

use crate::error::CampaignServiceError;
use crate::handlers::credential::CredentialResponse;
use crate::state::AppState;
use crate::usecase::credential::DisconnectUseCase;
use crate::usecase::oauth::{
    CompleteOAuthInput, CompleteOAuthUseCase, StartOAuthInput, StartOAuthUseCase,
};

// ── GET /connect/{platform} ──────────────────────────────────────────────────

/// Authenticates the caller (query token, cookie, or header — the
/// `Identity` extractor), issues a one-time state token, and bounces the
/// browser to the provider's authorize page.
pub async fn start_connect(
    identity: Identity,
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<Redirect, CampaignServiceError> {
    let platform: Platform = platform.parse()?;

    let usecase = StartOAuthUseCase {
        states: state.state_store(),
        connector: state.connector(platform),
        redirect_uri: state.config.redirect_uri(platform),
    };
    let url = usecase
        .execute(StartOAuthInput {
            platform,
            client_id: identity.client_id,
            user_id: identity.user_id,
        })
        .await?;

    Ok(Redirect::temporary(&url))
}

// ── GET /connect/{platform}/callback ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConnectCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Provider redirect target. No `Identity` here — the browser arrives from
/// the provider; the state token is what binds the callback to the client
/// that started the flow.
pub async fn connect_callback(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(query): Query<ConnectCallbackQuery>,
) -> Result<impl IntoResponse, CampaignServiceError> {
    let platform: Platform = platform.parse()?;

    let usecase = CompleteOAuthUseCase {
        states: state.state_store(),
        connector: state.connector(platform),
        credentials: state.credential_repo(),
        platform,
        redirect_uri: state.config.redirect_uri(platform),
    };
    let credential = usecase
        .execute(CompleteOAuthInput {
            code: query.code,
            state: query.state,
            error: query.error,
        })
        .await?;

    Ok((StatusCode::OK, Json(CredentialResponse::from(credential))))
}

// ── DELETE /connect/{platform} ───────────────────────────────────────────────

pub async fn disconnect(
    identity: Identity,
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<StatusCode, CampaignServiceError> {
    let platform: Platform = platform.parse()?;

    let usecase = DisconnectUseCase {
        credentials: state.credential_repo(),
    };
    usecase.execute(identity.client_id, platform).await?;
    Ok(StatusCode::NO_CONTENT)
}
