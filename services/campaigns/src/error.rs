use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use relaya_domain::platform::UnknownPlatform;

/// Why an OAuth connect flow was rejected. Every variant is terminal for
/// that flow instance — the user restarts from the connect endpoint.
#[derive(Debug, thiserror::Error)]
pub enum OAuthRejection {
    #[error("provider returned {0}")]
    Provider(String),
    #[error("missing code or state parameter")]
    MissingParams,
    #[error("unknown or expired state token")]
    UnknownState,
    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),
    #[error("token response missing access_token")]
    MissingAccessToken,
    #[error("account lookup failed: {0}")]
    AccountLookup(String),
}

/// Campaigns service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CampaignServiceError {
    #[error("no valid targets")]
    NoValidTargets,
    #[error("unknown platform")]
    InvalidPlatform,
    #[error("missing data")]
    MissingData,
    #[error("campaign not found")]
    CampaignNotFound,
    #[error("post not found")]
    PostNotFound,
    #[error("no active credential for platform")]
    CredentialNotFound,
    #[error("connect rejected: {0}")]
    OAuthRejected(#[from] OAuthRejection),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CampaignServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoValidTargets => "NO_VALID_TARGETS",
            Self::InvalidPlatform => "INVALID_PLATFORM",
            Self::MissingData => "MISSING_DATA",
            Self::CampaignNotFound => "CAMPAIGN_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::CredentialNotFound => "CREDENTIAL_NOT_FOUND",
            Self::OAuthRejected(_) => "OAUTH_REJECTED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<UnknownPlatform> for CampaignServiceError {
    fn from(_: UnknownPlatform) -> Self {
        Self::InvalidPlatform
    }
}

impl IntoResponse for CampaignServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoValidTargets
            | Self::InvalidPlatform
            | Self::MissingData
            | Self::OAuthRejected(_) => StatusCode::BAD_REQUEST,
            Self::CampaignNotFound | Self::PostNotFound | Self::CredentialNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
