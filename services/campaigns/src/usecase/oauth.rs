use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use relaya_domain::platform::Platform;

use crate::adapters::OAuthConnector;
use crate::domain::repository::{CredentialRepository, StateStore};
use crate::domain::types::{Credential, OAuthState, STATE_TOKEN_LEN};
use crate::error::{CampaignServiceError, OAuthRejection};

/// Charset for generating OAuth state tokens (alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

fn generate_state_token() -> String {
    let mut rng = rand::rng();
    (0..STATE_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── StartOAuth ───────────────────────────────────────────────────────────────

pub struct StartOAuthInput {
    pub platform: Platform,
    pub client_id: Uuid,
    pub user_id: Uuid,
}

/// Begin a connect flow: mint a one-time state token, stash the pending
/// flow in the TTL-bounded state store, and build the provider authorize
/// URL carrying the token as `state`.
///
/// Caller authentication happens before this runs — the handler's
/// `Identity` extractor rejects first, so no state is ever issued for an
/// unauthenticated request.
pub struct StartOAuthUseCase<S, C>
where
    S: StateStore,
    C: OAuthConnector,
{
    pub states: S,
    pub connector: C,
    pub redirect_uri: String,
}

impl<S, C> StartOAuthUseCase<S, C>
where
    S: StateStore,
    C: OAuthConnector,
{
    pub async fn execute(&self, input: StartOAuthInput) -> Result<String, CampaignServiceError> {
        let token = generate_state_token();
        let state = OAuthState {
            platform: input.platform,
            client_id: input.client_id,
            user_id: input.user_id,
            created_at: Utc::now(),
        };
        self.states.put(&token, &state).await?;
        Ok(self.connector.authorize_url(&token, &self.redirect_uri))
    }
}

// ── CompleteOAuth ────────────────────────────────────────────────────────────

pub struct CompleteOAuthInput {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Provider error parameter (e.g. `access_denied`).
    pub error: Option<String>,
}

/// Finish a connect flow from the provider callback.
///
/// Every rejection is terminal for this flow instance, and the state token
/// is consumed on every path — success, provider error, or rejection — so
/// a replayed `(code, state)` pair always fails on the state lookup.
pub struct CompleteOAuthUseCase<S, C, R>
where
    S: StateStore,
    C: OAuthConnector,
    R: CredentialRepository,
{
    pub states: S,
    pub connector: C,
    pub credentials: R,
    pub platform: Platform,
    pub redirect_uri: String,
}

impl<S, C, R> CompleteOAuthUseCase<S, C, R>
where
    S: StateStore,
    C: OAuthConnector,
    R: CredentialRepository,
{
    pub async fn execute(
        &self,
        input: CompleteOAuthInput,
    ) -> Result<Credential, CampaignServiceError> {
        if let Some(error) = input.error {
            // The user denied (or the provider failed) — invalidate the
            // token so the callback cannot be replayed, then reject.
            if let Some(state) = &input.state {
                let _ = self.states.take(state).await?;
            }
            return Err(OAuthRejection::Provider(error).into());
        }

        let (code, state_token) = match (input.code, input.state) {
            (Some(code), Some(state)) => (code, state),
            _ => return Err(OAuthRejection::MissingParams.into()),
        };

        // Single use: the take removes the token whatever happens next.
        let state = self
            .states
            .take(&state_token)
            .await?
            .ok_or(OAuthRejection::UnknownState)?;
        if state.platform != self.platform {
            return Err(OAuthRejection::UnknownState.into());
        }

        let grant = self
            .connector
            .exchange_code(&code, &self.redirect_uri)
            .await?;
        let account = self.connector.resolve_account(&grant.access_token).await?;

        let now = Utc::now();
        let credential = Credential {
            id: Uuid::new_v4(),
            client_id: state.client_id,
            platform: self.platform,
            account_id: account.id,
            account_name: account.name,
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: grant.expires_in.map(|secs| now + Duration::seconds(secs)),
            is_active: true,
            metadata: account.metadata,
            created_at: now,
            updated_at: now,
        };
        self.credentials.upsert(&credential).await?;

        tracing::info!(
            platform = %self.platform,
            client_id = %credential.client_id,
            account = %credential.account_name,
            "platform connected"
        );
        Ok(credential)
    }
}
