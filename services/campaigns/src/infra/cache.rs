//! Redis-backed OAuth state store.
//!
//! `SET EX` bounds every pending flow to [`STATE_TTL_SECS`]; `GETDEL` makes
//! consumption atomic, so a state token validates at most once even under
//! concurrent callbacks.

use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use anyhow::Context as _;

use crate::domain::repository::StateStore;
use crate::domain::types::{OAuthState, STATE_TTL_SECS};
use crate::error::CampaignServiceError;

#[derive(Clone)]
pub struct RedisStateStore {
    pub pool: Pool,
}

fn state_key(token: &str) -> String {
    format!("oauth_state:{token}")
}

impl StateStore for RedisStateStore {
    async fn put(&self, token: &str, state: &OAuthState) -> Result<(), CampaignServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CampaignServiceError::Internal(e.into()))?;
        let payload = serde_json::to_vec(state).context("encode oauth state")?;
        let (): () = conn
            .set_ex(state_key(token), payload, STATE_TTL_SECS)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| CampaignServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn take(&self, token: &str) -> Result<Option<OAuthState>, CampaignServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CampaignServiceError::Internal(e.into()))?;
        let value: Option<Vec<u8>> = conn
            .get_del(state_key(token))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| CampaignServiceError::Internal(e.into()))?;
        match value {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).context("decode oauth state")?,
            )),
            None => Ok(None),
        }
    }
}
