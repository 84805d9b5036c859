#![allow(async_fn_in_trait)]

use uuid::Uuid;

use relaya_domain::platform::Platform;

use crate::domain::types::{Campaign, Credential, JobLog, JobStatus, OAuthState, Post};
use crate::error::CampaignServiceError;

/// Repository for bulk campaigns.
pub trait CampaignRepository: Send + Sync {
    async fn create(&self, campaign: &Campaign) -> Result<(), CampaignServiceError>;

    async fn find(&self, id: Uuid, client_id: Uuid)
    -> Result<Option<Campaign>, CampaignServiceError>;

    async fn list(&self, client_id: Uuid) -> Result<Vec<Campaign>, CampaignServiceError>;

    /// Settle a campaign after a dispatch with at least one success.
    /// Writes absolute counter values — replays are no-ops.
    async fn mark_sent(
        &self,
        id: Uuid,
        total: i32,
        successful: i32,
        failed: i32,
    ) -> Result<(), CampaignServiceError>;

    /// Revert a campaign to draft after a dispatch with zero successes.
    async fn revert_draft(&self, id: Uuid) -> Result<(), CampaignServiceError>;
}

/// Repository for social-media posts.
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<(), CampaignServiceError>;

    async fn find(&self, id: Uuid, client_id: Uuid) -> Result<Option<Post>, CampaignServiceError>;

    async fn list(&self, client_id: Uuid) -> Result<Vec<Post>, CampaignServiceError>;

    async fn mark_published(&self, id: Uuid, external_id: &str)
    -> Result<(), CampaignServiceError>;

    async fn mark_failed(&self, id: Uuid) -> Result<(), CampaignServiceError>;
}

/// Repository for OAuth credentials.
pub trait CredentialRepository: Send + Sync {
    /// Insert or overwrite the row for (client, platform). Reconnects win:
    /// token, account name, and expiry are replaced and `is_active` forced
    /// true.
    async fn upsert(&self, credential: &Credential) -> Result<(), CampaignServiceError>;

    async fn find_active(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<Option<Credential>, CampaignServiceError>;

    async fn list_active(&self, client_id: Uuid) -> Result<Vec<Credential>, CampaignServiceError>;

    /// Soft-delete the connection. Returns `false` if no active row existed.
    async fn deactivate(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<bool, CampaignServiceError>;
}

/// TTL-bounded store for one-time OAuth state tokens.
pub trait StateStore: Send + Sync {
    async fn put(&self, token: &str, state: &OAuthState) -> Result<(), CampaignServiceError>;

    /// Remove and return the state for `token`. A second take of the same
    /// token returns `None` — this is what makes state tokens single-use.
    async fn take(&self, token: &str) -> Result<Option<OAuthState>, CampaignServiceError>;
}

/// Repository for background-job terminal statuses.
pub trait JobLogRepository: Send + Sync {
    async fn create(&self, job: &JobLog) -> Result<(), CampaignServiceError>;

    async fn mark_finished(
        &self,
        id: Uuid,
        status: JobStatus,
        detail: Option<&str>,
    ) -> Result<(), CampaignServiceError>;
}

/// Black-box marketing-copy generator.
pub trait CopyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, CampaignServiceError>;
}
