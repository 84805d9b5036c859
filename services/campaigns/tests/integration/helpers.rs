use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use relaya_campaigns::adapters::{MessageAdapter, OAuthConnector, SocialPublisher};
use relaya_campaigns::domain::repository::{
    CampaignRepository, CopyGenerator, CredentialRepository, JobLogRepository, PostRepository,
    StateStore,
};
use relaya_campaigns::domain::types::{
    Campaign, CampaignStatus, Credential, ExternalAccount, JobLog, JobStatus, OAuthState, Post,
    PostStatus, TokenGrant,
};
use relaya_campaigns::error::{CampaignServiceError, OAuthRejection};
use relaya_domain::content::{MessageContent, PostContent};
use relaya_domain::outcome::{PublishOutcome, TargetOutcome};
use relaya_domain::platform::Platform;

// ── MockMessageAdapter ───────────────────────────────────────────────────────

/// Scripted bulk-messaging adapter: `invalid` targets fail the validity
/// predicate, `failing` targets yield rejection outcomes, every attempted
/// send is recorded in order.
#[derive(Clone, Default)]
pub struct MockMessageAdapter {
    pub invalid: Vec<String>,
    pub failing: Vec<String>,
    calls: Arc<Mutex<Vec<(String, MessageContent)>>>,
}

impl MockMessageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invalid(mut self, targets: &[&str]) -> Self {
        self.invalid = targets.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_failing(mut self, targets: &[&str]) -> Self {
        self.failing = targets.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Shared handle to the recorded (target, content) calls.
    pub fn calls_handle(&self) -> Arc<Mutex<Vec<(String, MessageContent)>>> {
        Arc::clone(&self.calls)
    }
}

impl MessageAdapter for MockMessageAdapter {
    fn validate_target(&self, target: &str) -> bool {
        !self.invalid.iter().any(|t| t == target)
    }

    async fn send(&self, target: &str, content: &MessageContent) -> TargetOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((target.to_owned(), content.clone()));
        if self.failing.iter().any(|t| t == target) {
            TargetOutcome::rejected(target, "provider rejected message")
        } else {
            TargetOutcome::delivered(target, Some(format!("msg-{target}")))
        }
    }
}

// ── MockPublisher ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPublisher {
    pub fail_with: Option<String>,
    calls: Arc<Mutex<u32>>,
}

impl MockPublisher {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_owned()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

impl SocialPublisher for MockPublisher {
    async fn publish(&self, _credential: &Credential, _content: &PostContent) -> PublishOutcome {
        *self.calls.lock().unwrap() += 1;
        match &self.fail_with {
            Some(reason) => PublishOutcome::rejected(reason.clone()),
            None => PublishOutcome::published("ext-post-1"),
        }
    }
}

// ── MockConnector ────────────────────────────────────────────────────────────

/// Scripted OAuth connector. `grant: None` fails the exchange; setting
/// `missing_access_token` fails it with the missing-token rejection;
/// `account: None` fails the whoami lookup.
#[derive(Clone)]
pub struct MockConnector {
    pub grant: Option<TokenGrant>,
    pub missing_access_token: bool,
    pub account: Option<ExternalAccount>,
    pub exchange_calls: Arc<Mutex<u32>>,
}

impl MockConnector {
    pub fn succeeding() -> Self {
        Self {
            grant: Some(TokenGrant {
                access_token: "fresh-access-token".to_owned(),
                refresh_token: Some("fresh-refresh-token".to_owned()),
                expires_in: Some(3600),
            }),
            missing_access_token: false,
            account: Some(ExternalAccount {
                id: "acct-1".to_owned(),
                name: "Acme Marketing".to_owned(),
                metadata: None,
            }),
            exchange_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn exchange_call_count(&self) -> u32 {
        *self.exchange_calls.lock().unwrap()
    }
}

impl OAuthConnector for MockConnector {
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        format!("https://provider.test/authorize?state={state}&redirect_uri={redirect_uri}")
    }

    async fn exchange_code(
        &self,
        _code: &str,
        _redirect_uri: &str,
    ) -> Result<TokenGrant, OAuthRejection> {
        *self.exchange_calls.lock().unwrap() += 1;
        if self.missing_access_token {
            return Err(OAuthRejection::MissingAccessToken);
        }
        self.grant
            .clone()
            .ok_or_else(|| OAuthRejection::ExchangeFailed("400 Bad Request: invalid code".to_owned()))
    }

    async fn resolve_account(
        &self,
        _access_token: &str,
    ) -> Result<ExternalAccount, OAuthRejection> {
        self.account
            .clone()
            .ok_or_else(|| OAuthRejection::AccountLookup("no account".to_owned()))
    }
}

// ── MockCampaignRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCampaignRepo {
    rows: Arc<Mutex<Vec<Campaign>>>,
}

impl MockCampaignRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<Campaign>>> {
        Arc::clone(&self.rows)
    }
}

impl CampaignRepository for MockCampaignRepo {
    async fn create(&self, campaign: &Campaign) -> Result<(), CampaignServiceError> {
        self.rows.lock().unwrap().push(campaign.clone());
        Ok(())
    }

    async fn find(
        &self,
        id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Campaign>, CampaignServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.client_id == client_id)
            .cloned())
    }

    async fn list(&self, client_id: Uuid) -> Result<Vec<Campaign>, CampaignServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn mark_sent(
        &self,
        id: Uuid,
        total: i32,
        successful: i32,
        failed: i32,
    ) -> Result<(), CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(c) = rows.iter_mut().find(|c| c.id == id) {
            c.status = CampaignStatus::Sent;
            c.total_recipients = total;
            c.successful = successful;
            c.failed = failed;
            c.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn revert_draft(&self, id: Uuid) -> Result<(), CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(c) = rows.iter_mut().find(|c| c.id == id) {
            c.status = CampaignStatus::Draft;
            c.successful = 0;
            c.failed = 0;
            c.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockPostRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPostRepo {
    rows: Arc<Mutex<Vec<Post>>>,
}

impl MockPostRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<Post>>> {
        Arc::clone(&self.rows)
    }
}

impl PostRepository for MockPostRepo {
    async fn create(&self, post: &Post) -> Result<(), CampaignServiceError> {
        self.rows.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid, client_id: Uuid) -> Result<Option<Post>, CampaignServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && p.client_id == client_id)
            .cloned())
    }

    async fn list(&self, client_id: Uuid) -> Result<Vec<Post>, CampaignServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn mark_published(
        &self,
        id: Uuid,
        external_id: &str,
    ) -> Result<(), CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(p) = rows.iter_mut().find(|p| p.id == id) {
            p.status = PostStatus::Published;
            p.external_id = Some(external_id.to_owned());
            p.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid) -> Result<(), CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(p) = rows.iter_mut().find(|p| p.id == id) {
            p.status = PostStatus::Failed;
            p.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockCredentialRepo ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCredentialRepo {
    rows: Arc<Mutex<Vec<Credential>>>,
}

impl MockCredentialRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(credential: Credential) -> Self {
        Self {
            rows: Arc::new(Mutex::new(vec![credential])),
        }
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<Credential>>> {
        Arc::clone(&self.rows)
    }
}

impl CredentialRepository for MockCredentialRepo {
    async fn upsert(&self, credential: &Credential) -> Result<(), CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|c| c.client_id == credential.client_id && c.platform == credential.platform)
        {
            Some(existing) => {
                existing.account_id = credential.account_id.clone();
                existing.account_name = credential.account_name.clone();
                existing.access_token = credential.access_token.clone();
                existing.refresh_token = credential.refresh_token.clone();
                existing.expires_at = credential.expires_at;
                existing.is_active = true;
                existing.metadata = credential.metadata.clone();
                existing.updated_at = Utc::now();
            }
            None => rows.push(credential.clone()),
        }
        Ok(())
    }

    async fn find_active(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<Option<Credential>, CampaignServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.client_id == client_id && c.platform == platform && c.is_active)
            .cloned())
    }

    async fn list_active(&self, client_id: Uuid) -> Result<Vec<Credential>, CampaignServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.client_id == client_id && c.is_active)
            .cloned()
            .collect())
    }

    async fn deactivate(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<bool, CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|c| c.client_id == client_id && c.platform == platform && c.is_active)
        {
            Some(c) => {
                c.is_active = false;
                c.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockStateStore ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockStateStore {
    states: Arc<Mutex<HashMap<String, OAuthState>>>,
}

impl MockStateStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.lock().unwrap().len()
    }
}

impl StateStore for MockStateStore {
    async fn put(&self, token: &str, state: &OAuthState) -> Result<(), CampaignServiceError> {
        self.states
            .lock()
            .unwrap()
            .insert(token.to_owned(), state.clone());
        Ok(())
    }

    async fn take(&self, token: &str) -> Result<Option<OAuthState>, CampaignServiceError> {
        Ok(self.states.lock().unwrap().remove(token))
    }
}

// ── MockJobLogRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockJobLogRepo {
    rows: Arc<Mutex<Vec<JobLog>>>,
}

impl MockJobLogRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<JobLog>>> {
        Arc::clone(&self.rows)
    }
}

impl JobLogRepository for MockJobLogRepo {
    async fn create(&self, job: &JobLog) -> Result<(), CampaignServiceError> {
        self.rows.lock().unwrap().push(job.clone());
        Ok(())
    }

    async fn mark_finished(
        &self,
        id: Uuid,
        status: JobStatus,
        detail: Option<&str>,
    ) -> Result<(), CampaignServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(job) = rows.iter_mut().find(|j| j.id == id) {
            job.status = status;
            job.detail = detail.map(str::to_owned);
            job.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockCopyGenerator ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCopyGenerator {
    /// `None` simulates a generator failure.
    pub response: Option<String>,
}

impl CopyGenerator for MockCopyGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, CampaignServiceError> {
        self.response
            .clone()
            .ok_or_else(|| CampaignServiceError::Internal(anyhow::anyhow!("generator unavailable")))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_client_id() -> Uuid {
    Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
}

pub fn test_user_id() -> Uuid {
    Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap()
}

pub fn sample_message() -> MessageContent {
    MessageContent::text(Some("Spring launch"), "Our spring line is live.")
}

pub fn sample_post_content() -> PostContent {
    PostContent {
        caption: "Launch day".to_owned(),
        link: None,
        media: vec![],
    }
}

pub fn test_credential(client_id: Uuid, platform: Platform) -> Credential {
    let now = Utc::now();
    Credential {
        id: Uuid::new_v4(),
        client_id,
        platform,
        account_id: "acct-1".to_owned(),
        account_name: "Acme Marketing".to_owned(),
        access_token: "stored-access-token".to_owned(),
        refresh_token: None,
        expires_at: None,
        is_active: true,
        metadata: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|t| t.to_string()).collect()
}
