use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relaya_domain::content::{MessageContent, PostContent};
use relaya_domain::platform::{Channel, Platform};

/// A bulk WhatsApp or email campaign.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: Uuid,
    pub client_id: Uuid,
    pub created_by: Uuid,
    pub channel: Channel,
    pub content: MessageContent,
    pub targets: Vec<String>,
    pub schedule_type: ScheduleType,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
    pub total_recipients: i32,
    pub successful: i32,
    pub failed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single social-media post.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub client_id: Uuid,
    pub created_by: Uuid,
    pub platform: Platform,
    pub content: PostContent,
    pub schedule_type: ScheduleType,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored OAuth connection for one (client, platform) pair.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: Uuid,
    pub client_id: Uuid,
    pub platform: Platform,
    pub account_id: String,
    pub account_name: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pending OAuth flow bound to one state token. Serialized into the
/// TTL-bounded state store; consumed exactly once on callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthState {
    pub platform: Platform,
    pub client_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Token endpoint response, normalized across providers.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, when the provider reports one.
    pub expires_in: Option<i64>,
}

/// Stable external identity resolved from a platform's whoami endpoint.
#[derive(Debug, Clone)]
pub struct ExternalAccount {
    pub id: String,
    pub name: String,
    /// Provider-specific extras kept alongside the credential (e.g. the
    /// Facebook page token).
    pub metadata: Option<serde_json::Value>,
}

/// Terminal record of a fire-and-forget background job.
#[derive(Debug, Clone)]
pub struct JobLog {
    pub id: Uuid,
    pub kind: String,
    pub status: JobStatus,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Status enums ─────────────────────────────────────────────────────────────

/// Error returned when a persisted enum column holds an unknown value.
#[derive(Debug, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownValue(pub String);

/// Campaign lifecycle. No failure variant on purpose: a fully failed
/// dispatch reverts the campaign to `Draft` for editing and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sent,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Sent => "sent",
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "sent" => Ok(Self::Sent),
            other => Err(UnknownValue(other.to_owned())),
        }
    }
}

/// Post lifecycle. Posts do carry a terminal `Failed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PostStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "published" => Ok(Self::Published),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownValue(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Immediate,
    Scheduled,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Scheduled => "scheduled",
        }
    }
}

impl FromStr for ScheduleType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "immediate" => Ok(Self::Immediate),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(UnknownValue(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Sent,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for JobStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownValue(other.to_owned())),
        }
    }
}

// ── Constants ────────────────────────────────────────────────────────────────

/// OAuth state token length in characters.
pub const STATE_TOKEN_LEN: usize = 32;

/// OAuth state time-to-live in seconds. Abandoned flows expire instead of
/// accumulating.
pub const STATE_TTL_SECS: u64 = 600;
