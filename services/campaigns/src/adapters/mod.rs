#![allow(async_fn_in_trait)]

//! Platform adapters.
//!
//! One adapter per external platform. Each owns its platform's wire shapes
//! and converts every expected platform rejection *and* transport error into
//! a failure outcome at its boundary — callers never see platform-specific
//! errors. OAuth rejections are the one exception: connect flows surface
//! them as [`OAuthRejection`] so the coordinator can reject the flow.

pub mod email;
pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod pinterest;
pub mod twitter;
pub mod whatsapp;

use relaya_domain::content::{MessageContent, PostContent};
use relaya_domain::outcome::{PublishOutcome, TargetOutcome};
use relaya_domain::platform::Platform;

use crate::config::Config;
use crate::domain::types::{Credential, ExternalAccount, TokenGrant};
use crate::error::OAuthRejection;

pub use email::EmailAdapter;
pub use facebook::FacebookAdapter;
pub use instagram::InstagramAdapter;
pub use linkedin::LinkedInAdapter;
pub use pinterest::PinterestAdapter;
pub use twitter::TwitterAdapter;
pub use whatsapp::WhatsAppAdapter;

/// Graph API base shared by the WhatsApp, Facebook, and Instagram adapters.
pub(crate) const GRAPH_BASE: &str = "https://graph.facebook.com/v19.0";

// ── Port traits ──────────────────────────────────────────────────────────────

/// Bulk-messaging adapter (WhatsApp, email).
pub trait MessageAdapter: Send + Sync {
    /// Shape check applied before dispatch. Targets failing it are excluded
    /// up front and never count as failures.
    fn validate_target(&self, target: &str) -> bool;

    /// Send to one target. Infallible by design: rejections and transport
    /// errors come back as failure outcomes, never as errors.
    async fn send(&self, target: &str, content: &MessageContent) -> TargetOutcome;
}

impl<A: MessageAdapter> MessageAdapter for &A {
    fn validate_target(&self, target: &str) -> bool {
        (**self).validate_target(target)
    }

    async fn send(&self, target: &str, content: &MessageContent) -> TargetOutcome {
        (**self).send(target, content).await
    }
}

/// Single-post publisher for a connected social account.
pub trait SocialPublisher: Send + Sync {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome;
}

/// OAuth capability set for a connectable platform.
pub trait OAuthConnector: Send + Sync {
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String;

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, OAuthRejection>;

    /// Whoami lookup with a fresh access token. Failure is terminal for the
    /// connect flow — no credential is stored without a resolvable account.
    async fn resolve_account(&self, access_token: &str)
    -> Result<ExternalAccount, OAuthRejection>;
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Social publisher registry keyed by [`Platform`].
pub enum Publisher {
    Facebook(FacebookAdapter),
    Instagram(InstagramAdapter),
    Linkedin(LinkedInAdapter),
    Twitter(TwitterAdapter),
    Pinterest(PinterestAdapter),
}

impl Publisher {
    pub fn for_platform(platform: Platform, http: reqwest::Client, config: &Config) -> Self {
        match platform {
            Platform::Facebook => Self::Facebook(FacebookAdapter::new(http, config.meta.clone())),
            Platform::Instagram => {
                Self::Instagram(InstagramAdapter::new(http, config.meta.clone()))
            }
            Platform::Linkedin => {
                Self::Linkedin(LinkedInAdapter::new(http, config.linkedin.clone()))
            }
            Platform::Twitter => Self::Twitter(TwitterAdapter::new(http, config.twitter.clone())),
            Platform::Pinterest => {
                Self::Pinterest(PinterestAdapter::new(http, config.pinterest.clone()))
            }
        }
    }
}

impl SocialPublisher for Publisher {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome {
        match self {
            Self::Facebook(a) => a.publish(credential, content).await,
            Self::Instagram(a) => a.publish(credential, content).await,
            Self::Linkedin(a) => a.publish(credential, content).await,
            Self::Twitter(a) => a.publish(credential, content).await,
            Self::Pinterest(a) => a.publish(credential, content).await,
        }
    }
}

/// OAuth connector registry keyed by [`Platform`].
pub enum Connector {
    Facebook(FacebookAdapter),
    Instagram(InstagramAdapter),
    Linkedin(LinkedInAdapter),
    Twitter(TwitterAdapter),
    Pinterest(PinterestAdapter),
}

impl Connector {
    pub fn for_platform(platform: Platform, http: reqwest::Client, config: &Config) -> Self {
        match platform {
            Platform::Facebook => Self::Facebook(FacebookAdapter::new(http, config.meta.clone())),
            Platform::Instagram => {
                Self::Instagram(InstagramAdapter::new(http, config.meta.clone()))
            }
            Platform::Linkedin => {
                Self::Linkedin(LinkedInAdapter::new(http, config.linkedin.clone()))
            }
            Platform::Twitter => Self::Twitter(TwitterAdapter::new(http, config.twitter.clone())),
            Platform::Pinterest => {
                Self::Pinterest(PinterestAdapter::new(http, config.pinterest.clone()))
            }
        }
    }
}

impl OAuthConnector for Connector {
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        match self {
            Self::Facebook(a) => a.authorize_url(state, redirect_uri),
            Self::Instagram(a) => a.authorize_url(state, redirect_uri),
            Self::Linkedin(a) => a.authorize_url(state, redirect_uri),
            Self::Twitter(a) => a.authorize_url(state, redirect_uri),
            Self::Pinterest(a) => a.authorize_url(state, redirect_uri),
        }
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, OAuthRejection> {
        match self {
            Self::Facebook(a) => a.exchange_code(code, redirect_uri).await,
            Self::Instagram(a) => a.exchange_code(code, redirect_uri).await,
            Self::Linkedin(a) => a.exchange_code(code, redirect_uri).await,
            Self::Twitter(a) => a.exchange_code(code, redirect_uri).await,
            Self::Pinterest(a) => a.exchange_code(code, redirect_uri).await,
        }
    }

    async fn resolve_account(
        &self,
        access_token: &str,
    ) -> Result<ExternalAccount, OAuthRejection> {
        match self {
            Self::Facebook(a) => a.resolve_account(access_token).await,
            Self::Instagram(a) => a.resolve_account(access_token).await,
            Self::Linkedin(a) => a.resolve_account(access_token).await,
            Self::Twitter(a) => a.resolve_account(access_token).await,
            Self::Pinterest(a) => a.resolve_account(access_token).await,
        }
    }
}

// ── Shared response mapping ──────────────────────────────────────────────────

/// Render a non-2xx provider response as a failure diagnostic, preserving
/// the provider's own message where one can be found.
pub(crate) async fn provider_error(resp: reqwest::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["/error/message", "/message", "/detail", "/error_description"]
                .iter()
                .find_map(|p| v.pointer(p))
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or(body);
    format!("{status}: {message}")
}

/// Render a reqwest transport error (timeout, DNS, reset) as a failure
/// diagnostic. Timeouts are ordinary failures, not a special case.
pub(crate) fn transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_owned()
    } else {
        format!("transport error: {e}")
    }
}

/// Normalize a token-endpoint JSON body into a [`TokenGrant`].
pub(crate) fn grant_from_json(v: &serde_json::Value) -> Result<TokenGrant, OAuthRejection> {
    let access_token = v
        .get("access_token")
        .and_then(|t| t.as_str())
        .ok_or(OAuthRejection::MissingAccessToken)?;
    Ok(TokenGrant {
        access_token: access_token.to_owned(),
        refresh_token: v
            .get("refresh_token")
            .and_then(|t| t.as_str())
            .map(str::to_owned),
        expires_in: v.get("expires_in").and_then(|e| e.as_i64()),
    })
}
