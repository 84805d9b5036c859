//! Twitter/X post publisher and OAuth connector.

use serde_json::json;
use url::Url;

use relaya_domain::content::PostContent;
use relaya_domain::outcome::PublishOutcome;

use crate::adapters::{
    OAuthConnector, SocialPublisher, grant_from_json, provider_error, transport_error,
};
use crate::config::OAuthApp;
use crate::domain::types::{Credential, ExternalAccount, TokenGrant};
use crate::error::OAuthRejection;

const AUTHORIZE_URL: &str = "https://twitter.com/i/oauth2/authorize";
const TOKEN_URL: &str = "https://api.twitter.com/2/oauth2/token";
const API_BASE: &str = "https://api.twitter.com/2";
const SCOPES: &str = "tweet.read tweet.write users.read offline.access";

/// The token endpoint requires PKCE; a static plain verifier keeps the
/// callback stateless.
const PKCE_VERIFIER: &str = "challenge";

/// Hard platform cap on tweet text.
const MAX_TWEET_CHARS: usize = 280;

pub struct TwitterAdapter {
    http: reqwest::Client,
    app: OAuthApp,
}

/// Caption plus optional trailing link, silently cut to the platform cap.
fn tweet_text(caption: &str, link: Option<&str>) -> String {
    let full = match link {
        Some(link) => format!("{caption} {link}"),
        None => caption.to_owned(),
    };
    if full.chars().count() <= MAX_TWEET_CHARS {
        full
    } else {
        full.chars().take(MAX_TWEET_CHARS).collect()
    }
}

impl TwitterAdapter {
    pub fn new(http: reqwest::Client, app: OAuthApp) -> Self {
        Self { http, app }
    }
}

impl SocialPublisher for TwitterAdapter {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome {
        let text = tweet_text(&content.caption, content.link.as_deref());

        let result = self
            .http
            .post(format!("{API_BASE}/tweets"))
            .bearer_auth(&credential.access_token)
            .json(&json!({ "text": text }))
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                let id = resp.json::<serde_json::Value>().await.ok().and_then(|v| {
                    v.pointer("/data/id")
                        .and_then(|id| id.as_str())
                        .map(str::to_owned)
                });
                match id {
                    Some(id) => PublishOutcome::published(id),
                    None => PublishOutcome::rejected("response missing tweet id"),
                }
            }
            Ok(resp) => PublishOutcome::rejected(provider_error(resp).await),
            Err(e) => PublishOutcome::rejected(transport_error(&e)),
        }
    }
}

impl OAuthConnector for TwitterAdapter {
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        let mut url = Url::parse(AUTHORIZE_URL).expect("static authorize url");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.app.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", SCOPES)
            .append_pair("code_challenge", PKCE_VERIFIER)
            .append_pair("code_challenge_method", "plain");
        url.into()
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, OAuthRejection> {
        let resp = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.app.client_id, Some(&self.app.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("code_verifier", PKCE_VERIFIER),
            ])
            .send()
            .await
            .map_err(|e| OAuthRejection::ExchangeFailed(transport_error(&e)))?;

        if !resp.status().is_success() {
            return Err(OAuthRejection::ExchangeFailed(provider_error(resp).await));
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| OAuthRejection::ExchangeFailed(e.to_string()))?;
        grant_from_json(&body)
    }

    async fn resolve_account(
        &self,
        access_token: &str,
    ) -> Result<ExternalAccount, OAuthRejection> {
        let resp = self
            .http
            .get(format!("{API_BASE}/users/me"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthRejection::AccountLookup(transport_error(&e)))?;

        if !resp.status().is_success() {
            return Err(OAuthRejection::AccountLookup(provider_error(resp).await));
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| OAuthRejection::AccountLookup(e.to_string()))?;

        let id = body
            .pointer("/data/id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| OAuthRejection::AccountLookup("response missing user id".to_owned()))?;
        let name = body
            .pointer("/data/username")
            .and_then(|v| v.as_str())
            .unwrap_or(id);

        Ok(ExternalAccount {
            id: id.to_owned(),
            name: name.to_owned(),
            metadata: None,
        })
    }
}
