//! Instagram business-account publisher and OAuth connector.
//!
//! Publishing is a two-step state machine: create a media container, then
//! publish it. The second step never runs if the first fails, and the
//! failure outcome carries the failing step's diagnostic.

use serde_json::json;
use url::Url;

use relaya_domain::content::PostContent;
use relaya_domain::outcome::PublishOutcome;

use crate::adapters::{
    GRAPH_BASE, OAuthConnector, SocialPublisher, grant_from_json, provider_error, transport_error,
};
use crate::config::OAuthApp;
use crate::domain::types::{Credential, ExternalAccount, TokenGrant};
use crate::error::OAuthRejection;

const DIALOG_URL: &str = "https://www.facebook.com/v19.0/dialog/oauth";
const SCOPES: &str = "instagram_basic,instagram_content_publish,pages_show_list";

pub struct InstagramAdapter {
    http: reqwest::Client,
    app: OAuthApp,
}

impl InstagramAdapter {
    pub fn new(http: reqwest::Client, app: OAuthApp) -> Self {
        Self { http, app }
    }

    /// Step result: the id field of a 2xx JSON response, or a diagnostic
    /// prefixed with the step name.
    async fn graph_post_id(
        &self,
        step: &str,
        url: String,
        token: &str,
        body: serde_json::Value,
    ) -> Result<String, String> {
        let result = self.http.post(&url).bearer_auth(token).json(&body).send().await;
        match result {
            Ok(resp) if resp.status().is_success() => resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_owned))
                .ok_or_else(|| format!("{step}: response missing id")),
            Ok(resp) => Err(format!("{step}: {}", provider_error(resp).await)),
            Err(e) => Err(format!("{step}: {}", transport_error(&e))),
        }
    }
}

impl SocialPublisher for InstagramAdapter {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome {
        let Some(image) = content.media.first() else {
            return PublishOutcome::rejected("instagram requires at least one image");
        };
        let token = &credential.access_token;
        let account = &credential.account_id;

        let container = match self
            .graph_post_id(
                "media container",
                format!("{GRAPH_BASE}/{account}/media"),
                token,
                json!({ "image_url": image, "caption": content.caption }),
            )
            .await
        {
            Ok(id) => id,
            Err(reason) => return PublishOutcome::rejected(reason),
        };

        match self
            .graph_post_id(
                "media publish",
                format!("{GRAPH_BASE}/{account}/media_publish"),
                token,
                json!({ "creation_id": container }),
            )
            .await
        {
            Ok(id) => PublishOutcome::published(id),
            Err(reason) => PublishOutcome::rejected(reason),
        }
    }
}

impl OAuthConnector for InstagramAdapter {
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        let mut url = Url::parse(DIALOG_URL).expect("static dialog url");
        url.query_pairs_mut()
            .append_pair("client_id", &self.app.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", SCOPES);
        url.into()
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, OAuthRejection> {
        let resp = self
            .http
            .get(format!("{GRAPH_BASE}/oauth/access_token"))
            .query(&[
                ("client_id", self.app.client_id.as_str()),
                ("client_secret", self.app.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("code", code),
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
        // The business account hangs off a managed Facebook page.
        let resp = self
            .http
            .get(format!("{GRAPH_BASE}/me/accounts"))
            .query(&[("fields", "instagram_business_account{id,username}")])
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

        let account = body
            .get("data")
            .and_then(|pages| pages.as_array())
            .and_then(|pages| {
                pages
                    .iter()
                    .find_map(|page| page.get("instagram_business_account"))
            })
            .ok_or_else(|| {
                OAuthRejection::AccountLookup("no instagram business account".to_owned())
            })?;

        let id = account
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| OAuthRejection::AccountLookup("account missing id".to_owned()))?;
        let name = account
            .get("username")
            .and_then(|v| v.as_str())
            .unwrap_or(id);

        Ok(ExternalAccount {
            id: id.to_owned(),
            name: name.to_owned(),
            metadata: None,
        })
    }
}
