//! Pinterest pin publisher and OAuth connector.
//!
//! Pins land on the account's first board, discovered at publish time —
//! board discovery then pin create, aborting on the first failing step.

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

const AUTHORIZE_URL: &str = "https://www.pinterest.com/oauth/";
const TOKEN_URL: &str = "https://api.pinterest.com/v5/oauth/token";
const API_BASE: &str = "https://api.pinterest.com/v5";
const SCOPES: &str = "boards:read,pins:create,user_accounts:read";

pub struct PinterestAdapter {
    http: reqwest::Client,
    app: OAuthApp,
}

impl PinterestAdapter {
    pub fn new(http: reqwest::Client, app: OAuthApp) -> Self {
        Self { http, app }
    }

    async fn first_board(&self, token: &str) -> Result<String, String> {
        let result = self
            .http
            .get(format!("{API_BASE}/boards"))
            .query(&[("page_size", "1")])
            .bearer_auth(token)
            .send()
            .await;
        match result {
            Ok(resp) if resp.status().is_success() => resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| {
                    v.pointer("/items/0/id")
                        .and_then(|id| id.as_str())
                        .map(str::to_owned)
                })
                .ok_or_else(|| "board discovery: no boards available".to_owned()),
            Ok(resp) => Err(format!("board discovery: {}", provider_error(resp).await)),
            Err(e) => Err(format!("board discovery: {}", transport_error(&e))),
        }
    }
}

impl SocialPublisher for PinterestAdapter {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome {
        let Some(image) = content.media.first() else {
            return PublishOutcome::rejected("pinterest requires an image");
        };

        let board_id = match self.first_board(&credential.access_token).await {
            Ok(id) => id,
            Err(reason) => return PublishOutcome::rejected(reason),
        };

        let mut body = json!({
            "board_id": board_id,
            "description": content.caption,
            "media_source": { "source_type": "image_url", "url": image },
        });
        if let Some(link) = &content.link {
            body["link"] = json!(link);
        }

        let result = self
            .http
            .post(format!("{API_BASE}/pins"))
            .bearer_auth(&credential.access_token)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                let id = resp
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_owned));
                match id {
                    Some(id) => PublishOutcome::published(id),
                    None => PublishOutcome::rejected("response missing pin id"),
                }
            }
            Ok(resp) => PublishOutcome::rejected(provider_error(resp).await),
            Err(e) => PublishOutcome::rejected(transport_error(&e)),
        }
    }
}

impl OAuthConnector for PinterestAdapter {
    fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        let mut url = Url::parse(AUTHORIZE_URL).expect("static authorize url");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
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
            .post(TOKEN_URL)
            .basic_auth(&self.app.client_id, Some(&self.app.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
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
            .get(format!("{API_BASE}/user_account"))
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

        let username = body
            .get("username")
            .and_then(|v| v.as_str())
            .ok_or_else(|| OAuthRejection::AccountLookup("response missing username".to_owned()))?;

        Ok(ExternalAccount {
            id: username.to_owned(),
            name: username.to_owned(),
            metadata: None,
        })
    }
}
