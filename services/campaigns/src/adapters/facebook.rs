//! Facebook page publisher and OAuth connector.

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
const SCOPES: &str = "pages_manage_posts,pages_read_engagement,pages_show_list";

pub struct FacebookAdapter {
    http: reqwest::Client,
    app: OAuthApp,
}

impl FacebookAdapter {
    pub fn new(http: reqwest::Client, app: OAuthApp) -> Self {
        Self { http, app }
    }

    /// Pages are published with the page's own token when `/me/accounts`
    /// supplied one; the user token is the fallback.
    fn page_token<'a>(credential: &'a Credential) -> &'a str {
        credential
            .metadata
            .as_ref()
            .and_then(|m| m.get("page_token"))
            .and_then(|t| t.as_str())
            .unwrap_or(&credential.access_token)
    }
}

impl SocialPublisher for FacebookAdapter {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome {
        let token = Self::page_token(credential);

        // Photo posts and plain feed posts are different endpoints.
        let (url, body) = match content.media.first() {
            Some(image) => (
                format!("{GRAPH_BASE}/{}/photos", credential.account_id),
                json!({ "url": image, "caption": content.caption }),
            ),
            None => {
                let mut body = json!({ "message": content.caption });
                if let Some(link) = &content.link {
                    body["link"] = json!(link);
                }
                (format!("{GRAPH_BASE}/{}/feed", credential.account_id), body)
            }
        };

        let result = self.http.post(&url).bearer_auth(token).json(&body).send().await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                let id = resp.json::<serde_json::Value>().await.ok().and_then(|v| {
                    v.get("post_id")
                        .or_else(|| v.get("id"))
                        .and_then(|id| id.as_str())
                        .map(str::to_owned)
                });
                match id {
                    Some(id) => PublishOutcome::published(id),
                    None => PublishOutcome::rejected("response missing post id"),
                }
            }
            Ok(resp) => PublishOutcome::rejected(provider_error(resp).await),
            Err(e) => PublishOutcome::rejected(transport_error(&e)),
        }
    }
}

impl OAuthConnector for FacebookAdapter {
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
        let resp = self
            .http
            .get(format!("{GRAPH_BASE}/me/accounts"))
            .query(&[("fields", "id,name,access_token")])
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

        let page = body
            .pointer("/data/0")
            .ok_or_else(|| OAuthRejection::AccountLookup("no managed pages".to_owned()))?;
        let id = page
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| OAuthRejection::AccountLookup("page missing id".to_owned()))?;
        let name = page
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(id)
            .to_owned();
        let metadata = page
            .get("access_token")
            .and_then(|v| v.as_str())
            .map(|t| json!({ "page_token": t }));

        Ok(ExternalAccount {
            id: id.to_owned(),
            name,
            metadata,
        })
    }
}
