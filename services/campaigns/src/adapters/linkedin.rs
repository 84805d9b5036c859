//! LinkedIn member-post publisher and OAuth connector.
//!
//! Image posts run a three-step chain per image — register the upload, PUT
//! the binary, reference the asset — and a final ugcPosts create. Any
//! step's failure aborts the rest and surfaces that step's diagnostic.

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

const AUTHORIZE_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
const TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
const API_BASE: &str = "https://api.linkedin.com/v2";
const SCOPES: &str = "openid profile w_member_social";

/// LinkedIn caps multi-image shares at nine images; extras are dropped
/// silently before any upload starts.
const MAX_IMAGES: usize = 9;

pub struct LinkedInAdapter {
    http: reqwest::Client,
    app: OAuthApp,
}

/// First `MAX_IMAGES` entries, silently dropping the rest.
fn capped_media(media: &[String]) -> &[String] {
    &media[..media.len().min(MAX_IMAGES)]
}

impl LinkedInAdapter {
    pub fn new(http: reqwest::Client, app: OAuthApp) -> Self {
        Self { http, app }
    }

    /// Register an upload slot, fetch the image, PUT the bytes. Returns the
    /// asset URN for the post payload.
    async fn upload_image(
        &self,
        token: &str,
        author: &str,
        image_url: &str,
    ) -> Result<String, String> {
        let register = self
            .http
            .post(format!("{API_BASE}/assets?action=registerUpload"))
            .bearer_auth(token)
            .json(&json!({
                "registerUploadRequest": {
                    "recipes": ["urn:li:digitalmediaRecipe:feedshare-image"],
                    "owner": author,
                    "serviceRelationships": [{
                        "relationshipType": "OWNER",
                        "identifier": "urn:li:userGeneratedContent",
                    }],
                },
            }))
            .send()
            .await
            .map_err(|e| format!("register upload: {}", transport_error(&e)))?;
        if !register.status().is_success() {
            return Err(format!("register upload: {}", provider_error(register).await));
        }
        let body: serde_json::Value = register
            .json()
            .await
            .map_err(|e| format!("register upload: {e}"))?;
        let upload_url = body
            .pointer("/value/uploadMechanism/com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest/uploadUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "register upload: response missing uploadUrl".to_owned())?
            .to_owned();
        let asset = body
            .pointer("/value/asset")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "register upload: response missing asset".to_owned())?
            .to_owned();

        let image = self
            .http
            .get(image_url)
            .send()
            .await
            .map_err(|e| format!("fetch image: {}", transport_error(&e)))?;
        if !image.status().is_success() {
            return Err(format!("fetch image: {}", provider_error(image).await));
        }
        let bytes = image
            .bytes()
            .await
            .map_err(|e| format!("fetch image: {e}"))?;

        let put = self
            .http
            .put(&upload_url)
            .bearer_auth(token)
            .body(bytes)
            .send()
            .await
            .map_err(|e| format!("upload binary: {}", transport_error(&e)))?;
        if !put.status().is_success() {
            return Err(format!("upload binary: {}", provider_error(put).await));
        }

        Ok(asset)
    }
}

impl SocialPublisher for LinkedInAdapter {
    async fn publish(&self, credential: &Credential, content: &PostContent) -> PublishOutcome {
        let token = &credential.access_token;
        let author = format!("urn:li:person:{}", credential.account_id);

        let mut assets = Vec::new();
        for image_url in capped_media(&content.media) {
            match self.upload_image(token, &author, image_url).await {
                Ok(asset) => assets.push(asset),
                Err(reason) => return PublishOutcome::rejected(reason),
            }
        }

        let share_content = if assets.is_empty() {
            json!({
                "shareCommentary": { "text": content.caption },
                "shareMediaCategory": "NONE",
            })
        } else {
            json!({
                "shareCommentary": { "text": content.caption },
                "shareMediaCategory": "IMAGE",
                "media": assets
                    .iter()
                    .map(|asset| json!({ "status": "READY", "media": asset }))
                    .collect::<Vec<_>>(),
            })
        };

        let result = self
            .http
            .post(format!("{API_BASE}/ugcPosts"))
            .bearer_auth(token)
            .json(&json!({
                "author": author,
                "lifecycleState": "PUBLISHED",
                "specificContent": { "com.linkedin.ugc.ShareContent": share_content },
                "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" },
            }))
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                // The post URN comes back in the x-restli-id header.
                let id = resp
                    .headers()
                    .get("x-restli-id")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
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

impl OAuthConnector for LinkedInAdapter {
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
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", self.app.client_id.as_str()),
                ("client_secret", self.app.client_secret.as_str()),
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
            .get(format!("{API_BASE}/userinfo"))
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
            .get("sub")
            .and_then(|v| v.as_str())
            .ok_or_else(|| OAuthRejection::AccountLookup("userinfo missing sub".to_owned()))?;
        let name = body.get("name").and_then(|v| v.as_str()).unwrap_or(id);

        Ok(ExternalAccount {
            id: id.to_owned(),
            name: name.to_owned(),
            metadata: None,
        })
    }
}
