//! HTTP copy-generation client.

use anyhow::anyhow;
use serde_json::json;

use crate::config::AiConfig;
use crate::domain::repository::CopyGenerator;
use crate::error::CampaignServiceError;

/// Calls an env-configured completion endpoint. The endpoint is a black
/// box: callers (see `usecase/proposal.rs`) must tolerate whatever text
/// comes back, including malformed JSON.
pub struct HttpCopyGenerator {
    http: reqwest::Client,
    config: AiConfig,
}

impl HttpCopyGenerator {
    pub fn new(http: reqwest::Client, config: AiConfig) -> Self {
        Self { http, config }
    }
}

impl CopyGenerator for HttpCopyGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CampaignServiceError> {
        let resp = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| CampaignServiceError::Internal(anyhow!("copy generation: {e}")))?;

        if !resp.status().is_success() {
            return Err(CampaignServiceError::Internal(anyhow!(
                "copy generation: HTTP {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CampaignServiceError::Internal(anyhow!("copy generation: {e}")))?;

        // Completion endpoints commonly wrap the text in {"output": "..."};
        // anything else is passed through as-is.
        let text = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("output")
                    .and_then(|o| o.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or(body);
        Ok(text)
    }
}
