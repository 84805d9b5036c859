//! WhatsApp Business Cloud API adapter.

use serde_json::json;

use relaya_domain::content::MessageContent;
use relaya_domain::outcome::TargetOutcome;

use crate::adapters::{GRAPH_BASE, MessageAdapter, provider_error, transport_error};
use crate::config::WhatsAppConfig;

pub struct WhatsAppAdapter {
    http: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppAdapter {
    pub fn new(http: reqwest::Client, config: WhatsAppConfig) -> Self {
        Self { http, config }
    }
}

/// E.164-shaped: optional leading '+', then 8–15 digits.
fn valid_phone(target: &str) -> bool {
    let digits = target.strip_prefix('+').unwrap_or(target);
    (8..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

fn message_body(target: &str, content: &MessageContent) -> serde_json::Value {
    match content {
        MessageContent::Template {
            name,
            language,
            params,
        } => {
            let mut template = json!({
                "name": name,
                "language": { "code": language },
            });
            if !params.is_empty() {
                template["components"] = json!([{
                    "type": "body",
                    "parameters": params
                        .iter()
                        .map(|p| json!({ "type": "text", "text": p }))
                        .collect::<Vec<_>>(),
                }]);
            }
            json!({
                "messaging_product": "whatsapp",
                "to": target,
                "type": "template",
                "template": template,
            })
        }
        MessageContent::Text { body, .. } => json!({
            "messaging_product": "whatsapp",
            "to": target,
            "type": "text",
            "text": { "body": body },
        }),
    }
}

impl MessageAdapter for WhatsAppAdapter {
    fn validate_target(&self, target: &str) -> bool {
        valid_phone(target)
    }

    async fn send(&self, target: &str, content: &MessageContent) -> TargetOutcome {
        let url = format!("{GRAPH_BASE}/{}/messages", self.config.phone_number_id);
        let result = self
            .http
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&message_body(target, content))
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                let message_id = resp.json::<serde_json::Value>().await.ok().and_then(|v| {
                    v.pointer("/messages/0/id")
                        .and_then(|id| id.as_str())
                        .map(str::to_owned)
                });
                TargetOutcome::delivered(target, message_id)
            }
            Ok(resp) => TargetOutcome::rejected(target, provider_error(resp).await),
            Err(e) => TargetOutcome::rejected(target, transport_error(&e)),
        }
    }
}
