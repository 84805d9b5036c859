//! Mailchimp Transactional (Mandrill) email adapter.

use serde_json::json;

use relaya_domain::content::MessageContent;
use relaya_domain::outcome::TargetOutcome;

use crate::adapters::{MessageAdapter, provider_error, transport_error};
use crate::config::MailchimpConfig;

const SEND_URL: &str = "https://mandrillapp.com/api/1.0/messages/send";

const DEFAULT_SUBJECT: &str = "A message from your marketing team";

pub struct EmailAdapter {
    http: reqwest::Client,
    config: MailchimpConfig,
}

impl EmailAdapter {
    pub fn new(http: reqwest::Client, config: MailchimpConfig) -> Self {
        Self { http, config }
    }
}

/// Loose RFC shape check: one '@', nonempty local part, dotted domain.
fn valid_email(target: &str) -> bool {
    let Some((local, domain)) = target.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !target.contains(char::is_whitespace)
}

impl MessageAdapter for EmailAdapter {
    fn validate_target(&self, target: &str) -> bool {
        valid_email(target)
    }

    async fn send(&self, target: &str, content: &MessageContent) -> TargetOutcome {
        let (subject, body) = match content {
            MessageContent::Text { subject, body } => (
                subject.clone().unwrap_or_else(|| DEFAULT_SUBJECT.to_owned()),
                body.clone(),
            ),
            // Template sends are a WhatsApp concept; the email channel only
            // carries free text.
            MessageContent::Template { .. } => {
                return TargetOutcome::rejected(target, "template content not supported for email");
            }
        };

        let payload = json!({
            "key": self.config.api_key,
            "message": {
                "from_email": self.config.from_email,
                "to": [{ "email": target }],
                "subject": subject,
                "text": body,
            },
        });

        let result = self.http.post(SEND_URL).json(&payload).send().await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                // Mandrill answers 200 with a per-recipient status array;
                // "rejected"/"invalid" entries are failures despite the 2xx.
                match resp.json::<serde_json::Value>().await {
                    Ok(results) => {
                        let entry = &results[0];
                        match entry["status"].as_str() {
                            Some("sent") | Some("queued") | Some("scheduled") => {
                                let id = entry["_id"].as_str().map(str::to_owned);
                                TargetOutcome::delivered(target, id)
                            }
                            other => {
                                let reason = entry["reject_reason"]
                                    .as_str()
                                    .map(str::to_owned)
                                    .unwrap_or_else(|| {
                                        format!("status {}", other.unwrap_or("unknown"))
                                    });
                                TargetOutcome::rejected(target, reason)
                            }
                        }
                    }
                    Err(e) => TargetOutcome::rejected(target, format!("unreadable response: {e}")),
                }
            }
            Ok(resp) => TargetOutcome::rejected(target, provider_error(resp).await),
            Err(e) => TargetOutcome::rejected(target, transport_error(&e)),
        }
    }
}
