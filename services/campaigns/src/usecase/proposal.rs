use uuid::Uuid;

use relaya_domain::content::MessageContent;

use crate::adapters::MessageAdapter;
use crate::domain::repository::{CopyGenerator, JobLogRepository};
use crate::domain::types::JobStatus;
use crate::error::CampaignServiceError;

const FALLBACK_SUBJECT: &str = "Marketing proposal";

pub struct ProposalInput {
    pub recipient: String,
    pub brief: String,
}

/// Interpret generated copy. The generator is asked for JSON with
/// `subject` and `body` fields, but it is a black box and may answer with
/// anything — malformed output falls back to using the raw text as the
/// body rather than failing the job.
fn parse_copy(text: &str) -> (String, String) {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        if let Some(body) = value.get("body").and_then(|b| b.as_str()) {
            let subject = value
                .get("subject")
                .and_then(|s| s.as_str())
                .unwrap_or(FALLBACK_SUBJECT);
            return (subject.to_owned(), body.to_owned());
        }
    }
    (FALLBACK_SUBJECT.to_owned(), text.to_owned())
}

/// Generate proposal copy and email it to one recipient.
///
/// Runs inside a fire-and-forget task after the request has already
/// answered 202: this usecase writes the job's terminal status itself —
/// `sent`, or `failed` with the failure detail — instead of returning an
/// outcome to a caller that is no longer waiting.
pub struct SendProposalUseCase<G, A, J>
where
    G: CopyGenerator,
    A: MessageAdapter,
    J: JobLogRepository,
{
    pub generator: G,
    pub mailer: A,
    pub jobs: J,
}

impl<G, A, J> SendProposalUseCase<G, A, J>
where
    G: CopyGenerator,
    A: MessageAdapter,
    J: JobLogRepository,
{
    pub async fn execute(
        &self,
        job_id: Uuid,
        input: ProposalInput,
    ) -> Result<JobStatus, CampaignServiceError> {
        if !self.mailer.validate_target(&input.recipient) {
            self.jobs
                .mark_finished(job_id, JobStatus::Failed, Some("invalid recipient address"))
                .await?;
            return Ok(JobStatus::Failed);
        }

        let prompt = format!(
            "Write a short marketing proposal email for the brief below. \
             Answer as JSON with \"subject\" and \"body\" string fields.\n\n{}",
            input.brief
        );

        let text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                self.jobs
                    .mark_finished(job_id, JobStatus::Failed, Some(&e.to_string()))
                    .await?;
                return Ok(JobStatus::Failed);
            }
        };

        let (subject, body) = parse_copy(&text);
        let outcome = self
            .mailer
            .send(
                &input.recipient,
                &MessageContent::Text {
                    subject: Some(subject),
                    body,
                },
            )
            .await;

        let status = if outcome.success {
            self.jobs
                .mark_finished(job_id, JobStatus::Sent, None)
                .await?;
            JobStatus::Sent
        } else {
            self.jobs
                .mark_finished(job_id, JobStatus::Failed, outcome.reason.as_deref())
                .await?;
            JobStatus::Failed
        };
        Ok(status)
    }
}
