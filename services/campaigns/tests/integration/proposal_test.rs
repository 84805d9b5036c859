use chrono::Utc;
use uuid::Uuid;

use relaya_campaigns::domain::repository::JobLogRepository;
use relaya_campaigns::domain::types::{JobLog, JobStatus};
use relaya_campaigns::usecase::proposal::{ProposalInput, SendProposalUseCase};
use relaya_domain::content::MessageContent;

use crate::helpers::{MockCopyGenerator, MockJobLogRepo, MockMessageAdapter};

async fn queued_job(repo: &MockJobLogRepo) -> Uuid {
    let now = Utc::now();
    let job = JobLog {
        id: Uuid::new_v4(),
        kind: "proposal_email".to_owned(),
        status: JobStatus::Queued,
        detail: None,
        created_at: now,
        updated_at: now,
    };
    repo.create(&job).await.unwrap();
    job.id
}

fn input() -> ProposalInput {
    ProposalInput {
        recipient: "ana@example.com".to_owned(),
        brief: "Expand into the Nordic market".to_owned(),
    }
}

#[tokio::test]
async fn should_email_generated_copy_and_mark_job_sent() {
    let jobs = MockJobLogRepo::empty();
    let job_id = queued_job(&jobs).await;
    let rows = jobs.rows_handle();
    let mailer = MockMessageAdapter::new();
    let calls = mailer.calls_handle();

    let status = SendProposalUseCase {
        generator: MockCopyGenerator {
            response: Some(r#"{"subject":"Nordic expansion","body":"Here is our plan."}"#.to_owned()),
        },
        mailer,
        jobs,
    }
    .execute(job_id, input())
    .await
    .unwrap();

    assert_eq!(status, JobStatus::Sent);
    assert_eq!(rows.lock().unwrap()[0].status, JobStatus::Sent);

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, "ana@example.com");
    match &calls[0].1 {
        MessageContent::Text { subject, body } => {
            assert_eq!(subject.as_deref(), Some("Nordic expansion"));
            assert_eq!(body, "Here is our plan.");
        }
        other => panic!("expected text content, got {other:?}"),
    }
}

#[tokio::test]
async fn should_fall_back_to_raw_text_when_copy_is_not_json() {
    let jobs = MockJobLogRepo::empty();
    let job_id = queued_job(&jobs).await;
    let mailer = MockMessageAdapter::new();
    let calls = mailer.calls_handle();

    let status = SendProposalUseCase {
        generator: MockCopyGenerator {
            response: Some("Sure, here's a proposal draft...".to_owned()),
        },
        mailer,
        jobs,
    }
    .execute(job_id, input())
    .await
    .unwrap();

    assert_eq!(status, JobStatus::Sent);
    let calls = calls.lock().unwrap();
    match &calls[0].1 {
        MessageContent::Text { body, .. } => {
            assert_eq!(body, "Sure, here's a proposal draft...");
        }
        other => panic!("expected text content, got {other:?}"),
    }
}

#[tokio::test]
async fn should_mark_job_failed_when_generator_errors() {
    let jobs = MockJobLogRepo::empty();
    let job_id = queued_job(&jobs).await;
    let rows = jobs.rows_handle();
    let mailer = MockMessageAdapter::new();
    let calls = mailer.calls_handle();

    let status = SendProposalUseCase {
        generator: MockCopyGenerator { response: None },
        mailer,
        jobs,
    }
    .execute(job_id, input())
    .await
    .unwrap();

    assert_eq!(status, JobStatus::Failed);
    let rows = rows.lock().unwrap();
    assert_eq!(rows[0].status, JobStatus::Failed);
    assert!(rows[0].detail.is_some());
    // No email goes out without copy.
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_mark_job_failed_when_send_is_rejected() {
    let jobs = MockJobLogRepo::empty();
    let job_id = queued_job(&jobs).await;
    let rows = jobs.rows_handle();

    let status = SendProposalUseCase {
        generator: MockCopyGenerator {
            response: Some("plain copy".to_owned()),
        },
        mailer: MockMessageAdapter::new().with_failing(&["ana@example.com"]),
        jobs,
    }
    .execute(job_id, input())
    .await
    .unwrap();

    assert_eq!(status, JobStatus::Failed);
    let rows = rows.lock().unwrap();
    assert_eq!(rows[0].status, JobStatus::Failed);
    assert_eq!(rows[0].detail.as_deref(), Some("provider rejected message"));
}

#[tokio::test]
async fn should_mark_job_failed_for_invalid_recipient_without_generating() {
    let jobs = MockJobLogRepo::empty();
    let job_id = queued_job(&jobs).await;
    let rows = jobs.rows_handle();

    let status = SendProposalUseCase {
        generator: MockCopyGenerator {
            response: Some("unused".to_owned()),
        },
        mailer: MockMessageAdapter::new().with_invalid(&["ana@example.com"]),
        jobs,
    }
    .execute(job_id, input())
    .await
    .unwrap();

    assert_eq!(status, JobStatus::Failed);
    assert_eq!(
        rows.lock().unwrap()[0].detail.as_deref(),
        Some("invalid recipient address")
    );
}
