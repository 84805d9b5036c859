use chrono::{Duration, Utc};

use relaya_campaigns::domain::types::{PostStatus, ScheduleType};
use relaya_campaigns::error::CampaignServiceError;
use relaya_campaigns::usecase::post::{CreatePostInput, CreatePostUseCase};
use relaya_domain::content::PostContent;
use relaya_domain::platform::Platform;

use crate::helpers::{
    MockCredentialRepo, MockPostRepo, MockPublisher, sample_post_content, test_client_id,
    test_credential, test_user_id,
};

fn immediate_input() -> CreatePostInput {
    CreatePostInput {
        client_id: test_client_id(),
        created_by: test_user_id(),
        platform: Platform::Twitter,
        content: sample_post_content(),
        schedule_type: ScheduleType::Immediate,
        scheduled_at: None,
    }
}

fn connected_credentials() -> MockCredentialRepo {
    MockCredentialRepo::with(test_credential(test_client_id(), Platform::Twitter))
}

#[tokio::test]
async fn should_publish_immediate_post_and_store_external_id() {
    let repo = MockPostRepo::empty();
    let rows = repo.rows_handle();
    let usecase = CreatePostUseCase {
        posts: repo,
        credentials: connected_credentials(),
        publisher: MockPublisher::succeeding(),
    };

    let out = usecase.execute(immediate_input()).await.unwrap();

    assert_eq!(out.post.status, PostStatus::Published);
    assert_eq!(out.post.external_id.as_deref(), Some("ext-post-1"));
    let outcome = out.outcome.unwrap();
    assert!(outcome.success);

    let rows = rows.lock().unwrap();
    assert_eq!(rows[0].status, PostStatus::Published);
    assert_eq!(rows[0].external_id.as_deref(), Some("ext-post-1"));
}

#[tokio::test]
async fn should_mark_post_failed_on_platform_rejection() {
    let repo = MockPostRepo::empty();
    let rows = repo.rows_handle();
    let usecase = CreatePostUseCase {
        posts: repo,
        credentials: connected_credentials(),
        publisher: MockPublisher::failing("policy violation"),
    };

    let out = usecase.execute(immediate_input()).await.unwrap();

    // The publish was attempted and rejected: terminal failure state, and
    // the outcome (not an error) carries the provider's reason.
    assert_eq!(out.post.status, PostStatus::Failed);
    let outcome = out.outcome.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.reason.as_deref(), Some("policy violation"));
    assert_eq!(rows.lock().unwrap()[0].status, PostStatus::Failed);
}

#[tokio::test]
async fn should_fail_post_when_no_credential_connected() {
    let repo = MockPostRepo::empty();
    let rows = repo.rows_handle();
    let publisher = MockPublisher::succeeding();
    let usecase = CreatePostUseCase {
        posts: repo,
        credentials: MockCredentialRepo::empty(),
        publisher: publisher.clone(),
    };

    let result = usecase.execute(immediate_input()).await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::CredentialNotFound)
    ));
    // Settled before the platform was ever contacted.
    assert_eq!(publisher.call_count(), 0);
    assert_eq!(rows.lock().unwrap()[0].status, PostStatus::Failed);
}

#[tokio::test]
async fn should_persist_scheduled_post_without_publishing() {
    let repo = MockPostRepo::empty();
    let rows = repo.rows_handle();
    let publisher = MockPublisher::succeeding();
    let usecase = CreatePostUseCase {
        posts: repo,
        credentials: connected_credentials(),
        publisher: publisher.clone(),
    };

    let out = usecase
        .execute(CreatePostInput {
            schedule_type: ScheduleType::Scheduled,
            scheduled_at: Some(Utc::now() + Duration::hours(6)),
            ..immediate_input()
        })
        .await
        .unwrap();

    assert_eq!(out.post.status, PostStatus::Scheduled);
    assert!(out.outcome.is_none());
    assert_eq!(publisher.call_count(), 0);
    assert_eq!(rows.lock().unwrap()[0].status, PostStatus::Scheduled);
}

#[tokio::test]
async fn should_reject_post_without_caption_or_media() {
    let usecase = CreatePostUseCase {
        posts: MockPostRepo::empty(),
        credentials: connected_credentials(),
        publisher: MockPublisher::succeeding(),
    };

    let result = usecase
        .execute(CreatePostInput {
            content: PostContent {
                caption: String::new(),
                link: None,
                media: vec![],
            },
            ..immediate_input()
        })
        .await;

    assert!(matches!(result, Err(CampaignServiceError::MissingData)));
}
