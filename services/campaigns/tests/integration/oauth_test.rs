use relaya_campaigns::error::{CampaignServiceError, OAuthRejection};
use relaya_campaigns::usecase::oauth::{
    CompleteOAuthInput, CompleteOAuthUseCase, StartOAuthInput, StartOAuthUseCase,
};
use relaya_domain::platform::Platform;

use crate::helpers::{MockConnector, MockCredentialRepo, MockStateStore, test_client_id, test_user_id};

const REDIRECT_URI: &str = "https://api.relaya.io/connect/twitter/callback";

fn start(states: MockStateStore) -> StartOAuthUseCase<MockStateStore, MockConnector> {
    StartOAuthUseCase {
        states,
        connector: MockConnector::succeeding(),
        redirect_uri: REDIRECT_URI.to_owned(),
    }
}

fn complete(
    states: MockStateStore,
    connector: MockConnector,
    credentials: MockCredentialRepo,
) -> CompleteOAuthUseCase<MockStateStore, MockConnector, MockCredentialRepo> {
    CompleteOAuthUseCase {
        states,
        connector,
        credentials,
        platform: Platform::Twitter,
        redirect_uri: REDIRECT_URI.to_owned(),
    }
}

/// Pull the state token out of the authorize URL the start usecase built.
fn state_from_url(url: &str) -> String {
    url.split("state=")
        .nth(1)
        .unwrap()
        .split('&')
        .next()
        .unwrap()
        .to_owned()
}

async fn issue_state(states: &MockStateStore) -> String {
    let url = start(states.clone())
        .execute(StartOAuthInput {
            platform: Platform::Twitter,
            client_id: test_client_id(),
            user_id: test_user_id(),
        })
        .await
        .unwrap();
    state_from_url(&url)
}

fn callback(code: &str, state: &str) -> CompleteOAuthInput {
    CompleteOAuthInput {
        code: Some(code.to_owned()),
        state: Some(state.to_owned()),
        error: None,
    }
}

// ── Start ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_state_token_and_authorize_url() {
    let states = MockStateStore::empty();
    let url = start(states.clone())
        .execute(StartOAuthInput {
            platform: Platform::Twitter,
            client_id: test_client_id(),
            user_id: test_user_id(),
        })
        .await
        .unwrap();

    assert!(url.contains("state="));
    assert!(url.contains("redirect_uri="));
    assert_eq!(states.len(), 1);

    let token = state_from_url(&url);
    assert_eq!(token.len(), 32);
}

// ── Complete: success path ───────────────────────────────────────────────────

#[tokio::test]
async fn should_complete_flow_and_persist_credential() {
    let states = MockStateStore::empty();
    let token = issue_state(&states).await;
    let credentials = MockCredentialRepo::empty();
    let rows = credentials.rows_handle();

    let credential = complete(states.clone(), MockConnector::succeeding(), credentials)
        .execute(callback("auth-code", &token))
        .await
        .unwrap();

    assert_eq!(credential.client_id, test_client_id());
    assert_eq!(credential.platform, Platform::Twitter);
    assert_eq!(credential.account_id, "acct-1");
    assert_eq!(credential.access_token, "fresh-access-token");
    assert!(credential.is_active);
    assert!(credential.expires_at.is_some());

    assert_eq!(rows.lock().unwrap().len(), 1);
    // The one-time token is gone.
    assert_eq!(states.len(), 0);
}

#[tokio::test]
async fn should_reject_replayed_callback() {
    let states = MockStateStore::empty();
    let token = issue_state(&states).await;
    let credentials = MockCredentialRepo::empty();
    let rows = credentials.rows_handle();

    let usecase = complete(states.clone(), MockConnector::succeeding(), credentials);
    usecase.execute(callback("auth-code", &token)).await.unwrap();

    // Same (code, state) a second time: the token was consumed.
    let replay = usecase.execute(callback("auth-code", &token)).await;
    assert!(matches!(
        replay,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::UnknownState))
    ));
    assert_eq!(rows.lock().unwrap().len(), 1);
}

// ── Complete: rejection paths ────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_provider_error_and_still_invalidate_state() {
    let states = MockStateStore::empty();
    let token = issue_state(&states).await;
    let connector = MockConnector::succeeding();
    let credentials = MockCredentialRepo::empty();
    let rows = credentials.rows_handle();

    let result = complete(states.clone(), connector.clone(), credentials)
        .execute(CompleteOAuthInput {
            code: None,
            state: Some(token.clone()),
            error: Some("access_denied".to_owned()),
        })
        .await;

    match result {
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::Provider(e))) => {
            assert_eq!(e, "access_denied");
        }
        other => panic!("expected provider rejection, got {other:?}"),
    }
    // No credential written, no token exchange attempted, and the state
    // token was consumed so it cannot be replayed.
    assert!(rows.lock().unwrap().is_empty());
    assert_eq!(connector.exchange_call_count(), 0);
    assert_eq!(states.len(), 0);
}

#[tokio::test]
async fn should_reject_callback_missing_code_or_state() {
    let states = MockStateStore::empty();
    let result = complete(states, MockConnector::succeeding(), MockCredentialRepo::empty())
        .execute(CompleteOAuthInput {
            code: Some("auth-code".to_owned()),
            state: None,
            error: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::MissingParams))
    ));
}

#[tokio::test]
async fn should_reject_unknown_state_token() {
    let states = MockStateStore::empty();
    let result = complete(states, MockConnector::succeeding(), MockCredentialRepo::empty())
        .execute(callback("auth-code", "never-issued"))
        .await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::UnknownState))
    ));
}

#[tokio::test]
async fn should_reject_state_issued_for_another_platform() {
    let states = MockStateStore::empty();
    // State was issued for a facebook connect...
    let url = StartOAuthUseCase {
        states: states.clone(),
        connector: MockConnector::succeeding(),
        redirect_uri: REDIRECT_URI.to_owned(),
    }
    .execute(StartOAuthInput {
        platform: Platform::Facebook,
        client_id: test_client_id(),
        user_id: test_user_id(),
    })
    .await
    .unwrap();
    let token = state_from_url(&url);

    // ...but the callback arrives on the twitter flow.
    let result = complete(states, MockConnector::succeeding(), MockCredentialRepo::empty())
        .execute(callback("auth-code", &token))
        .await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::UnknownState))
    ));
}

#[tokio::test]
async fn should_reject_when_token_exchange_fails() {
    let states = MockStateStore::empty();
    let token = issue_state(&states).await;
    let connector = MockConnector {
        grant: None,
        ..MockConnector::succeeding()
    };
    let credentials = MockCredentialRepo::empty();
    let rows = credentials.rows_handle();

    let result = complete(states, connector, credentials)
        .execute(callback("bad-code", &token))
        .await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::ExchangeFailed(_)))
    ));
    assert!(rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_token_response_without_access_token() {
    let states = MockStateStore::empty();
    let token = issue_state(&states).await;
    let connector = MockConnector {
        missing_access_token: true,
        ..MockConnector::succeeding()
    };

    let result = complete(states, connector, MockCredentialRepo::empty())
        .execute(callback("auth-code", &token))
        .await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::MissingAccessToken))
    ));
}

#[tokio::test]
async fn should_reject_unresolvable_account_without_persisting() {
    let states = MockStateStore::empty();
    let token = issue_state(&states).await;
    let connector = MockConnector {
        account: None,
        ..MockConnector::succeeding()
    };
    let credentials = MockCredentialRepo::empty();
    let rows = credentials.rows_handle();

    let result = complete(states, connector, credentials)
        .execute(callback("auth-code", &token))
        .await;

    assert!(matches!(
        result,
        Err(CampaignServiceError::OAuthRejected(OAuthRejection::AccountLookup(_)))
    ));
    // The exchange succeeded, but no credential exists without an account.
    assert!(rows.lock().unwrap().is_empty());
}
