use relaya_campaigns::error::CampaignServiceError;
use relaya_campaigns::usecase::dispatch::DispatchBulkUseCase;

use crate::helpers::{MockMessageAdapter, sample_message, targets};

#[tokio::test]
async fn should_tally_partial_failure_without_aborting_siblings() {
    let adapter = MockMessageAdapter::new().with_failing(&["+222"]);
    let calls = adapter.calls_handle();
    let usecase = DispatchBulkUseCase { adapter };

    let summary = usecase
        .execute(&targets(&["+111", "+222", "+333"]), &sample_message())
        .await
        .unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);

    // Target 2 carries a non-empty reason; 1 and 3 carry success markers.
    assert!(summary.details[0].success);
    assert!(summary.details[0].external_id.is_some());
    assert!(!summary.details[1].success);
    assert!(!summary.details[1].reason.as_deref().unwrap().is_empty());
    assert!(summary.details[2].success);

    // The failure on target 2 did not stop target 3.
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn should_keep_counts_summing_to_attempted_targets() {
    let adapter = MockMessageAdapter::new().with_failing(&["+2", "+4"]);
    let usecase = DispatchBulkUseCase { adapter };

    let summary = usecase
        .execute(&targets(&["+1", "+2", "+3", "+4", "+5"]), &sample_message())
        .await
        .unwrap();

    assert_eq!(summary.successful + summary.failed, summary.total);
    assert_eq!(summary.total, summary.details.len());
    assert_eq!(summary.successful, 3);
    assert_eq!(summary.failed, 2);
}

#[tokio::test]
async fn should_exclude_invalid_targets_before_any_call() {
    let adapter = MockMessageAdapter::new().with_invalid(&["bogus"]);
    let calls = adapter.calls_handle();
    let usecase = DispatchBulkUseCase { adapter };

    let summary = usecase
        .execute(&targets(&["+111", "bogus", "+333"]), &sample_message())
        .await
        .unwrap();

    // The invalid target is not attempted and not counted as a failure.
    assert_eq!(summary.total, 2);
    assert_eq!(summary.failed, 0);
    let attempted: Vec<String> = calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect();
    assert_eq!(attempted, vec!["+111", "+333"]);
}

#[tokio::test]
async fn should_fail_fast_when_no_target_survives_filtering() {
    let adapter = MockMessageAdapter::new().with_invalid(&["a", "b"]);
    let calls = adapter.calls_handle();
    let usecase = DispatchBulkUseCase { adapter };

    let result = usecase.execute(&targets(&["a", "b"]), &sample_message()).await;

    assert!(matches!(result, Err(CampaignServiceError::NoValidTargets)));
    // Zero external calls were made.
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_dispatch_in_input_order() {
    let adapter = MockMessageAdapter::new().with_failing(&["+2"]);
    let calls = adapter.calls_handle();
    let usecase = DispatchBulkUseCase { adapter };

    usecase
        .execute(&targets(&["+1", "+2", "+3", "+4"]), &sample_message())
        .await
        .unwrap();

    let attempted: Vec<String> = calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect();
    assert_eq!(attempted, vec!["+1", "+2", "+3", "+4"]);
}
