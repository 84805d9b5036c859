//! Dispatch outcome types.
//!
//! One [`TargetOutcome`] per attempted target; the aggregate
//! [`DispatchSummary`] is what gets persisted and returned to callers.
//! Details are transient — they exist only in the response.

use serde::Serialize;

/// Outcome of one adapter call against one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    pub target: String,
    pub success: bool,
    /// Platform-assigned id (message id, post id) on success.
    pub external_id: Option<String>,
    /// Platform or transport diagnostic on failure.
    pub reason: Option<String>,
}

impl TargetOutcome {
    pub fn delivered(target: impl Into<String>, external_id: Option<String>) -> Self {
        Self {
            target: target.into(),
            success: true,
            external_id,
            reason: None,
        }
    }

    pub fn rejected(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            success: false,
            external_id: None,
            reason: Some(reason.into()),
        }
    }
}

/// Aggregate result of one fan-out. Invariant: `successful + failed == total`
/// and `total == details.len()` — every attempted target is accounted for.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<TargetOutcome>,
}

impl DispatchSummary {
    pub fn new() -> Self {
        Self {
            total: 0,
            successful: 0,
            failed: 0,
            details: Vec::new(),
        }
    }

    /// Record one outcome, keeping the tally consistent with `details`.
    pub fn record(&mut self, outcome: TargetOutcome) {
        self.total += 1;
        if outcome.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.details.push(outcome);
    }
}

impl Default for DispatchSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a single-target publish (the N=1 form of the fan-out contract).
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub success: bool,
    pub external_id: Option<String>,
    pub reason: Option<String>,
}

impl PublishOutcome {
    pub fn published(external_id: impl Into<String>) -> Self {
        Self {
            success: true,
            external_id: Some(external_id.into()),
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            external_id: None,
            reason: Some(reason.into()),
        }
    }
}
