use relaya_domain::content::MessageContent;
use relaya_domain::outcome::DispatchSummary;

use crate::adapters::MessageAdapter;
use crate::error::CampaignServiceError;

/// Fan one logical send out across N targets.
///
/// Targets failing the adapter's validity predicate are excluded before any
/// external call and never count as failures. The remainder is dispatched
/// strictly sequentially in input order — target i+1 is not attempted until
/// target i's outcome is known — and one target's failure never aborts the
/// rest.
pub struct DispatchBulkUseCase<A: MessageAdapter> {
    pub adapter: A,
}

impl<A: MessageAdapter> DispatchBulkUseCase<A> {
    pub async fn execute(
        &self,
        targets: &[String],
        content: &MessageContent,
    ) -> Result<DispatchSummary, CampaignServiceError> {
        let valid: Vec<&str> = targets
            .iter()
            .map(String::as_str)
            .filter(|t| self.adapter.validate_target(t))
            .collect();

        if valid.is_empty() {
            return Err(CampaignServiceError::NoValidTargets);
        }

        let mut summary = DispatchSummary::new();
        for target in valid {
            let outcome = self.adapter.send(target, content).await;
            summary.record(outcome);
        }

        tracing::info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "bulk dispatch settled"
        );
        Ok(summary)
    }
}
