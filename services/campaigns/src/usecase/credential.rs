use uuid::Uuid;

use relaya_domain::platform::Platform;

use crate::domain::repository::CredentialRepository;
use crate::domain::types::Credential;
use crate::error::CampaignServiceError;

// ── ListCredentials ──────────────────────────────────────────────────────────

pub struct ListCredentialsUseCase<R: CredentialRepository> {
    pub credentials: R,
}

impl<R: CredentialRepository> ListCredentialsUseCase<R> {
    pub async fn execute(&self, client_id: Uuid) -> Result<Vec<Credential>, CampaignServiceError> {
        self.credentials.list_active(client_id).await
    }
}

// ── Disconnect ───────────────────────────────────────────────────────────────

pub struct DisconnectUseCase<R: CredentialRepository> {
    pub credentials: R,
}

impl<R: CredentialRepository> DisconnectUseCase<R> {
    /// Returns 404 if there was no active connection to disconnect.
    pub async fn execute(
        &self,
        client_id: Uuid,
        platform: Platform,
    ) -> Result<(), CampaignServiceError> {
        let deactivated = self.credentials.deactivate(client_id, platform).await?;
        if !deactivated {
            return Err(CampaignServiceError::CredentialNotFound);
        }
        Ok(())
    }
}
