use std::sync::Arc;

use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use relaya_auth_types::identity::JwtSecretSource;
use relaya_domain::platform::Platform;

use crate::adapters::{Connector, EmailAdapter, Publisher, WhatsAppAdapter};
use crate::config::Config;
use crate::infra::ai::HttpCopyGenerator;
use crate::infra::cache::RedisStateStore;
use crate::infra::db::{
    DbCampaignRepository, DbCredentialRepository, DbJobLogRepository, DbPostRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    /// Shared outbound client; carries the 30 s per-call timeout every
    /// platform request inherits.
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn campaign_repo(&self) -> DbCampaignRepository {
        DbCampaignRepository {
            db: self.db.clone(),
        }
    }

    pub fn post_repo(&self) -> DbPostRepository {
        DbPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn credential_repo(&self) -> DbCredentialRepository {
        DbCredentialRepository {
            db: self.db.clone(),
        }
    }

    pub fn job_log_repo(&self) -> DbJobLogRepository {
        DbJobLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn state_store(&self) -> RedisStateStore {
        RedisStateStore {
            pool: self.redis.clone(),
        }
    }

    pub fn copy_generator(&self) -> HttpCopyGenerator {
        HttpCopyGenerator::new(self.http.clone(), self.config.ai.clone())
    }

    pub fn whatsapp_adapter(&self) -> WhatsAppAdapter {
        WhatsAppAdapter::new(self.http.clone(), self.config.whatsapp.clone())
    }

    pub fn email_adapter(&self) -> EmailAdapter {
        EmailAdapter::new(self.http.clone(), self.config.mailchimp.clone())
    }

    pub fn publisher(&self, platform: Platform) -> Publisher {
        Publisher::for_platform(platform, self.http.clone(), &self.config)
    }

    pub fn connector(&self, platform: Platform) -> Connector {
        Connector::for_platform(platform, self.http.clone(), &self.config)
    }
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}
