/// Campaigns service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (OAuth state tokens).
    pub redis_url: String,
    /// HMAC secret for validating bearer tokens.
    pub jwt_secret: String,
    /// Externally reachable base URL, used to build OAuth redirect URIs
    /// (e.g. "https://api.relaya.io").
    pub public_url: String,
    /// TCP port to listen on (default 3120). Env var: `CAMPAIGNS_PORT`.
    pub port: u16,
    pub whatsapp: WhatsAppConfig,
    pub mailchimp: MailchimpConfig,
    /// Meta app, shared by the Facebook and Instagram connectors.
    pub meta: OAuthApp,
    pub linkedin: OAuthApp,
    pub twitter: OAuthApp,
    pub pinterest: OAuthApp,
    pub ai: AiConfig,
}

/// WhatsApp Business Cloud API credentials (app-level, not per client).
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub access_token: String,
    pub phone_number_id: String,
}

/// Mailchimp Transactional credentials.
#[derive(Debug, Clone)]
pub struct MailchimpConfig {
    pub api_key: String,
    pub from_email: String,
}

/// OAuth application registered with one provider.
#[derive(Debug, Clone)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthApp {
    fn from_env(prefix: &str) -> Self {
        Self {
            client_id: require(&format!("{prefix}_CLIENT_ID")),
            client_secret: require(&format!("{prefix}_CLIENT_SECRET")),
        }
    }
}

/// Completion endpoint used for proposal and caption copy.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub endpoint: String,
    pub api_key: String,
}

fn require(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: require("DATABASE_URL"),
            redis_url: require("REDIS_URL"),
            jwt_secret: require("JWT_SECRET"),
            public_url: require("PUBLIC_URL"),
            port: std::env::var("CAMPAIGNS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            whatsapp: WhatsAppConfig {
                access_token: require("WHATSAPP_ACCESS_TOKEN"),
                phone_number_id: require("WHATSAPP_PHONE_NUMBER_ID"),
            },
            mailchimp: MailchimpConfig {
                api_key: require("MAILCHIMP_API_KEY"),
                from_email: require("MAILCHIMP_FROM_EMAIL"),
            },
            meta: OAuthApp::from_env("META"),
            linkedin: OAuthApp::from_env("LINKEDIN"),
            twitter: OAuthApp::from_env("TWITTER"),
            pinterest: OAuthApp::from_env("PINTEREST"),
            ai: AiConfig {
                endpoint: require("AI_ENDPOINT"),
                api_key: require("AI_API_KEY"),
            },
        }
    }

    /// Callback URL registered with every provider.
    pub fn redirect_uri(&self, platform: relaya_domain::platform::Platform) -> String {
        format!("{}/connect/{}/callback", self.public_url, platform)
    }
}
