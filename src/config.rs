use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::warn;

/// Development fallback for `JWT_SECRET`. Fine for local hacking and tests,
/// not for a deployed instance.
pub const DEV_JWT_SECRET: &str = "rainbow-films-dev-secret";

/// Origins always allowed during local development.
const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:4173",
    "http://localhost:8080",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub email: EmailConfig,
}

#[derive(Debug, Clone)]
pub struct GeneralConfig {
    /// SeaORM connection string, e.g. `sqlite:data/rainbow-films.db`
    pub database_url: String,

    pub max_db_connections: u32,

    pub min_db_connections: u32,

    pub log_level: String,

    /// Directory uploaded images are written to and served from
    pub uploads_path: PathBuf,

    /// Built SPA frontend served as the catch-all fallback
    pub frontend_dist: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/rainbow-films.db".to_string(),
            max_db_connections: 5,
            min_db_connections: 1,
            log_level: "info".to_string(),
            uploads_path: PathBuf::from("public/uploads"),
            frontend_dist: PathBuf::from("frontend/dist"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,

    /// Fixed local dev origins plus `FRONTEND_URL` when set
    pub cors_allowed_origins: Vec<String>,

    pub frontend_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_allowed_origins: DEV_ORIGINS.iter().map(ToString::to_string).collect(),
            frontend_url: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to sign and verify bearer tokens
    pub jwt_secret: String,

    /// Token lifetime in days
    pub token_expiry_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_expiry_days: 7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmailConfig {
    /// When unset, outbound email is disabled and sends become no-ops
    pub resend_api_key: Option<String>,

    pub from_email: Option<String>,

    pub admin_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, reading a `.env` file first
    /// when one is present.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(url) = env_var("DB_URL").or_else(|| env_var("MONGODB_URI")) {
            config.general.database_url = url;
        }
        if let Some(level) = env_var("LOG_LEVEL") {
            config.general.log_level = level;
        }
        if let Some(path) = env_var("UPLOADS_PATH") {
            config.general.uploads_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("FRONTEND_DIST") {
            config.general.frontend_dist = PathBuf::from(path);
        }

        if let Some(port) = env_var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a number, got '{port}'"))?;
        }
        if let Some(frontend_url) = env_var("FRONTEND_URL") {
            config
                .server
                .cors_allowed_origins
                .push(frontend_url.clone());
            config.server.frontend_url = Some(frontend_url);
        }

        if let Some(secret) = env_var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        } else {
            warn!("JWT_SECRET not set, using the development fallback secret");
        }
        if let Some(days) = env_var("JWT_EXPIRY_DAYS") {
            config.auth.token_expiry_days = days
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRY_DAYS must be a number, got '{days}'"))?;
        }

        config.email.resend_api_key = env_var("RESEND_API_KEY");
        config.email.from_email = env_var("FROM_EMAIL");
        config.email.admin_email = env_var("ADMIN_EMAIL");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        if self.auth.token_expiry_days <= 0 {
            bail!("JWT_EXPIRY_DAYS must be positive");
        }
        if self.general.database_url.is_empty() {
            bail!("DB_URL must not be empty");
        }
        if self.email.resend_api_key.is_some()
            && (self.email.from_email.is_none() || self.email.admin_email.is_none())
        {
            bail!("RESEND_API_KEY is set but FROM_EMAIL / ADMIN_EMAIL are missing");
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut config = Config::default();
        config.auth.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn resend_key_without_envelope_is_rejected() {
        let mut config = Config::default();
        config.email.resend_api_key = Some("re_123".to_string());
        assert!(config.validate().is_err());
    }
}
