use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Symmetric secret for access tokens. Empty means unconfigured;
    /// verification fails with an internal error rather than a panic.
    pub access_token_secret: String,
    /// Separate symmetric secret for refresh tokens.
    pub refresh_token_secret: String,
    /// Lifetime of freshly minted access tokens.
    pub access_token_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self {
            environment,
            security: SecurityConfig {
                access_token_secret: env::var("ACCESS_TOKEN_SECRET").unwrap_or_default(),
                refresh_token_secret: env::var("REFRESH_TOKEN_SECRET").unwrap_or_default(),
                access_token_expiry_hours: env::var("ACCESS_TOKEN_EXPIRY_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
