use std::sync::LazyLock;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{env, prod};

/// Process-wide application settings. Loaded once; overridable via an
/// optional `config/settings.json` file and `SPENDLOG__`-prefixed
/// environment variables. Secrets never live in the settings file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSetting {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub email_client: EmailClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub address: String,
    /// Base URL the verification and reset links point at.
    pub frontend_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub verification_token_ttl_seconds: i64,
    pub reset_token_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub cookie_name: String,
    pub time_to_live_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientConfig {
    pub base_url: String,
    pub sender: String,
    pub timeout_in_millis: u64,
}

impl AppSetting {
    pub fn load() -> &'static AppSetting {
        static SETTINGS: LazyLock<AppSetting> =
            LazyLock::new(|| AppSetting::build().expect("Failed to load application settings"));
        &SETTINGS
    }

    fn build() -> Result<AppSetting, ConfigError> {
        Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("app.frontend_url", "http://localhost:5174")?
            .set_default("auth.jwt.cookie_name", "spendlog_session")?
            .set_default("auth.jwt.time_to_live_seconds", 7i64 * 24 * 60 * 60)?
            .set_default("auth.verification_token_ttl_seconds", 15i64 * 60)?
            .set_default("auth.reset_token_ttl_seconds", 15i64 * 60)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", "no-reply@spendlog.app")?
            .set_default("email_client.timeout_in_millis", 10_000)?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(Environment::with_prefix("SPENDLOG").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// The one canonical signing secret source.
pub fn jwt_secret() -> Secret<String> {
    static JWT_SECRET: LazyLock<Secret<String>> = LazyLock::new(|| {
        Secret::from(
            std::env::var(env::JWT_SECRET_ENV_VAR)
                .unwrap_or_else(|_| panic!("{} must be set", env::JWT_SECRET_ENV_VAR)),
        )
    });
    JWT_SECRET.clone()
}

/// CORS origin allowlist, comma-separated in the environment.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var(env::ALLOWED_ORIGINS_ENV_VAR).ok()?;
        let origins: Vec<String> = raw
            .split(',')
            .map(|origin| origin.trim().to_owned())
            .filter(|origin| !origin.is_empty())
            .collect();
        if origins.is_empty() {
            None
        } else {
            Some(Self(origins))
        }
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = AppSetting::build().unwrap();
        assert_eq!(settings.auth.jwt.time_to_live_seconds, 604_800);
        assert_eq!(settings.auth.verification_token_ttl_seconds, 900);
        assert_eq!(settings.auth.reset_token_ttl_seconds, 900);
        assert!(!settings.auth.jwt.cookie_name.is_empty());
    }

    #[test]
    fn allowed_origins_matches_exact_origin() {
        let origins = AllowedOrigins(vec!["http://localhost:5174".to_owned()]);
        assert!(origins.contains(&HeaderValue::from_static("http://localhost:5174")));
        assert!(!origins.contains(&HeaderValue::from_static("http://evil.example")));
    }
}
