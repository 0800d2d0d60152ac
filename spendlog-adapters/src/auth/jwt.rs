use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use spendlog_core::AccountId;
use thiserror::Error;

use crate::config::settings::AppSetting;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
    pub time_to_live_seconds: i64,
}

impl SessionConfig {
    pub fn from_settings() -> Self {
        let settings = AppSetting::load();
        Self {
            cookie_name: settings.auth.jwt.cookie_name.clone(),
            secret: crate::config::settings::jwt_secret(),
            time_to_live_seconds: settings.auth.jwt.time_to_live_seconds,
        }
    }

    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// All verification failures collapse into `MissingToken`/`InvalidToken`,
/// which render identically to the client.
#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: AccountId,
    pub exp: usize,
}

pub fn extract_session_token<'a>(
    jar: &'a CookieJar,
    cookie_name: &str,
) -> Result<&'a str, SessionTokenError> {
    match jar.get(cookie_name) {
        Some(cookie) => Ok(cookie.value()),
        None => Err(SessionTokenError::MissingToken),
    }
}

// Create cookie and set the value to the passed-in token string
pub fn create_session_cookie(token: String, cookie_name: &str) -> Cookie<'static> {
    Cookie::build((cookie_name.to_owned(), token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn create_removal_cookie(cookie_name: &str) -> Cookie<'static> {
    let mut cookie = create_session_cookie(String::new(), cookie_name);
    cookie.make_removal();
    cookie
}

// Create a signed session token embedding the account id
pub fn generate_session_token(
    account_id: AccountId,
    token_ttl_seconds: i64,
    secret: &[u8],
) -> Result<String, SessionTokenError> {
    let delta = chrono::Duration::try_seconds(token_ttl_seconds).ok_or(
        SessionTokenError::UnexpectedError("Failed to create session token duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionTokenError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp.try_into().map_err(|_| {
        SessionTokenError::UnexpectedError("Failed to cast i64 to usize".to_string())
    })?;

    let claims = Claims {
        sub: account_id,
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|_| SessionTokenError::InvalidToken)
}

// Check a session token by decoding it using the signing secret. Signature
// and expiry failures are indistinguishable to the caller.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, SessionTokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| SessionTokenError::InvalidToken)
}

/// The authorization guard: resolves the acting account from the session
/// cookie. Every protected route derives its owner id from this and nothing
/// else.
pub fn authorize(jar: &CookieJar, config: &SessionConfig) -> Result<AccountId, SessionTokenError> {
    let token = extract_session_token(jar, &config.cookie_name)?;
    let claims = validate_session_token(token, config)?;
    Ok(claims.sub)
}
