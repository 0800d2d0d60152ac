use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use super::ValidationError;

const TOKEN_BYTES: usize = 32;
pub const DISPLAY_CODE_LENGTH: usize = 6;

/// A freshly issued single-purpose token (verification or password reset).
///
/// The raw token goes into the email link; [`IssuedToken::display_code`] is
/// the short form shown to the user. Both resolve to the same stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn generate(ttl: Duration, now: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self {
            token: hex::encode(bytes),
            expires_at: now + ttl,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Uppercase prefix of the raw token, accepted as a shorthand code.
    pub fn display_code(&self) -> String {
        self.token[..DISPLAY_CODE_LENGTH].to_ascii_uppercase()
    }
}

/// Token state as persisted on an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenState {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenState {
    /// Live means the expiry instant is strictly in the future.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

impl From<&IssuedToken> for TokenState {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            token: issued.token.clone(),
            expires_at: issued.expires_at,
        }
    }
}

/// Client-supplied verification input: either the full raw token or the
/// 6-character display code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationAttempt {
    Token(String),
    Code(String),
}

impl VerificationAttempt {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::MissingField("token"));
        }
        if input.chars().count() == DISPLAY_CODE_LENGTH {
            Ok(Self::Code(input.to_ascii_uppercase()))
        } else {
            Ok(Self::Token(input.to_owned()))
        }
    }

    /// Whether this attempt identifies the given stored token. Codes match
    /// by case-insensitive prefix.
    pub fn matches(&self, stored: &str) -> bool {
        match self {
            Self::Token(token) => stored == token,
            Self::Code(code) => {
                stored.len() >= DISPLAY_CODE_LENGTH
                    && stored[..DISPLAY_CODE_LENGTH].eq_ignore_ascii_case(code)
            }
        }
    }
}
