use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use spendlog_core::{Password, PasswordHash, PasswordHasher, PasswordHasherError};

/// Argon2id hasher. Hashing and verification run on the blocking pool so
/// the async runtime is never stalled by the memory-hard computation.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, PasswordHasherError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None)
            .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?,
    ))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        let current_span: tracing::Span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| PasswordHash::new(Secret::from(hash.to_string())))
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        expected: &PasswordHash,
        candidate: Password,
    ) -> Result<(), PasswordHasherError> {
        let expected = expected.as_ref().expose_secret().clone();
        let current_span: tracing::Span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = argon2::PasswordHash::new(&expected)
                    .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?;

                argon2()?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                    .map_err(|_| PasswordHasherError::IncorrectPassword)
            })
        })
        .await
        .map_err(|e| PasswordHasherError::UnexpectedError(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify_roundtrip() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash(password("secret1")).await.unwrap();
        hasher.verify(&hash, password("secret1")).await.unwrap();
    }

    #[tokio::test]
    async fn wrong_password_is_incorrect() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash(password("secret1")).await.unwrap();
        let result = hasher.verify(&hash, password("secret2")).await;
        assert!(matches!(result, Err(PasswordHasherError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn hashing_is_salted() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash(password("secret1")).await.unwrap();
        let second = hasher.hash(password("secret1")).await.unwrap();
        assert_ne!(
            first.as_ref().expose_secret(),
            second.as_ref().expose_secret()
        );
    }
}
