use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{Password, PasswordHash},
    token::IssuedToken,
};

/// Port trait for the raw email transport.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Port trait for composing and dispatching the account lifecycle mails.
///
/// Callers treat failures as soft: a failed dispatch is logged and reported,
/// never allowed to fail the operation that triggered it.
#[async_trait]
pub trait AccountMailer: Send + Sync {
    async fn send_verification_email(
        &self,
        recipient: &Email,
        first_name: &str,
        token: &IssuedToken,
    ) -> Result<(), String>;

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        first_name: &str,
        token: &IssuedToken,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for PasswordHasherError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Port trait for salted password hashing and constant-time verification.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError>;
    async fn verify(
        &self,
        expected: &PasswordHash,
        candidate: Password,
    ) -> Result<(), PasswordHasherError>;
}
