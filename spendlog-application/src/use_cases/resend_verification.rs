use chrono::{Duration, Utc};
use spendlog_core::{AccountMailer, AccountStore, AccountStoreError, Email, IssuedToken};

/// Error types specific to the resend verification use case
#[derive(Debug, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User not found")]
    NotFound,
    #[error("Email is already verified")]
    AlreadyVerified,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Resend verification use case - rotates the verification token and
/// re-dispatches the email.
pub struct ResendVerificationUseCase<A, M>
where
    A: AccountStore,
    M: AccountMailer,
{
    account_store: A,
    mailer: M,
    verification_token_ttl: Duration,
}

impl<A, M> ResendVerificationUseCase<A, M>
where
    A: AccountStore,
    M: AccountMailer,
{
    pub fn new(account_store: A, mailer: M, verification_token_ttl: Duration) -> Self {
        Self {
            account_store,
            mailer,
            verification_token_ttl,
        }
    }

    /// Execute the resend verification use case
    ///
    /// The overwrite invalidates any previously issued token, even one that
    /// is still live. Returns whether the email was dispatched.
    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<bool, ResendVerificationError> {
        let Some(mut account) = self.account_store.find_by_email(&email).await? else {
            return Err(ResendVerificationError::NotFound);
        };

        if account.is_verified() {
            return Err(ResendVerificationError::AlreadyVerified);
        }

        let token = IssuedToken::generate(self.verification_token_ttl, Utc::now());
        account.set_verification_token(&token);
        self.account_store.update(&account).await?;

        let email_sent = match self
            .mailer
            .send_verification_email(account.email(), account.name().first(), &token)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to resend verification email");
                false
            }
        };

        Ok(email_sent)
    }
}
