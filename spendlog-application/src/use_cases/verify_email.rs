use chrono::Utc;
use spendlog_core::{AccountStore, AccountStoreError, VerificationAttempt};

/// Error types specific to the verify email use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid verification token")]
    InvalidToken,
    /// The token matched an account but its expiry has passed. Kept apart
    /// from `InvalidToken` so the client can offer a resend.
    #[error("Verification token has expired")]
    Expired,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Verify email use case - redeems a verification token or code.
pub struct VerifyEmailUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> VerifyEmailUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    /// Execute the verify email use case
    ///
    /// Liveness is judged against one clock read taken before the lookup
    /// result is inspected.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, attempt: VerificationAttempt) -> Result<(), VerifyEmailError> {
        let now = Utc::now();

        let Some(mut account) = self
            .account_store
            .find_by_verification_token(&attempt)
            .await?
        else {
            return Err(VerifyEmailError::InvalidToken);
        };

        let live = account
            .verification_token()
            .is_some_and(|state| state.is_live(now));
        if !live {
            return Err(VerifyEmailError::Expired);
        }

        account.mark_verified();
        self.account_store.update(&account).await?;

        Ok(())
    }
}
