use chrono::Utc;
use spendlog_core::{AccountStore, AccountStoreError, Password, PasswordHasher, PasswordHasherError};

/// Error types specific to the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    /// Unknown and expired tokens collapse into one kind; a reset link is
    /// either usable or it is not.
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Reset password use case - redeems a reset token for a new password.
pub struct ResetPasswordUseCase<A, H>
where
    A: AccountStore,
    H: PasswordHasher,
{
    account_store: A,
    password_hasher: H,
}

impl<A, H> ResetPasswordUseCase<A, H>
where
    A: AccountStore,
    H: PasswordHasher,
{
    pub fn new(account_store: A, password_hasher: H) -> Self {
        Self {
            account_store,
            password_hasher,
        }
    }

    /// Execute the reset password use case
    ///
    /// The new hash and the token clear land in one store write. Existing
    /// session credentials stay valid until their own expiry.
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: &str,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let now = Utc::now();

        let Some(mut account) = self.account_store.find_by_reset_token(token).await? else {
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        };

        let live = account
            .reset_token()
            .is_some_and(|state| state.is_live(now));
        if !live {
            return Err(ResetPasswordError::InvalidOrExpiredToken);
        }

        let password_hash = self.password_hasher.hash(new_password).await?;
        account.reset_password(password_hash);
        self.account_store.update(&account).await?;

        Ok(())
    }
}
