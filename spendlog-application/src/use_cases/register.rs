use chrono::{Duration, Utc};
use spendlog_core::{
    Account, AccountMailer, AccountStore, AccountStoreError, Email, IssuedToken, Password,
    PasswordHasher, PasswordHasherError, PersonName,
};

/// Outcome of a successful registration.
///
/// `verification_email_sent` is advisory: a failed dispatch never rolls the
/// account back, the client is just told to use the resend endpoint.
#[derive(Debug)]
pub struct Registration {
    pub account: Account,
    pub verification_email_sent: bool,
}

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hasher error: {0}")]
    PasswordHasherError(#[from] PasswordHasherError),
}

/// Register use case - creates an unverified account and dispatches the
/// verification email.
pub struct RegisterUseCase<A, H, M>
where
    A: AccountStore,
    H: PasswordHasher,
    M: AccountMailer,
{
    account_store: A,
    password_hasher: H,
    mailer: M,
    verification_token_ttl: Duration,
}

impl<A, H, M> RegisterUseCase<A, H, M>
where
    A: AccountStore,
    H: PasswordHasher,
    M: AccountMailer,
{
    pub fn new(
        account_store: A,
        password_hasher: H,
        mailer: M,
        verification_token_ttl: Duration,
    ) -> Self {
        Self {
            account_store,
            password_hasher,
            mailer,
            verification_token_ttl,
        }
    }

    /// Execute the register use case
    ///
    /// Duplicate detection is left to the store's uniqueness guarantee, so a
    /// concurrent registration race has exactly one winner.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        name: PersonName,
        password: Password,
    ) -> Result<Registration, RegisterError> {
        let password_hash = self.password_hasher.hash(password).await?;

        let token = IssuedToken::generate(self.verification_token_ttl, Utc::now());
        let account = Account::new(email, name, password_hash, &token);

        self.account_store.add_account(account.clone()).await?;

        let verification_email_sent = match self
            .mailer
            .send_verification_email(account.email(), account.name().first(), &token)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to send verification email");
                false
            }
        };

        Ok(Registration {
            account,
            verification_email_sent,
        })
    }
}
