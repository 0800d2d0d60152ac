use chrono::{Duration, Utc};
use spendlog_core::{AccountMailer, AccountStore, AccountStoreError, Email, IssuedToken};

/// Error types specific to the request password reset use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Request password reset use case - issues a reset token when the account
/// exists.
///
/// The outcome is identical whether or not the email is registered, and a
/// dispatch failure is only logged, so the endpoint cannot be used to probe
/// for accounts.
pub struct RequestPasswordResetUseCase<A, M>
where
    A: AccountStore,
    M: AccountMailer,
{
    account_store: A,
    mailer: M,
    reset_token_ttl: Duration,
}

impl<A, M> RequestPasswordResetUseCase<A, M>
where
    A: AccountStore,
    M: AccountMailer,
{
    pub fn new(account_store: A, mailer: M, reset_token_ttl: Duration) -> Self {
        Self {
            account_store,
            mailer,
            reset_token_ttl,
        }
    }

    /// Execute the request password reset use case
    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let Some(mut account) = self.account_store.find_by_email(&email).await? else {
            return Ok(());
        };

        let token = IssuedToken::generate(self.reset_token_ttl, Utc::now());
        account.set_reset_token(&token);
        self.account_store.update(&account).await?;

        if let Err(e) = self
            .mailer
            .send_password_reset_email(account.email(), account.name().first(), &token)
            .await
        {
            tracing::warn!(error = %e, "failed to send password reset email");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MailKind, MemoryAccountStore, RecordingMailer, email};
    use secrecy::Secret;
    use spendlog_core::{Account, PasswordHash, PersonName};

    async fn seed_account(store: &MemoryAccountStore) {
        let token = IssuedToken::generate(Duration::seconds(900), Utc::now());
        let account = Account::new(
            email("a@x.com"),
            PersonName::new("Ada", "Lovelace").unwrap(),
            PasswordHash::new(Secret::from("hashed:secret1".to_owned())),
            &token,
        );
        store.add_account(account).await.unwrap();
    }

    #[tokio::test]
    async fn known_email_gets_a_reset_token_and_mail() {
        let store = MemoryAccountStore::new();
        let mailer = RecordingMailer::new();
        seed_account(&store).await;

        let use_case =
            RequestPasswordResetUseCase::new(store.clone(), mailer.clone(), Duration::seconds(900));
        use_case.execute(email("a@x.com")).await.unwrap();

        let account = store.get(&email("a@x.com")).await.unwrap();
        let state = account.reset_token().unwrap();

        let sent = mailer.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, MailKind::PasswordReset);
        assert_eq!(sent[0].token, state.token);
    }

    #[tokio::test]
    async fn unknown_email_succeeds_without_mail() {
        let store = MemoryAccountStore::new();
        let mailer = RecordingMailer::new();

        let use_case =
            RequestPasswordResetUseCase::new(store, mailer.clone(), Duration::seconds(900));
        use_case.execute(email("ghost@x.com")).await.unwrap();

        assert!(mailer.sent.read().await.is_empty());
    }

    #[tokio::test]
    async fn second_request_overwrites_the_first_token() {
        let store = MemoryAccountStore::new();
        seed_account(&store).await;

        let use_case = RequestPasswordResetUseCase::new(
            store.clone(),
            RecordingMailer::new(),
            Duration::seconds(900),
        );
        use_case.execute(email("a@x.com")).await.unwrap();
        let first = store
            .get(&email("a@x.com"))
            .await
            .unwrap()
            .reset_token()
            .unwrap()
            .token
            .clone();

        use_case.execute(email("a@x.com")).await.unwrap();
        let second = store
            .get(&email("a@x.com"))
            .await
            .unwrap()
            .reset_token()
            .unwrap()
            .token
            .clone();

        assert_ne!(first, second);
        assert!(store.find_by_reset_token(&first).await.unwrap().is_none());
    }
}
