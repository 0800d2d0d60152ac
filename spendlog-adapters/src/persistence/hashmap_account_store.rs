use std::collections::HashMap;
use std::sync::Arc;

use spendlog_core::{Account, AccountStore, AccountStoreError, Email, VerificationAttempt};
use tokio::sync::RwLock;

/// In-memory account store for tests and local development.
///
/// Cloning shares the underlying map. The insert happens under one write
/// lock, so the uniqueness check and the write are a single atomic step and
/// a concurrent duplicate registration has exactly one winner.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(account.email()) {
            return Err(AccountStoreError::DuplicateEmail);
        }
        accounts.insert(account.email().clone(), account);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn find_by_verification_token(
        &self,
        attempt: &VerificationAttempt,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| {
                account
                    .verification_token()
                    .is_some_and(|state| attempt.matches(&state.token))
            })
            .cloned())
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| {
                account
                    .reset_token()
                    .is_some_and(|state| state.token == token)
            })
            .cloned())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountStoreError> {
        self.accounts
            .write()
            .await
            .insert(account.email().clone(), account.clone());
        Ok(())
    }
}
