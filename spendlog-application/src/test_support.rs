//! Shared in-memory port implementations for use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use spendlog_core::{
    Account, AccountId, AccountMailer, AccountStore, AccountStoreError, Email, EmailClient,
    Expense, ExpenseDraft, ExpenseId, ExpenseStore, ExpenseStoreError, IssuedToken, Password,
    PasswordHash, PasswordHasher, PasswordHasherError, VerificationAttempt,
};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, email: &Email) -> Option<Account> {
        self.accounts.read().await.get(email).cloned()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
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
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.email().clone(), account.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemoryExpenseStore {
    expenses: Arc<RwLock<HashMap<ExpenseId, Expense>>>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn add(&self, expense: Expense) -> Result<(), ExpenseStoreError> {
        self.expenses.write().await.insert(expense.id(), expense);
        Ok(())
    }

    async fn list_for_owner(&self, owner: AccountId) -> Result<Vec<Expense>, ExpenseStoreError> {
        let expenses = self.expenses.read().await;
        let mut owned: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(owned)
    }

    async fn update(
        &self,
        owner: AccountId,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseStoreError> {
        let mut expenses = self.expenses.write().await;
        match expenses.get(&id) {
            Some(existing) if existing.owner() == owner => {
                let updated = Expense::from_parts(id, owner, draft);
                expenses.insert(id, updated.clone());
                Ok(updated)
            }
            _ => Err(ExpenseStoreError::NotFound),
        }
    }

    async fn delete(&self, owner: AccountId, id: ExpenseId) -> Result<(), ExpenseStoreError> {
        let mut expenses = self.expenses.write().await;
        match expenses.get(&id) {
            Some(existing) if existing.owner() == owner => {
                expenses.remove(&id);
                Ok(())
            }
            _ => Err(ExpenseStoreError::NotFound),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailKind {
    Verification,
    PasswordReset,
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub kind: MailKind,
    pub token: String,
    pub code: String,
}

/// Records dispatched mails; flips to failure mode when `fail` is set.
#[derive(Default, Clone)]
pub struct RecordingMailer {
    pub sent: Arc<RwLock<Vec<SentMail>>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    async fn record(
        &self,
        recipient: &Email,
        kind: MailKind,
        token: &IssuedToken,
    ) -> Result<(), String> {
        if self.fail {
            return Err("transport unavailable".to_owned());
        }
        self.sent.write().await.push(SentMail {
            to: recipient.as_ref().expose_secret().clone(),
            kind,
            token: token.token().to_owned(),
            code: token.display_code(),
        });
        Ok(())
    }
}

#[async_trait]
impl AccountMailer for RecordingMailer {
    async fn send_verification_email(
        &self,
        recipient: &Email,
        _first_name: &str,
        token: &IssuedToken,
    ) -> Result<(), String> {
        self.record(recipient, MailKind::Verification, token).await
    }

    async fn send_password_reset_email(
        &self,
        recipient: &Email,
        _first_name: &str,
        token: &IssuedToken,
    ) -> Result<(), String> {
        self.record(recipient, MailKind::PasswordReset, token).await
    }
}

/// Transparent stand-in for the argon2 hasher.
#[derive(Default, Clone)]
pub struct StubPasswordHasher;

#[async_trait]
impl PasswordHasher for StubPasswordHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        expected: &PasswordHash,
        candidate: Password,
    ) -> Result<(), PasswordHasherError> {
        let candidate = format!("hashed:{}", candidate.as_ref().expose_secret());
        if expected.as_ref().expose_secret() == &candidate {
            Ok(())
        } else {
            Err(PasswordHasherError::IncorrectPassword)
        }
    }
}

pub fn email(address: &str) -> Email {
    Email::try_from(Secret::from(address.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

#[allow(unused)]
#[derive(Clone, Default)]
pub struct NullEmailClient;

#[async_trait]
impl EmailClient for NullEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        _subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        Ok(())
    }
}
