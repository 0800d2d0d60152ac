use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId},
    email::Email,
    expense::{Expense, ExpenseDraft, ExpenseId},
    token::VerificationAttempt,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateEmail, Self::DuplicateEmail)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Durable record of account identity, password hash and token state.
///
/// Email uniqueness is the store's responsibility: a concurrent duplicate
/// registration must yield exactly one winner and `DuplicateEmail` for the
/// loser. Token lookups return matches regardless of expiry so callers can
/// distinguish an expired token from an unknown one against a single clock
/// read. `update` persists the whole record in one atomic write.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;
    async fn find_by_verification_token(
        &self,
        attempt: &VerificationAttempt,
    ) -> Result<Option<Account>, AccountStoreError>;
    async fn find_by_reset_token(&self, token: &str)
    -> Result<Option<Account>, AccountStoreError>;
    async fn update(&self, account: &Account) -> Result<(), AccountStoreError>;
}

// ExpenseStore port trait and errors
#[derive(Debug, Error)]
pub enum ExpenseStoreError {
    #[error("Expense not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ExpenseStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Expense records scoped by owner. Every query filters on the owner id, so
/// another account's record is indistinguishable from a missing one.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn add(&self, expense: Expense) -> Result<(), ExpenseStoreError>;
    /// Owner's expenses, newest date first.
    async fn list_for_owner(&self, owner: AccountId) -> Result<Vec<Expense>, ExpenseStoreError>;
    async fn update(
        &self,
        owner: AccountId,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseStoreError>;
    async fn delete(&self, owner: AccountId, id: ExpenseId) -> Result<(), ExpenseStoreError>;
}
