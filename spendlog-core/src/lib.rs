pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    ValidationError,
    account::{Account, AccountId},
    email::Email,
    expense::{Amount, Category, Expense, ExpenseDraft, ExpenseId},
    password::{Password, PasswordHash},
    person_name::PersonName,
    token::{IssuedToken, TokenState, VerificationAttempt},
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError, ExpenseStore, ExpenseStoreError},
    services::{AccountMailer, EmailClient, PasswordHasher, PasswordHasherError},
};
