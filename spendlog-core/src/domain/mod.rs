pub mod account;
pub mod email;
pub mod expense;
pub mod password;
pub mod person_name;
pub mod token;

use thiserror::Error;

/// Input validation failures safe to echo back to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields must be filled")]
    MissingField(&'static str),

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password must contain at least 6 characters")]
    PasswordTooShort,

    #[error("Expense title must not be empty")]
    EmptyTitle,

    #[error("Expense amount must be greater than zero")]
    NonPositiveAmount,
}
