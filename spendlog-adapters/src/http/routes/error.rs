use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use spendlog_application::{
    AddExpenseError, DeleteExpenseError, ListExpensesError, LoginError, RegisterError,
    RequestPasswordResetError, ResendVerificationError, ResetPasswordError, UpdateExpenseError,
    VerifyEmailError,
};
use spendlog_core::{AccountStoreError, ExpenseStoreError, PasswordHasherError, ValidationError};
use thiserror::Error;

use crate::auth::SessionTokenError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User already exists")]
    DuplicateEmail,

    /// One shape for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please verify your email before logging in")]
    NotVerified,

    /// One shape for missing, malformed, expired and badly signed session
    /// credentials.
    #[error("Authentication required")]
    Unauthenticated,

    #[error("User not found")]
    AccountNotFound,

    #[error("Expense not found")]
    ExpenseNotFound,

    #[error("Invalid verification token")]
    InvalidVerificationToken,

    #[error("Verification token has expired")]
    VerificationTokenExpired,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredResetToken,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_)
            | ApiError::InvalidVerificationToken
            | ApiError::VerificationTokenExpired
            | ApiError::AlreadyVerified
            | ApiError::InvalidOrExpiredResetToken => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),

            ApiError::InvalidCredentials | ApiError::NotVerified | ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            ApiError::AccountNotFound | ApiError::ExpenseNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::UnexpectedError(ref detail) => {
                tracing::error!(error = %detail, "request failed unexpectedly");
                let message = if cfg!(debug_assertions) {
                    self.to_string()
                } else {
                    "Something went wrong".to_owned()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::DuplicateEmail => ApiError::DuplicateEmail,
            AccountStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ExpenseStoreError> for ApiError {
    fn from(error: ExpenseStoreError) -> Self {
        match error {
            ExpenseStoreError::NotFound => ApiError::ExpenseNotFound,
            ExpenseStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<PasswordHasherError> for ApiError {
    fn from(error: PasswordHasherError) -> Self {
        // Hashing a new password has no "incorrect" outcome; anything that
        // surfaces here is unexpected.
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<SessionTokenError> for ApiError {
    fn from(error: SessionTokenError) -> Self {
        match error {
            SessionTokenError::MissingToken | SessionTokenError::InvalidToken => {
                ApiError::Unauthenticated
            }
            SessionTokenError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::AccountStoreError(e) => e.into(),
            RegisterError::PasswordHasherError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::NotVerified => ApiError::NotVerified,
            LoginError::AccountStoreError(e) => e.into(),
            LoginError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::InvalidToken => ApiError::InvalidVerificationToken,
            VerifyEmailError::Expired => ApiError::VerificationTokenExpired,
            VerifyEmailError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ResendVerificationError> for ApiError {
    fn from(error: ResendVerificationError) -> Self {
        match error {
            ResendVerificationError::NotFound => ApiError::AccountNotFound,
            ResendVerificationError::AlreadyVerified => ApiError::AlreadyVerified,
            ResendVerificationError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<RequestPasswordResetError> for ApiError {
    fn from(error: RequestPasswordResetError) -> Self {
        match error {
            RequestPasswordResetError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidOrExpiredToken => ApiError::InvalidOrExpiredResetToken,
            ResetPasswordError::AccountStoreError(e) => e.into(),
            ResetPasswordError::PasswordHasherError(e) => e.into(),
        }
    }
}

impl From<AddExpenseError> for ApiError {
    fn from(error: AddExpenseError) -> Self {
        match error {
            AddExpenseError::ExpenseStoreError(e) => e.into(),
        }
    }
}

impl From<ListExpensesError> for ApiError {
    fn from(error: ListExpensesError) -> Self {
        match error {
            ListExpensesError::ExpenseStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateExpenseError> for ApiError {
    fn from(error: UpdateExpenseError) -> Self {
        match error {
            UpdateExpenseError::NotFound => ApiError::ExpenseNotFound,
            UpdateExpenseError::ExpenseStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteExpenseError> for ApiError {
    fn from(error: DeleteExpenseError) -> Self {
        match error {
            DeleteExpenseError::NotFound => ApiError::ExpenseNotFound,
            DeleteExpenseError::ExpenseStoreError(e) => e.into(),
        }
    }
}
