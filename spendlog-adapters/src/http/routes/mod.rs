pub mod error;
pub mod expenses;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod register;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;

pub use error::{ApiError, ErrorResponse};
pub use expenses::{
    ExpenseRequest, ExpenseResponse, add_expense, delete_expense, list_expenses, update_expense,
};
pub use forgot_password::{ForgotPasswordRequest, forgot_password};
pub use login::{LoginRequest, LoginResponse, login};
pub use logout::logout;
pub use register::{RegisterRequest, RegisterResponse, register};
pub use resend_verification::{ResendVerificationRequest, resend_verification};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use verify_email::{VerifyEmailRequest, verify_email};

use chrono::Duration;

use crate::config::settings::AppSetting;

/// Single-purpose token lifetimes, threaded into the routes that issue
/// tokens so tests can shrink them.
#[derive(Debug, Clone, Copy)]
pub struct AuthTtls {
    pub verification: Duration,
    pub reset: Duration,
}

impl AuthTtls {
    pub fn from_settings() -> Self {
        let settings = AppSetting::load();
        Self {
            verification: Duration::seconds(settings.auth.verification_token_ttl_seconds),
            reset: Duration::seconds(settings.auth.reset_token_ttl_seconds),
        }
    }
}
