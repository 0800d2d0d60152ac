pub mod use_cases;

pub use use_cases::{
    add_expense::{AddExpenseError, AddExpenseUseCase},
    delete_expense::{DeleteExpenseError, DeleteExpenseUseCase},
    list_expenses::{ListExpensesError, ListExpensesUseCase},
    login::{AuthenticatedAccount, LoginError, LoginUseCase},
    register::{RegisterError, RegisterUseCase, Registration},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
    resend_verification::{ResendVerificationError, ResendVerificationUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    update_expense::{UpdateExpenseError, UpdateExpenseUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};

#[cfg(test)]
pub(crate) mod test_support;
