use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use spendlog_application::RequestPasswordResetUseCase;
use spendlog_core::{AccountMailer, AccountStore, Email, ValidationError};

use super::AuthTtls;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
}

/// Answers 200 whether or not the address is registered, so the endpoint
/// cannot be used to enumerate accounts.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<A, M>(
    State((account_store, mailer, ttls)): State<(A, M, AuthTtls)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone + 'static,
    M: AccountMailer + Clone + 'static,
{
    let email = Email::try_from(
        request
            .email
            .ok_or(ValidationError::MissingField("email"))?,
    )?;

    let use_case = RequestPasswordResetUseCase::new(account_store, mailer, ttls.reset);
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(ForgotPasswordResponse {
            message: "If that email is registered, a password reset link has been sent".to_owned(),
        }),
    ))
}
