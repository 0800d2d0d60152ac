use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use spendlog_application::ResendVerificationUseCase;
use spendlog_core::{AccountMailer, AccountStore, Email, ValidationError};

use super::AuthTtls;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Option<Secret<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationResponse {
    pub message: String,
    pub email_sent: bool,
}

#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<A, M>(
    State((account_store, mailer, ttls)): State<(A, M, AuthTtls)>,
    Json(request): Json<ResendVerificationRequest>,
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

    let use_case = ResendVerificationUseCase::new(account_store, mailer, ttls.verification);
    let email_sent = use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(ResendVerificationResponse {
            message: "A new verification code has been issued".to_owned(),
            email_sent,
        }),
    ))
}
