use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use spendlog_application::VerifyEmailUseCase;
use spendlog_core::{AccountStore, VerificationAttempt};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    /// Either the full token from the email link or the 6-character code.
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyEmailResponse {
    pub message: String,
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<A>(
    State(account_store): State<A>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone + 'static,
{
    let attempt = VerificationAttempt::parse(request.token.as_deref().unwrap_or(""))?;

    let use_case = VerifyEmailUseCase::new(account_store);
    use_case.execute(attempt).await?;

    Ok((
        StatusCode::OK,
        Json(VerifyEmailResponse {
            message: "Email verified successfully".to_owned(),
        }),
    ))
}
