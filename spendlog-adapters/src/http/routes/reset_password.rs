use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use spendlog_application::ResetPasswordUseCase;
use spendlog_core::{AccountStore, Password, PasswordHasher, ValidationError};

use super::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub new_password: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<A, H>(
    State((account_store, password_hasher)): State<(A, H)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let token = request
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or(ValidationError::MissingField("token"))?;
    let new_password = Password::try_from(
        request
            .new_password
            .ok_or(ValidationError::MissingField("newPassword"))?,
    )?;

    let use_case = ResetPasswordUseCase::new(account_store, password_hasher);
    use_case.execute(&token, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(ResetPasswordResponse {
            message: "Password has been reset successfully".to_owned(),
        }),
    ))
}
