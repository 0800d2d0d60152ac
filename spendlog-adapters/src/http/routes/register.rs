use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use spendlog_application::RegisterUseCase;
use spendlog_core::{
    AccountId, AccountMailer, AccountStore, Email, Password, PasswordHasher, PersonName,
    ValidationError,
};

use super::AuthTtls;
use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: AccountId,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub verification_email_sent: bool,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<A, H, M>(
    State((account_store, password_hasher, mailer, ttls)): State<(A, H, M, AuthTtls)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    M: AccountMailer + Clone + 'static,
{
    let email = Email::try_from(
        request
            .email
            .ok_or(ValidationError::MissingField("email"))?,
    )?;
    let password = Password::try_from(
        request
            .password
            .ok_or(ValidationError::MissingField("password"))?,
    )?;
    let name = PersonName::new(
        request.firstname.as_deref().unwrap_or(""),
        request.lastname.as_deref().unwrap_or(""),
    )?;

    let use_case = RegisterUseCase::new(account_store, password_hasher, mailer, ttls.verification);
    let registration = use_case.execute(email, name, password).await?;

    let account = registration.account;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: account.id(),
            email: account.email().as_ref().expose_secret().clone(),
            firstname: account.name().first().to_owned(),
            lastname: account.name().last().to_owned(),
            verification_email_sent: registration.verification_email_sent,
        }),
    ))
}
