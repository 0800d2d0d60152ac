use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use spendlog_application::LoginUseCase;
use spendlog_core::{AccountStore, Email, Password, PasswordHasher, ValidationError};

use crate::auth::{SessionConfig, create_session_cookie, generate_session_token};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<A, H>(
    State((account_store, password_hasher, session)): State<(A, H, SessionConfig)>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    A: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let email = Email::try_from(
        request
            .email
            .ok_or(ValidationError::MissingField("email"))?,
    )?;
    // A candidate that fails password validation can never match a stored
    // hash, so it reports the same way a wrong password does.
    let password = Password::try_from(
        request
            .password
            .ok_or(ValidationError::MissingField("password"))?,
    )
    .map_err(|_| ApiError::InvalidCredentials)?;

    let use_case = LoginUseCase::new(account_store, password_hasher);
    let authenticated = use_case.execute(email, password).await?;

    let token = generate_session_token(
        authenticated.id,
        session.time_to_live_seconds,
        session.secret_bytes(),
    )?;
    let jar = jar.add(create_session_cookie(token.clone(), &session.cookie_name));

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(LoginResponse {
                message: format!("welcome back {}", authenticated.first_name),
                token,
            }),
        ),
    ))
}
