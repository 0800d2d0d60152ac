use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::auth::{SessionConfig, create_removal_cookie};

/// Sessions are stateless, so logout is only the cookie removal; the
/// credential itself stays valid until its own expiry.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(State(session): State<SessionConfig>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(create_removal_cookie(&session.cookie_name));
    (jar, StatusCode::OK)
}
