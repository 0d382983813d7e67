use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

use crate::api::handlers::{
    client_key, ensure_secret_configured, issue_session_token, normalize_email, SessionResponse,
};
use crate::api::{error::ApiError, state::AuthState};
use crate::auth::password::verify_password;
use crate::auth::throttle::{AttemptKind, Decision};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    /// Email address used as the account identifier.
    username: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/api/v1/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful, session token issued", body = SessionResponse, content_type = "application/json"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Password does not match"),
        (status = 404, description = "No user with the specified email"),
        (status = 429, description = "Too many attempts from this client"),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    Extension(state): Extension<Arc<AuthState>>,
    headers: HeaderMap,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::InvalidRequest("Missing payload".to_string()));
    };

    let email = normalize_email(&request.username);
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Missing username or password".to_string(),
        ));
    }

    match state
        .throttle()
        .check_and_record(&client_key(&headers), AttemptKind::Login)
    {
        Decision::Allowed => (),
        Decision::Limited { retry_after_unix } => {
            debug!("login attempt budget exhausted for client");
            return Err(ApiError::ThrottleExceeded { retry_after_unix });
        }
    }

    ensure_secret_configured(&state)?;

    let user = state
        .store()
        .find_by_email(&email)
        .await
        .map_err(|err| {
            error!("user store error: {err}");
            ApiError::Internal
        })?
        .ok_or(ApiError::UserNotFound)?;

    let matches = verify_password(&request.password, &user.password_hash).map_err(|err| {
        error!("failed to verify password digest: {err}");
        ApiError::Internal
    })?;
    if !matches {
        debug!("password mismatch");
        return Err(ApiError::CredentialMismatch);
    }

    let token = issue_session_token(&state, &user)?;

    Ok((
        StatusCode::OK,
        Json(SessionResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            token,
            message: "Login successful".to_string(),
        }),
    ))
}
