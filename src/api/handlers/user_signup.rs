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
    client_key, ensure_secret_configured, issue_session_token, normalize_email, valid_email,
    SessionResponse,
};
use crate::api::{error::ApiError, state::AuthState};
use crate::auth::password::hash_password;
use crate::auth::throttle::{AttemptKind, Decision};
use crate::store::{CreateOutcome, NewUser};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    /// Email address used as the account identifier.
    username: String,
    password: String,
    name: Option<String>,
}

#[utoipa::path(
    post,
    path= "/api/v1/signup",
    request_body = SignupRequest,
    responses (
        (status = 201, description = "Account created, session token issued", body = SessionResponse, content_type = "application/json"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "A user with the specified email already exists"),
        (status = 429, description = "Too many attempts from this client"),
    ),
    tag= "auth"
)]
#[instrument(skip_all)]
pub async fn signup(
    Extension(state): Extension<Arc<AuthState>>,
    headers: HeaderMap,
    payload: Option<Json<SignupRequest>>,
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

    if !valid_email(&email) {
        return Err(ApiError::InvalidRequest("Invalid email".to_string()));
    }

    match state
        .throttle()
        .check_and_record(&client_key(&headers), AttemptKind::Signup)
    {
        Decision::Allowed => (),
        Decision::Limited { retry_after_unix } => {
            debug!("signup attempt budget exhausted for client");
            return Err(ApiError::ThrottleExceeded { retry_after_unix });
        }
    }

    ensure_secret_configured(&state)?;

    let password_hash = hash_password(&request.password).map_err(|err| {
        error!("failed to hash password: {err}");
        ApiError::Internal
    })?;

    let name = request.name.filter(|name| !name.trim().is_empty());
    let outcome = state
        .store()
        .create(NewUser {
            email,
            name,
            password_hash,
        })
        .await
        .map_err(|err| {
            error!("user store error: {err}");
            ApiError::Internal
        })?;

    let user = match outcome {
        CreateOutcome::Created(user) => user,
        CreateOutcome::Conflict => return Err(ApiError::EmailExists),
    };

    let token = issue_session_token(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            token,
            message: "Signup successful".to_string(),
        }),
    ))
}
