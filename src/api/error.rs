//! API error taxonomy and response mapping.
//!
//! Every rejection serializes to a small JSON object carrying a stable
//! machine-checkable `error` reason and a human-readable `message`. Internal
//! detail stays in logs. All token failures collapse into one generic
//! message so callers cannot probe which verification step failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("no token provided")]
    MissingCredential,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("signing secret is not configured")]
    ServerMisconfigured,
    #[error("attempt budget exhausted, retry after {retry_after_unix}")]
    ThrottleExceeded { retry_after_unix: i64 },
    #[error("password mismatch")]
    CredentialMismatch,
    #[error("user not found")]
    UserNotFound,
    #[error("email already exists")]
    EmailExists,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::InvalidToken | Self::CredentialMismatch => {
                StatusCode::UNAUTHORIZED
            }
            Self::ServerMisconfigured | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ThrottleExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmailExists => StatusCode::CONFLICT,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable reason string for machine checks.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidToken => "invalid_token",
            Self::ServerMisconfigured => "server_misconfigured",
            Self::ThrottleExceeded { .. } => "throttled",
            Self::CredentialMismatch => "invalid_credentials",
            Self::UserNotFound => "user_not_found",
            Self::EmailExists => "email_exists",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Internal => "internal",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingCredential => "No token provided".to_string(),
            Self::InvalidToken => "Invalid or expired token".to_string(),
            Self::ServerMisconfigured => "Server configuration error".to_string(),
            Self::ThrottleExceeded { .. } => "Too many attempts, retry later".to_string(),
            Self::CredentialMismatch => "Invalid password".to_string(),
            Self::UserNotFound => "User not found".to_string(),
            Self::EmailExists => "Email already exists".to_string(),
            Self::InvalidRequest(message) => message.clone(),
            Self::Internal => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.reason(),
            "message": self.message(),
        });
        if let Self::ThrottleExceeded { retry_after_unix } = self {
            body["retry_after"] = json!(retry_after_unix);
        }
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::MissingCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::ServerMisconfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ThrottleExceeded {
                retry_after_unix: 0
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(ApiError::CredentialMismatch.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::EmailExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn token_failures_share_a_generic_message() {
        // One message for signature, structure, and expiry failures.
        assert_eq!(ApiError::InvalidToken.message(), "Invalid or expired token");
    }

    #[test]
    fn throttle_response_carries_retry_after() {
        let response = ApiError::ThrottleExceeded {
            retry_after_unix: 1_700_000_000,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn reasons_are_stable() {
        assert_eq!(ApiError::MissingCredential.reason(), "missing_credential");
        assert_eq!(ApiError::InvalidToken.reason(), "invalid_token");
        assert_eq!(
            ApiError::ThrottleExceeded {
                retry_after_unix: 0
            }
            .reason(),
            "throttled"
        );
    }
}
