pub mod health;
pub use self::health::health;

pub mod user_signup;
pub use self::user_signup::signup;

pub mod user_login;
pub use self::user_login::login;

pub mod me;
pub use self::me::me;

// common functions and types for the handlers
use axum::http::HeaderMap;
use regex::Regex;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::{error::ApiError, state::AuthState};
use crate::auth::throttle::UNKNOWN_CLIENT;
use crate::clock::unix_now;
use crate::store::User;
use crate::token::{self, Identity, SessionTokenClaims};

/// Body returned by both login and signup on success.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub token: String,
    pub message: String,
}

pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Throttle key: first hop of `X-Forwarded-For`, or the "unknown" sentinel.
pub(crate) fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| UNKNOWN_CLIENT.to_string(), str::to_string)
}

/// A missing secret is a configuration fault, not a client error.
pub(crate) fn ensure_secret_configured(state: &AuthState) -> Result<(), ApiError> {
    if state.secret().expose_secret().is_empty() {
        error!("signing secret is not configured");
        return Err(ApiError::ServerMisconfigured);
    }
    Ok(())
}

/// Issue a session token for a stored user.
pub(crate) fn issue_session_token(state: &AuthState, user: &User) -> Result<String, ApiError> {
    ensure_secret_configured(state)?;

    let identity = Identity {
        id: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
    };
    let claims = SessionTokenClaims::new(&identity, unix_now());

    token::sign_hs256(state.secret().expose_secret().as_bytes(), &claims).map_err(|err| {
        error!("failed to sign session token: {err}");
        ApiError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("spaced @example.com"));
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn client_key_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.2.3.4, 5.6.7.8"),
        );
        assert_eq!(client_key(&headers), "1.2.3.4");
    }

    #[test]
    fn client_key_falls_back_to_sentinel() {
        assert_eq!(client_key(&HeaderMap::new()), UNKNOWN_CLIENT);

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(client_key(&headers), UNKNOWN_CLIENT);
    }
}
