//! Bearer-token gate for protected routes.
//!
//! Verifies `Authorization: Bearer <token>` on every request under the gate,
//! binds the verified [`Identity`] into request extensions for downstream
//! handlers, and rejects everything else. Login and signup are recognized
//! and skipped because no identity exists yet at that point in the flow.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, error};

use crate::api::{error::ApiError, state::AuthState};
use crate::clock::unix_now;
use crate::token::{self, Identity};

/// Paths under the gate that must work before any identity exists.
const EXEMPT_SUFFIXES: [&str; 2] = ["/login", "/signup"];

/// Gate a request: exempt paths pass through, everything else needs a valid
/// bearer token. On success the identity is attached to the request's
/// extensions, readable (not mutable) by downstream handlers.
pub async fn authorize(
    Extension(state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_exempt(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let identity = verify_request(request.headers(), &state, unix_now())?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

fn verify_request(
    headers: &HeaderMap,
    state: &AuthState,
    now_unix_seconds: i64,
) -> Result<Identity, ApiError> {
    let token = extract_bearer_token(headers).ok_or(ApiError::MissingCredential)?;

    let secret = state.secret().expose_secret();
    if secret.is_empty() {
        error!("signing secret is not configured");
        return Err(ApiError::ServerMisconfigured);
    }

    match token::verify_hs256(&token, secret.as_bytes(), now_unix_seconds) {
        Ok(claims) => Ok(claims.identity()),
        Err(err) => {
            debug!("token verification failed: {err}");
            Err(ApiError::InvalidToken)
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::AuthConfig;
    use crate::auth::throttle::{AttemptThrottle, ThrottleConfig};
    use crate::store::MemoryUserStore;
    use crate::token::{sign_hs256, SessionTokenClaims, TOKEN_TTL_SECONDS};
    use axum::http::HeaderValue;
    use secrecy::SecretString;

    const NOW: i64 = 1_700_000_000;

    fn state(secret: &str) -> AuthState {
        AuthState::new(
            AuthConfig::new(SecretString::from(secret.to_string())),
            AttemptThrottle::new(ThrottleConfig::default()),
            Arc::new(MemoryUserStore::default()),
        )
    }

    fn identity() -> Identity {
        Identity {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: None,
        }
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn exempt_paths_bypass_the_gate() {
        assert!(is_exempt("/api/v1/login"));
        assert!(is_exempt("/api/v1/signup"));
        assert!(!is_exempt("/api/v1/me"));
        assert!(!is_exempt("/api/v1/login/audit"));
    }

    #[test]
    fn extract_bearer_token_requires_bearer_shape() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer  abc "));
        assert_eq!(extract_bearer_token(&headers), Some("abc".to_string()));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn missing_header_is_missing_credential() {
        let err = verify_request(&HeaderMap::new(), &state("s3cr3t"), NOW).unwrap_err();
        assert_eq!(err, ApiError::MissingCredential);
    }

    #[test]
    fn empty_secret_is_a_server_fault() {
        let headers = bearer_headers("anything");
        let err = verify_request(&headers, &state(""), NOW).unwrap_err();
        assert_eq!(err, ApiError::ServerMisconfigured);
    }

    #[test]
    fn valid_token_yields_identity() {
        let claims = SessionTokenClaims::new(&identity(), NOW);
        let token = sign_hs256(b"s3cr3t", &claims).unwrap();

        let resolved = verify_request(&bearer_headers(&token), &state("s3cr3t"), NOW + 1).unwrap();
        assert_eq!(resolved, identity());
    }

    #[test]
    fn bad_or_expired_tokens_map_to_invalid_token() {
        let claims = SessionTokenClaims::new(&identity(), NOW);
        let token = sign_hs256(b"s3cr3t", &claims).unwrap();

        // Wrong secret, garbage, and expiry all surface the same way.
        let err = verify_request(&bearer_headers(&token), &state("other"), NOW + 1).unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);

        let err =
            verify_request(&bearer_headers("not-a-token"), &state("s3cr3t"), NOW).unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);

        let err = verify_request(
            &bearer_headers(&token),
            &state("s3cr3t"),
            NOW + TOKEN_TTL_SECONDS + 1,
        )
        .unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);
    }
}
