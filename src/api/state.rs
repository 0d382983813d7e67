//! Shared auth state and configuration for the HTTP layer.

use secrecy::SecretString;
use std::sync::Arc;

use crate::auth::throttle::AttemptThrottle;
use crate::store::UserStore;

const DEFAULT_FRONTEND_BASE_URL: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    secret: SecretString,
    frontend_base_url: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            frontend_base_url: DEFAULT_FRONTEND_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_frontend_base_url(mut self, frontend_base_url: String) -> Self {
        self.frontend_base_url = frontend_base_url;
        self
    }

    pub(crate) fn secret(&self) -> &SecretString {
        &self.secret
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }
}

pub struct AuthState {
    config: AuthConfig,
    throttle: AttemptThrottle,
    store: Arc<dyn UserStore>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, throttle: AttemptThrottle, store: Arc<dyn UserStore>) -> Self {
        Self {
            config,
            throttle,
            store,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(crate) fn secret(&self) -> &SecretString {
        self.config.secret()
    }

    pub(crate) fn throttle(&self) -> &AttemptThrottle {
        &self.throttle
    }

    pub(crate) fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::throttle::ThrottleConfig;
    use crate::store::MemoryUserStore;
    use secrecy::ExposeSecret;

    #[test]
    fn config_defaults_and_overrides() {
        let config = AuthConfig::new(SecretString::from("s3cr3t".to_string()));
        assert_eq!(config.frontend_base_url(), DEFAULT_FRONTEND_BASE_URL);
        assert_eq!(config.secret().expose_secret(), "s3cr3t");

        let config = config.with_frontend_base_url("https://blog.example".to_string());
        assert_eq!(config.frontend_base_url(), "https://blog.example");
    }

    #[test]
    fn state_exposes_components() {
        let state = AuthState::new(
            AuthConfig::new(SecretString::from("s3cr3t".to_string())),
            AttemptThrottle::new(ThrottleConfig::default()),
            Arc::new(MemoryUserStore::default()),
        );
        assert_eq!(state.secret().expose_secret(), "s3cr3t");
    }
}
