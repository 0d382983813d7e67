use crate::api;
use crate::api::state::{AuthConfig, AuthState};
use crate::auth::throttle::{AttemptThrottle, ThrottleConfig};
use crate::store::MemoryUserStore;
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub secret: SecretString,
    pub frontend_base_url: String,
    pub max_attempts: u32,
    pub window_seconds: i64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let config = AuthConfig::new(args.secret).with_frontend_base_url(args.frontend_base_url);
    let throttle = AttemptThrottle::new(ThrottleConfig {
        max_attempts: args.max_attempts,
        window_seconds: args.window_seconds,
    });
    let state = Arc::new(AuthState::new(
        config,
        throttle,
        Arc::new(MemoryUserStore::default()),
    ));

    api::new(args.port, state).await
}
