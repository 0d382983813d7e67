//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes, carrying the
//! full server configuration.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let secret = matches
        .get_one::<String>("secret")
        .cloned()
        .context("missing required argument: --secret")?;
    let frontend_base_url = matches
        .get_one::<String>("frontend-url")
        .cloned()
        .unwrap_or_else(|| "http://localhost:5173".to_string());
    let max_attempts = matches.get_one::<u32>("max-attempts").copied().unwrap_or(20);
    let window_seconds = matches
        .get_one::<i64>("throttle-window")
        .copied()
        .unwrap_or(3600);

    Ok(Action::Server(Args {
        port,
        secret: SecretString::from(secret),
        frontend_base_url,
        max_attempts,
        window_seconds,
    }))
}
