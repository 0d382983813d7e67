//! # Gatepost (Authentication & Request Authorization)
//!
//! `gatepost` is the authentication service of the Gatepost blogging
//! platform. It issues signed, time-bound session tokens at login and signup,
//! verifies them on protected requests, binds the verified identity into the
//! request context, and throttles repeated authentication attempts per
//! client.
//!
//! ## Session Tokens
//!
//! Tokens are compact HS256-signed tokens carrying a fixed claim shape
//! (subject id, email, optional display name, issued-at, expiration). Issuer
//! and verifier share one configured secret; tokens expire 24 hours after
//! issuance and there is no server-side revocation. Logout is client-side
//! token discard.
//!
//! ## Attempt Throttling
//!
//! Login and signup attempts are counted per client (first `X-Forwarded-For`
//! hop) and per endpoint class, inside a rolling window. The limiter is
//! advisory and in-process: counters reset on restart and instances do not
//! coordinate.
//!
//! ## User Store
//!
//! Account storage sits behind the [`store::UserStore`] trait, which reduces
//! every operation to a closed set of outcomes. The bundled
//! [`store::MemoryUserStore`] keeps the service complete and testable without
//! a database.

pub mod api;
pub mod auth;
pub mod cli;
pub(crate) mod clock;
pub mod store;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
