//! User storage port.
//!
//! The route layer never inspects storage error internals; stores reduce
//! every operation to a closed set of outcomes that handlers map to status
//! codes. Infrastructure failures surface as plain errors and become 500s.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// A stored account. The digest never leaves the auth handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(User),
    Conflict,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user, or report a conflict when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<CreateOutcome>;

    /// Look up a user by (already normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Process-local store keyed by email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<CreateOutcome> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);

        if users.contains_key(&new_user.email) {
            return Ok(CreateOutcome::Conflict);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email.clone(),
            name: new_user.name,
            password_hash: new_user.password_hash,
        };
        users.insert(new_user.email, user.clone());

        Ok(CreateOutcome::Created(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(email).cloned())
    }
}
