//! In-memory user store.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub account: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
}

/// Process-wide repository shared by the demo controllers.
pub fn users() -> &'static InMemoryUserRepository {
    static USERS: OnceLock<InMemoryUserRepository> = OnceLock::new();
    USERS.get_or_init(InMemoryUserRepository::new)
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new user. Returns `None` when the account is already taken.
    pub fn save(&self, account: &str, password: &str, email: &str) -> Option<User> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(account) {
            return None;
        }
        let user = User {
            id: users.len() as u64 + 1,
            account: account.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        };
        users.insert(account.to_string(), user.clone());
        Some(user)
    }

    pub fn find_by_account(&self, account: &str) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(account)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
