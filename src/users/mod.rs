//! In-memory credential store.
//!
//! The store is loaded once at process start and read-only afterwards, so
//! it can be shared across workers behind an `Arc` without locking.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

#[derive(Debug, Clone)]
pub struct UserStore {
    credentials: Vec<Credential>,
}

impl UserStore {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// The single account the gateway ships with.
    pub fn with_defaults() -> Self {
        Self::new(vec![Credential::new(
            "testing@test.com".to_string(),
            "changeme".to_string(),
        )])
    }

    /// First credential whose username matches exactly. Case-sensitive;
    /// uniqueness is by construction, not enforced.
    pub fn find(&self, username: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exact_match() {
        let store = UserStore::with_defaults();
        let found = store.find("testing@test.com").expect("seeded user");
        assert_eq!(found.password, "changeme");
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let store = UserStore::with_defaults();
        assert!(store.find("Testing@Test.com").is_none());
    }

    #[test]
    fn test_find_unknown_user() {
        let store = UserStore::with_defaults();
        assert!(store.find("nobody@test.com").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let store = UserStore::new(vec![
            Credential::new("dup@test.com".to_string(), "first".to_string()),
            Credential::new("dup@test.com".to_string(), "second".to_string()),
        ]);
        assert_eq!(store.find("dup@test.com").unwrap().password, "first");
    }
}
