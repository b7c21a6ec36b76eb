//! In-memory user store
//!
//! Keeps the default-profile claims of each user in memory. Reads and writes
//! for users that were never added fail like they would in a real store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use idv_core::UserStore;

/// User store holding claims in memory
pub struct InMemoryUserStore {
    domain: String,
    users: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryUserStore {
    /// Create an empty store with the given domain name (e.g. `PRIMARY`)
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Add a user with initial claims, replacing any existing user of that name
    pub async fn add_user(&self, username: &str, claims: HashMap<String, String>) {
        self.users.write().await.insert(username.to_string(), claims);
    }

    /// All claims of a user
    pub async fn claims_of(&self, username: &str) -> Option<HashMap<String, String>> {
        self.users.read().await.get(username).cloned()
    }
}

fn user_not_found(username: &str) -> String {
    format!("User {} does not exist", username)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    fn domain_name(&self) -> String {
        self.domain.clone()
    }

    async fn get_claim(&self, username: &str, claim_uri: &str) -> Result<Option<String>, String> {
        let users = self.users.read().await;
        let claims = users.get(username).ok_or_else(|| user_not_found(username))?;
        Ok(claims.get(claim_uri).cloned())
    }

    async fn get_claims(
        &self,
        username: &str,
        claim_uris: &[&str],
    ) -> Result<HashMap<String, String>, String> {
        let users = self.users.read().await;
        let claims = users.get(username).ok_or_else(|| user_not_found(username))?;
        Ok(claim_uris
            .iter()
            .filter_map(|uri| claims.get(*uri).map(|value| (uri.to_string(), value.clone())))
            .collect())
    }

    async fn set_claims(&self, username: &str, claims: HashMap<String, String>) -> Result<(), String> {
        let mut users = self.users.write().await;
        let existing = users.get_mut(username).ok_or_else(|| user_not_found(username))?;
        existing.extend(claims);
        Ok(())
    }
}
