//! In-memory provider
//!
//! Keeps every table in a `RwLock`-guarded map. Used in tests and wherever a
//! process-local store is enough.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use account_actions::{
    Profile, PromotionStore, Registration, RegistrationStore, StoreError, User, UserId,
};

/// In-memory storage provider
pub struct MemoryStore {
    /// User records by id
    users: RwLock<HashMap<UserId, User>>,
    /// Profile rows by owning user id
    profiles: RwLock<HashMap<UserId, Profile>>,
    /// Next id to hand out
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored user records
    pub fn user_count(&self) -> usize {
        self.users.read().unwrap().len()
    }

    /// Look up a stored profile row
    pub fn profile(&self, user_id: UserId) -> Option<Profile> {
        self.profiles.read().unwrap().get(&user_id).cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn save_user(&self, registration: &Registration) -> Result<Option<UserId>, StoreError> {
        let mut users = self.users.write().unwrap();

        if users.values().any(|u| u.email == registration.email) {
            debug!(email = %registration.email, "email already taken");
            return Ok(None);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(
            id,
            User {
                id,
                email: registration.email.clone(),
                nickname: registration.nickname.clone(),
                admin: false,
                created_at: Utc::now(),
            },
        );

        debug!(email = %registration.email, id, "user record created");
        Ok(Some(id))
    }

    async fn save_profile(&self, user_id: UserId, nickname: &str) -> Result<(), StoreError> {
        self.profiles.write().unwrap().insert(
            user_id,
            Profile {
                user_id,
                nickname: nickname.to_string(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl PromotionStore<User> for MemoryStore {
    async fn user_by_id(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().unwrap().get(&user_id).cloned())
    }

    async fn save_user(&self, user_id: UserId, user: &User) -> Result<(), StoreError> {
        self.users.write().unwrap().insert(user_id, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registration() -> Registration {
        Registration {
            email: "user123@gmail.com".to_string(),
            nickname: "user_123".to_string(),
        }
    }

    #[smol_potat::test]
    async fn test_duplicate_email_yields_no_id() {
        let store = MemoryStore::new();

        let first = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap();
        assert!(first.is_some());

        let second = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap();
        assert_eq!(second, None);
        assert_eq!(store.user_count(), 1);
    }

    #[smol_potat::test]
    async fn test_fetch_and_write_back() {
        let store = MemoryStore::new();
        let id = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap()
            .unwrap();

        let mut user = store.user_by_id(id).await.unwrap().unwrap();
        assert!(!user.admin);

        user.admin = true;
        PromotionStore::save_user(&store, id, &user).await.unwrap();

        let reread = store.user_by_id(id).await.unwrap().unwrap();
        assert!(reread.admin);
        assert_eq!(reread.email, "user123@gmail.com");
    }

    #[smol_potat::test]
    async fn test_unknown_id_yields_none() {
        let store = MemoryStore::new();
        assert_eq!(store.user_by_id(999).await.unwrap(), None);
    }
}
