//! Sled-backed provider
//!
//! Three trees: `users` keyed by big-endian id, `profiles` keyed the same
//! way, and `email_index` mapping email to id for the uniqueness check.
//! Values are JSON-encoded; writes are flushed before the operation returns.

use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use tracing::{debug, error, info};

use account_actions::{
    Profile, PromotionStore, Registration, RegistrationStore, StoreError, User, UserId,
};

use crate::config::StoreConfig;

/// Sled-backed storage provider
pub struct SledStore {
    /// Database instance
    db: sled::Db,
    /// User records
    users: sled::Tree,
    /// Profile rows
    profiles: sled::Tree,
    /// Email uniqueness index
    email_index: sled::Tree,
}

impl SledStore {
    /// Open (or create) a database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        info!("Opening sled database at {:?}", path);
        let db = sled::open(path).map_err(to_backend)?;
        Self::with_db(db)
    }

    /// Create a temporary in-memory database (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        info!("Creating in-memory sled database");
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(to_backend)?;
        Self::with_db(db)
    }

    /// Open the store described by a configuration
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match &config.storage.path {
            Some(path) => Self::open(path),
            None => Self::in_memory(),
        }
    }

    fn with_db(db: sled::Db) -> Result<Self, StoreError> {
        let users = db.open_tree("users").map_err(to_backend)?;
        let profiles = db.open_tree("profiles").map_err(to_backend)?;
        let email_index = db.open_tree("email_index").map_err(to_backend)?;

        Ok(Self {
            db,
            users,
            profiles,
            email_index,
        })
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.db.flush_async().await.map_err(to_backend)?;
        Ok(())
    }
}

fn to_backend(err: sled::Error) -> StoreError {
    StoreError::backend(err.to_string())
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|e| StoreError::serialization(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::serialization(e.to_string()))
}

#[async_trait]
impl RegistrationStore for SledStore {
    async fn save_user(&self, registration: &Registration) -> Result<Option<UserId>, StoreError> {
        debug!(email = %registration.email, "saving user");

        let taken = self
            .email_index
            .contains_key(registration.email.as_bytes())
            .map_err(to_backend)?;
        if taken {
            debug!(email = %registration.email, "email already taken");
            return Ok(None);
        }

        let id = self.db.generate_id().map_err(to_backend)?;
        let user = User {
            id,
            email: registration.email.clone(),
            nickname: registration.nickname.clone(),
            admin: false,
            created_at: Utc::now(),
        };

        self.users
            .insert(id.to_be_bytes(), encode(&user)?)
            .map_err(to_backend)?;
        self.email_index
            .insert(registration.email.as_bytes(), id.to_be_bytes().to_vec())
            .map_err(to_backend)?;
        self.flush().await?;

        Ok(Some(id))
    }

    async fn save_profile(&self, user_id: UserId, nickname: &str) -> Result<(), StoreError> {
        debug!(user_id, "saving profile");

        let exists = self
            .profiles
            .contains_key(user_id.to_be_bytes())
            .map_err(to_backend)?;
        if exists {
            return Err(StoreError::conflict(format!(
                "profile for user {user_id} already exists"
            )));
        }

        let profile = Profile {
            user_id,
            nickname: nickname.to_string(),
        };
        self.profiles
            .insert(user_id.to_be_bytes(), encode(&profile)?)
            .map_err(to_backend)?;
        self.flush().await?;

        Ok(())
    }
}

#[async_trait]
impl PromotionStore<User> for SledStore {
    async fn user_by_id(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        debug!(user_id, "fetching user");

        match self
            .users
            .get(user_id.to_be_bytes())
            .map_err(to_backend)?
        {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save_user(&self, user_id: UserId, user: &User) -> Result<(), StoreError> {
        debug!(user_id, "writing user back");

        self.users
            .insert(user_id.to_be_bytes(), encode(user)?)
            .map_err(to_backend)?;
        self.flush().await?;

        Ok(())
    }
}

impl Drop for SledStore {
    fn drop(&mut self) {
        // Attempt to flush on drop
        if let Err(e) = self.db.flush() {
            error!("Failed to flush database on drop: {}", e);
        }
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
    async fn test_register_and_fetch() {
        let store = SledStore::in_memory().unwrap();

        let id = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap()
            .expect("id generated");
        store.save_profile(id, "user_123").await.unwrap();

        let user = store.user_by_id(id).await.unwrap().expect("stored user");
        assert_eq!(user.email, "user123@gmail.com");
        assert_eq!(user.nickname, "user_123");
        assert!(!user.admin);
    }

    #[smol_potat::test]
    async fn test_duplicate_email_yields_no_id() {
        let store = SledStore::in_memory().unwrap();

        let first = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap();
        assert!(first.is_some());

        let second = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap();
        assert_eq!(second, None);
    }

    #[smol_potat::test]
    async fn test_duplicate_profile_is_a_conflict() {
        let store = SledStore::in_memory().unwrap();
        let id = RegistrationStore::save_user(&store, &sample_registration())
            .await
            .unwrap()
            .unwrap();

        store.save_profile(id, "user_123").await.unwrap();
        let result = store.save_profile(id, "other").await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[smol_potat::test]
    async fn test_unknown_id_yields_none() {
        let store = SledStore::in_memory().unwrap();
        assert_eq!(store.user_by_id(999).await.unwrap(), None);
    }

    #[smol_potat::test]
    async fn test_persistence_across_reopen() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let db_path = dir.path().join("accounts.db");

        let id = {
            let store = SledStore::open(&db_path).unwrap();
            let id = RegistrationStore::save_user(&store, &sample_registration())
                .await
                .unwrap()
                .unwrap();
            store.save_profile(id, "user_123").await.unwrap();
            id
        };

        // Reopen and verify
        {
            let store = SledStore::open(&db_path).unwrap();
            let user = store.user_by_id(id).await.unwrap().expect("stored user");
            assert_eq!(user.email, "user123@gmail.com");

            let second = RegistrationStore::save_user(&store, &sample_registration())
                .await
                .unwrap();
            assert_eq!(second, None, "email index survived the reopen");
        }
    }
}
