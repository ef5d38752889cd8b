//! Recording test doubles for the capability interfaces
//!
//! One stub per capability trait, assembled from the shared
//! [`action_core::stub`] machinery: each operation is an independently
//! programmable [`StubOp`], and every call lands in the stub's [`CallLog`]
//! with JSON-encoded arguments.
//!
//! Available behind the `test-utils` feature.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use action_core::stub::{CallLog, StubOp};

use crate::entity::{AdminFlag, Registration, UserId};
use crate::error::StoreError;
use crate::promote::PromotionStore;
use crate::register::RegistrationStore;

/// Test double for [`RegistrationStore`].
///
/// Defaults: `save_user` returns `None` (no record created), `save_profile`
/// succeeds.
pub struct StubRegistrationStore {
    /// Programmed result of the user write
    pub save_user: StubOp<Option<UserId>, StoreError>,

    /// Programmed result of the profile write
    pub save_profile: StubOp<(), StoreError>,

    /// Every call received, in order
    pub log: CallLog,
}

impl StubRegistrationStore {
    /// Create a stub with the documented default behaviors
    pub fn new() -> Self {
        Self {
            save_user: StubOp::returning("save_user", None),
            save_profile: StubOp::returning("save_profile", ()),
            log: CallLog::new(),
        }
    }
}

impl Default for StubRegistrationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for StubRegistrationStore {
    async fn save_user(&self, registration: &Registration) -> Result<Option<UserId>, StoreError> {
        self.log.record(
            "save_user",
            json!({
                "email": registration.email,
                "nickname": registration.nickname,
            }),
        );
        self.save_user.next()
    }

    async fn save_profile(&self, user_id: UserId, nickname: &str) -> Result<(), StoreError> {
        self.log.record(
            "save_profile",
            json!({ "user_id": user_id, "nickname": nickname }),
        );
        self.save_profile.next()
    }
}

/// Test double for [`PromotionStore`], generic over the entity shape under
/// test.
///
/// Defaults: `user_by_id` returns `None` (unknown id), `save_user` succeeds.
pub struct StubPromotionStore<U> {
    /// Programmed result of the fetch
    pub user_by_id: StubOp<Option<U>, StoreError>,

    /// Programmed result of the write-back
    pub save_user: StubOp<(), StoreError>,

    /// Every call received, in order
    pub log: CallLog,
}

impl<U: Clone> StubPromotionStore<U> {
    /// Create a stub with the documented default behaviors
    pub fn new() -> Self {
        Self {
            user_by_id: StubOp::returning("user_by_id", None),
            save_user: StubOp::returning("save_user", ()),
            log: CallLog::new(),
        }
    }
}

impl<U: Clone> Default for StubPromotionStore<U> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<U> PromotionStore<U> for StubPromotionStore<U>
where
    U: AdminFlag + Clone + Serialize + Send + Sync,
{
    async fn user_by_id(&self, user_id: UserId) -> Result<Option<U>, StoreError> {
        self.log.record("user_by_id", json!({ "user_id": user_id }));
        self.user_by_id.next()
    }

    async fn save_user(&self, user_id: UserId, user: &U) -> Result<(), StoreError> {
        self.log.record(
            "save_user",
            json!({
                "user_id": user_id,
                "user": serde_json::to_value(user).expect("encode recorded entity"),
            }),
        );
        self.save_user.next()
    }
}
