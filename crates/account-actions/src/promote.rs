//! Admin promotion
//!
//! The action is generic over the entity slice it needs ([`AdminFlag`]), and
//! the capability interface reuses the same type parameter: tightening or
//! loosening the action's entity constraint changes the interface's required
//! shape in lock-step, with nothing to keep synchronized by hand.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use action_core::Action;

use crate::entity::{AdminFlag, User, UserId};
use crate::error::StoreError;

/// Storage surface of [`promote_user`], generic over the entity slice.
///
/// Production providers implement it at `U = User`; tests may instantiate it
/// with any type carrying the admin flag.
#[async_trait]
pub trait PromotionStore<U: AdminFlag>: Send + Sync {
    /// Fetch a user record; `None` when the id is unknown
    async fn user_by_id(&self, user_id: UserId) -> Result<Option<U>, StoreError>;

    /// Write a user record back
    async fn save_user(&self, user_id: UserId, user: &U) -> Result<(), StoreError>;
}

/// Result of a promotion attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromotionOutcome {
    /// The record was written back with the admin flag set
    Promoted {
        /// The promoted user
        user_id: UserId,
    },

    /// No record was written
    Rejected {
        /// Why the promotion did not go through
        reason: String,
    },
}

/// Set the admin flag on a stored user record.
///
/// The fetch happens before the write-back; an unknown id or a failed fetch
/// skips the write entirely. Only the flag is modified; every other field of
/// the record is written back unchanged.
pub async fn promote_user<U, S>(user_id: UserId, store: &S) -> PromotionOutcome
where
    U: AdminFlag + Send,
    S: PromotionStore<U> + ?Sized,
{
    let mut user = match store.user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!(user_id, "unknown user");
            return PromotionOutcome::Rejected {
                reason: format!("no user with id {user_id}"),
            };
        }
        Err(err) => {
            warn!(user_id, error = %err, "user fetch failed");
            return PromotionOutcome::Rejected {
                reason: err.to_string(),
            };
        }
    };

    user.set_admin(true);

    match store.save_user(user_id, &user).await {
        Ok(()) => {
            debug!(user_id, "promotion complete");
            PromotionOutcome::Promoted { user_id }
        }
        Err(err) => {
            warn!(user_id, error = %err, "user write failed");
            PromotionOutcome::Rejected {
                reason: err.to_string(),
            }
        }
    }
}

/// Marker binding [`promote_user`] to its default entity shape
pub struct PromoteUser;

#[async_trait]
impl Action for PromoteUser {
    type Input = UserId;
    type Outcome = PromotionOutcome;
    type Deps = dyn PromotionStore<User>;

    fn name() -> &'static str {
        "promote-user"
    }

    fn description() -> &'static str {
        "Grant administrative rights to an existing user"
    }

    async fn run(input: Self::Input, deps: &Self::Deps) -> Self::Outcome {
        promote_user(input, deps).await
    }
}
