//! User registration
//!
//! The capability interface is declared here, next to the action that owns
//! it. No other action shares it; an action with different needs declares its
//! own interface instead of widening this one.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use action_core::Action;

use crate::entity::{Registration, UserId};
use crate::error::StoreError;

/// Storage surface of [`register_user`]: exactly the two writes it performs.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist a new user record.
    ///
    /// Returns the generated id, or `None` when no record was created (for
    /// example because the email is already taken). Backend faults are
    /// reported as [`StoreError`]; every provider of this interface signals
    /// the "not created" case the same way.
    async fn save_user(&self, registration: &Registration) -> Result<Option<UserId>, StoreError>;

    /// Persist the profile row for a freshly created user
    async fn save_profile(&self, user_id: UserId, nickname: &str) -> Result<(), StoreError>;
}

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// Both records were written
    Created {
        /// Id produced by the user write, passed through unmodified
        user_id: UserId,
    },

    /// The account was not created; no profile row exists
    Rejected {
        /// Why the registration did not go through
        reason: String,
    },
}

/// Create a user record and, once it has an id, its profile row.
///
/// The user write happens before the profile write. When the user write
/// yields no id or fails, the profile write is skipped entirely and the
/// outcome reports the rejection; a capability failure never surfaces as
/// success and never propagates past the returned outcome.
pub async fn register_user<S>(input: Registration, store: &S) -> RegistrationOutcome
where
    S: RegistrationStore + ?Sized,
{
    let user_id = match store.save_user(&input).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            debug!(email = %input.email, "user record not created");
            return RegistrationOutcome::Rejected {
                reason: format!("account for '{}' was not created", input.email),
            };
        }
        Err(err) => {
            warn!(email = %input.email, error = %err, "user write failed");
            return RegistrationOutcome::Rejected {
                reason: err.to_string(),
            };
        }
    };

    match store.save_profile(user_id, &input.nickname).await {
        Ok(()) => {
            debug!(user_id, "registration complete");
            RegistrationOutcome::Created { user_id }
        }
        Err(err) => {
            warn!(user_id, error = %err, "profile write failed");
            RegistrationOutcome::Rejected {
                reason: err.to_string(),
            }
        }
    }
}

/// Marker binding [`register_user`] to its default dependency shape
pub struct RegisterUser;

#[async_trait]
impl Action for RegisterUser {
    type Input = Registration;
    type Outcome = RegistrationOutcome;
    type Deps = dyn RegistrationStore;

    fn name() -> &'static str {
        "register-user"
    }

    fn description() -> &'static str {
        "Create a user record and its profile row"
    }

    async fn run(input: Self::Input, deps: &Self::Deps) -> Self::Outcome {
        register_user(input, deps).await
    }
}
