//! Account Actions
//!
//! Business logic for the user-account service, written in the
//! minimal-capability style: every action declares the exact storage
//! interface it needs next to its own definition, and a provider (production
//! or test double) is injected by the caller. Actions never reach past that
//! interface.

#![warn(missing_docs)]

pub mod entity;
pub mod error;
pub mod promote;
pub mod register;
#[cfg(feature = "test-utils")]
pub mod testing;

pub use entity::{AdminFlag, Profile, Registration, User, UserId};
pub use error::StoreError;
pub use promote::{PromoteUser, PromotionOutcome, PromotionStore, promote_user};
pub use register::{RegisterUser, RegistrationOutcome, RegistrationStore, register_user};
