//! Domain records for the account service
//!
//! `User` is the full production record. Business logic never depends on the
//! whole of it: an action that only needs the admin flag is written against
//! [`AdminFlag`], and accepts the production record and narrower test
//! stand-ins interchangeably.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage-generated user identifier
pub type UserId = u64;

/// Full user record as stored by a production provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Storage-generated identifier
    pub id: UserId,

    /// Login email, unique per account
    pub email: String,

    /// Public display name
    pub nickname: String,

    /// Whether the account has administrative rights
    pub admin: bool,

    /// Stamped by the storage provider when the record is first written
    pub created_at: DateTime<Utc>,
}

/// New-account fields supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Registration {
    /// Login email
    pub email: String,

    /// Public display name
    pub nickname: String,
}

/// Secondary record written alongside a new user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user
    pub user_id: UserId,

    /// Display name copied from the registration
    pub nickname: String,
}

/// Minimal slice of a user record the promotion logic needs.
///
/// `User` satisfies it, and so does any test entity that carries at least
/// the flag. Code bounded by `AdminFlag` cannot touch any other field, so a
/// record round-trips through it with everything else intact.
pub trait AdminFlag {
    /// Current value of the admin flag
    fn admin(&self) -> bool;

    /// Overwrite the admin flag, leaving every other field untouched
    fn set_admin(&mut self, admin: bool);
}

impl AdminFlag for User {
    fn admin(&self) -> bool {
        self.admin
    }

    fn set_admin(&mut self, admin: bool) {
        self.admin = admin;
    }
}
