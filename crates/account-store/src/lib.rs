//! # Account Store
//!
//! Storage providers for the account actions: an in-memory provider and a
//! sled-backed provider, both conforming to the capability interfaces the
//! actions declare. An action cannot tell which one it received.
//!
//! ## Example
//!
//! ```rust
//! use account_actions::{Registration, RegistrationOutcome, register_user};
//! use account_store::MemoryStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = MemoryStore::new();
//!
//! let outcome = register_user(
//!     Registration {
//!         email: "user123@gmail.com".to_string(),
//!         nickname: "user_123".to_string(),
//!     },
//!     &store,
//! )
//! .await;
//!
//! assert!(matches!(outcome, RegistrationOutcome::Created { .. }));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod config;

pub use backend::{MemoryStore, SledStore};
pub use config::{ConfigError, StoreConfig};
