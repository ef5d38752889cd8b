//! Action Core Library
//!
//! Building blocks for the minimal-capability action pattern: business-logic
//! units that declare the exact storage interface they depend on, a registry
//! that wires actions to capability providers and dispatches JSON
//! invocations, and recording stubs for isolated tests.

#![warn(missing_docs)]

pub mod action;
pub mod error;
pub mod registry;
#[cfg(feature = "test-utils")]
pub mod stub;

pub use action::{Action, DepsOf};
pub use error::{Error, Result};
pub use registry::{ActionInfo, ActionRegistry};

/// Convenience prelude for action-core users
pub mod prelude {
    pub use crate::action::{Action, DepsOf};
    pub use crate::error::{Error, Result};
    pub use crate::registry::{ActionInfo, ActionRegistry};

    // Re-export commonly used types from dependencies
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
