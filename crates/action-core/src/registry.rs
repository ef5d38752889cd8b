//! Registry wiring actions to their capability providers
//!
//! The registry is the seam an external handler calls: an action is
//! registered together with an `Arc` of its dependency object, and invoked by
//! name with JSON parameters. Checking a provider against the action's
//! declared interface happens here, at registration, not at call time.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

use crate::action::Action;
use crate::{Error, Result};

/// Erased invocation closure stored per action
pub type ActionFn = Box<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send + 'static>>
        + Send
        + Sync
        + 'static,
>;

/// Metadata about a registered action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionInfo {
    /// Action name
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON schema for the action input
    pub input_schema: Value,

    /// JSON schema for the action outcome
    pub outcome_schema: Value,
}

/// Registry for dispatching actions to their wired providers
#[derive(Default)]
pub struct ActionRegistry {
    actions: IndexMap<String, ActionFn>,
    metadata: HashMap<String, ActionInfo>,
}

impl ActionRegistry {
    /// Create a new action registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action wired to a capability implementation.
    ///
    /// The provider must satisfy the action's declared dependency type
    /// ([`DepsOf`]); a mismatched implementation fails to compile here, at
    /// the boundary where it is supplied.
    ///
    /// [`DepsOf`]: crate::action::DepsOf
    pub fn register<A>(&mut self, deps: Arc<A::Deps>) -> Result<()>
    where
        A: Action,
        A::Input: JsonSchema,
        A::Outcome: JsonSchema,
    {
        let name = A::name().to_string();

        if self.actions.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }

        let info = ActionInfo {
            name: name.clone(),
            description: A::description().to_string(),
            input_schema: serde_json::to_value(schemars::schema_for!(A::Input))?,
            outcome_schema: serde_json::to_value(schemars::schema_for!(A::Outcome))?,
        };

        // Erase the typed action behind a JSON-to-JSON closure
        let action_fn: ActionFn = Box::new(move |params: Value| {
            let deps = Arc::clone(&deps);
            Box::pin(async move {
                let input: A::Input = serde_json::from_value(params)
                    .map_err(|e| Error::invalid_input(e.to_string()))?;
                let outcome = A::run(input, deps.as_ref()).await;
                Ok(serde_json::to_value(outcome)?)
            }) as Pin<Box<dyn Future<Output = Result<Value>> + Send + 'static>>
        });

        debug!("Registered action '{}'", name);

        self.actions.insert(name.clone(), action_fn);
        self.metadata.insert(name, info);

        Ok(())
    }

    /// Invoke an action by name
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        debug!("Invoking action '{}'", name);
        action(params).await
    }

    /// Get action metadata
    pub fn get_info(&self, name: &str) -> Option<&ActionInfo> {
        self.metadata.get(name)
    }

    /// List all registered actions, in registration order
    pub fn list_actions(&self) -> Vec<&ActionInfo> {
        self.actions
            .keys()
            .filter_map(|name| self.metadata.get(name))
            .collect()
    }

    /// Check if an action exists
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }
}
