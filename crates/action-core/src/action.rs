//! Action abstraction: one business operation with its dependencies declared
//! inline
//!
//! An [`Action`] couples a unit of business logic with the capability
//! interface it calls through. The interface is part of the action's own
//! signature: `Deps` names the trait-object type of the minimal storage
//! surface the action needs, fixed at its default (widest) entity shape.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A single unit of business logic parameterized by an injected capability
/// implementation.
///
/// Implementors are unit marker types. The logic itself usually lives in a
/// free function that stays generic over the entity subset it touches, while
/// the `Action` implementation pins the default instantiation once:
///
/// ```ignore
/// pub struct PromoteUser;
///
/// #[async_trait]
/// impl Action for PromoteUser {
///     type Input = UserId;
///     type Outcome = PromotionOutcome;
///     type Deps = dyn PromotionStore<User>;
///
///     fn name() -> &'static str {
///         "promote-user"
///     }
///
///     fn description() -> &'static str {
///         "Grant administrative rights to an existing user"
///     }
///
///     async fn run(input: Self::Input, deps: &Self::Deps) -> Self::Outcome {
///         promote_user(input, deps).await
///     }
/// }
/// ```
#[async_trait]
pub trait Action: 'static {
    /// Plain-data value describing the caller's intent
    type Input: DeserializeOwned + Send + 'static;

    /// Discriminated success/failure result returned to the caller
    type Outcome: Serialize + Send + 'static;

    /// Capability interface the action calls through, at its default (most
    /// general) entity shape
    type Deps: ?Sized + Send + Sync + 'static;

    /// Unique action name, used for registry dispatch
    fn name() -> &'static str;

    /// Human-readable description
    fn description() -> &'static str;

    /// Execute the action against the supplied capability implementation.
    ///
    /// Every side effect goes through `deps`; an action has no other route to
    /// storage, clock, or randomness.
    async fn run(input: Self::Input, deps: &Self::Deps) -> Self::Outcome;
}

/// Dependency type of an action at its default entity shape.
///
/// Lets factories and test builders write `Arc<DepsOf<A>>` without restating
/// the action's generic signature; the alias tracks the action's own
/// declaration, so the two cannot drift apart:
///
/// ```ignore
/// let deps: Arc<DepsOf<PromoteUser>> = Arc::new(SledStore::open(path)?);
/// registry.register::<PromoteUser>(deps)?;
/// ```
pub type DepsOf<A> = <A as Action>::Deps;
