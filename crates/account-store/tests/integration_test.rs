//! End-to-end tests: actions wired to real providers through the registry,
//! and the swap property between test doubles and production stores

use std::sync::Arc;

use serde_json::json;

use account_actions::testing::StubRegistrationStore;
use account_actions::{
    PromoteUser, PromotionStore, RegisterUser, Registration, RegistrationOutcome, promote_user,
    register_user,
};
use account_store::{MemoryStore, SledStore};
use action_core::{ActionRegistry, DepsOf};

fn sample_registration() -> Registration {
    Registration {
        email: "user123@gmail.com".to_string(),
        nickname: "user_123".to_string(),
    }
}

#[smol_potat::test]
async fn registry_dispatches_to_sled_provider() {
    let store = Arc::new(SledStore::in_memory().unwrap());

    let mut registry = ActionRegistry::new();
    let register_deps: Arc<DepsOf<RegisterUser>> = store.clone();
    let promote_deps: Arc<DepsOf<PromoteUser>> = store.clone();
    registry.register::<RegisterUser>(register_deps).unwrap();
    registry.register::<PromoteUser>(promote_deps).unwrap();

    let created = registry
        .invoke(
            "register-user",
            json!({"email": "user123@gmail.com", "nickname": "user_123"}),
        )
        .await
        .unwrap();
    assert_eq!(created["status"], "created");

    let user_id = created["user_id"].as_u64().unwrap();
    let promoted = registry
        .invoke("promote-user", json!(user_id))
        .await
        .unwrap();
    assert_eq!(
        promoted,
        json!({"status": "promoted", "user_id": user_id})
    );

    let user = store.user_by_id(user_id).await.unwrap().unwrap();
    assert!(user.admin);
}

#[smol_potat::test]
async fn registering_twice_through_the_registry_is_rejected() {
    let store = Arc::new(MemoryStore::new());

    let mut registry = ActionRegistry::new();
    let deps: Arc<DepsOf<RegisterUser>> = store.clone();
    registry.register::<RegisterUser>(deps).unwrap();

    let params = json!({"email": "user123@gmail.com", "nickname": "user_123"});
    let first = registry.invoke("register-user", params.clone()).await.unwrap();
    assert_eq!(first["status"], "created");

    let second = registry.invoke("register-user", params).await.unwrap();
    assert_eq!(second["status"], "rejected");
}

#[smol_potat::test]
async fn stub_and_production_provider_run_the_same_branch() {
    // Fresh state on both sides: the action takes the success branch.
    let stub = StubRegistrationStore::new();
    stub.save_user.ret(Some(1));
    let stub_outcome = register_user(sample_registration(), &stub).await;

    let memory = MemoryStore::new();
    let memory_outcome = register_user(sample_registration(), &memory).await;

    assert!(matches!(stub_outcome, RegistrationOutcome::Created { .. }));
    assert!(matches!(memory_outcome, RegistrationOutcome::Created { .. }));

    // Equivalent "email taken" state: the stub is programmed the way the
    // production store now behaves, and both take the rejection branch.
    let taken_stub = StubRegistrationStore::new();
    let stub_outcome = register_user(sample_registration(), &taken_stub).await;
    let memory_outcome = register_user(sample_registration(), &memory).await;

    assert!(matches!(stub_outcome, RegistrationOutcome::Rejected { .. }));
    assert!(matches!(memory_outcome, RegistrationOutcome::Rejected { .. }));
}

#[smol_potat::test]
async fn promotion_on_disk_preserves_fields() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("accounts.db");

    let user_id = {
        let store = SledStore::open(&db_path).unwrap();
        let outcome = register_user(sample_registration(), &store).await;
        let RegistrationOutcome::Created { user_id } = outcome else {
            panic!("registration failed: {outcome:?}");
        };

        let before = store.user_by_id(user_id).await.unwrap().unwrap();
        promote_user(user_id, &store).await;
        let after = store.user_by_id(user_id).await.unwrap().unwrap();

        assert!(after.admin);
        assert_eq!(after.email, before.email);
        assert_eq!(after.nickname, before.nickname);
        assert_eq!(after.created_at, before.created_at);

        user_id
    };

    // The promoted flag survives a reopen.
    let store = SledStore::open(&db_path).unwrap();
    let user = store.user_by_id(user_id).await.unwrap().unwrap();
    assert!(user.admin);
}
