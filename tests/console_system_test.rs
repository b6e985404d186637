use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use order_console::backend::{ApiError, MockBackendApi};
use order_console::capability::{AccessDenied, Role, Section, ViewKind};
use order_console::checkout::{CheckoutError, CheckoutForm, PayloadOptions};
use order_console::draft::{DraftError, DraftEvent};
use order_console::lifecycle::ConsoleSystem;
use order_console::messages;
use order_console::model::{ProductId, Record, Scalar};
use order_console::notify::NotifyConfig;
use order_console::storage::{KeyValueStore, MemoryStore, CART_KEY, CREDENTIAL_KEY};
use order_console::table::ActionKind;
use std::sync::Arc;

fn product(id: i64, name: &str, price: f64) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("unit_price", price)
        .with("total_stock", 100)
}

fn token(payload: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

fn system_with(store: Arc<MemoryStore>, backend: MockBackendApi) -> ConsoleSystem {
    ConsoleSystem::with_parts(
        store,
        Arc::new(backend),
        NotifyConfig::default(),
        PayloadOptions::default(),
    )
}

/// Full flow with the real draft actor: fill the draft, submit, verify cleanup.
#[tokio::test]
async fn test_checkout_flow_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    let mut backend = MockBackendApi::new();
    backend
        .expect_create_order()
        .withf(|payload| {
            payload.order_details.len() == 2
                && payload.extra.get("client_dni") == Some(&Scalar::from("12345678"))
        })
        .times(1)
        .returning(|_| Ok(serde_json::json!({ "id": 99 })));
    let system = system_with(store.clone(), backend);

    // Two lines, one of them merged
    let event = system
        .draft
        .add_record(&product(1, "Tornillo", 5.0), 1)
        .await
        .expect("Failed to add product");
    assert!(matches!(event, DraftEvent::Added { merged: false, .. }));
    system
        .draft
        .add_record(&product(1, "Tornillo", 5.0), 1)
        .await
        .expect("Failed to merge product");
    system
        .draft
        .add_record(&product(2, "Tuerca", 15.0), 1)
        .await
        .expect("Failed to add product");

    let items = system.draft.items().await.expect("Failed to read draft");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].quantity.get(), 2);
    assert_eq!(system.draft.total().await.unwrap(), 25.0);
    assert!(store.get(CART_KEY).unwrap().is_some(), "Draft should be persisted");

    // Submit
    let mut form = CheckoutForm::new();
    form.open();
    form.set("client_dni", "12345678");
    let receipt = system
        .checkout
        .submit(&mut form)
        .await
        .expect("Checkout should succeed");

    assert_eq!(receipt.total, 25.0);
    assert_eq!(receipt.order["id"], 99);
    assert!(!form.is_open());
    assert!(system.draft.items().await.unwrap().is_empty());
    assert_eq!(store.get(CART_KEY).unwrap(), None, "Draft key should be removed");
    assert_eq!(
        system.notifier.current().map(|n| n.message),
        Some(messages::ORDER_SUCCESS.to_string())
    );

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_rejected_order_leaves_draft_untouched() {
    let store = Arc::new(MemoryStore::new());
    let mut backend = MockBackendApi::new();
    backend.expect_create_order().times(1).returning(|_| {
        Err(ApiError::Validation {
            detail: Some("client_dni is required".into()),
        })
    });
    let system = system_with(store.clone(), backend);

    system
        .draft
        .add_record(&product(3, "Arandela", 2.5), 4)
        .await
        .unwrap();
    let persisted = store.get(CART_KEY).unwrap();

    let mut form = CheckoutForm::new();
    form.open();
    let err = system.checkout.submit(&mut form).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Rejected { .. }));
    assert_eq!(err.user_message(), messages::ORDER_VALIDATION);
    assert!(form.is_open());
    assert_eq!(system.draft.items().await.unwrap().len(), 1);
    assert_eq!(store.get(CART_KEY).unwrap(), persisted);
    assert_eq!(
        system.notifier.current().map(|n| n.message),
        Some(messages::ORDER_VALIDATION.to_string())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_draft_is_not_submitted() {
    let mut backend = MockBackendApi::new();
    backend.expect_create_order().never();
    let system = system_with(Arc::new(MemoryStore::new()), backend);

    let err = system
        .checkout
        .submit(&mut CheckoutForm::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyDraft));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_quantities_are_rejected_without_change() {
    let store = Arc::new(MemoryStore::new());
    let system = system_with(store.clone(), MockBackendApi::new());
    let id = ProductId(7);

    system
        .draft
        .add_record(&product(7, "Clavo", 1.0), 3)
        .await
        .unwrap();
    let persisted = store.get(CART_KEY).unwrap();

    for result in [
        system.draft.set_quantity(id, 0).await,
        system.draft.set_quantity(id, -1).await,
        system.draft.set_quantity(id, f64::NAN).await,
        system.draft.set_quantity(id, "abc").await,
    ] {
        assert!(matches!(result, Err(DraftError::InvalidQuantity(_))));
    }
    assert_eq!(system.draft.items().await.unwrap()[0].quantity.get(), 3);
    assert_eq!(store.get(CART_KEY).unwrap(), persisted);

    // A valid one goes through
    system.draft.set_quantity(id, "5").await.unwrap();
    assert_eq!(system.draft.total().await.unwrap(), 5.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_login_role_gates_product_actions() {
    let token = token(r#"{"sub":"luis","role":"local"}"#);
    let store = Arc::new(MemoryStore::new());
    let mut backend = MockBackendApi::new();
    backend
        .expect_login()
        .returning(move |_, _| Ok(token.clone()));
    let system = system_with(store.clone(), backend);

    assert_eq!(system.session.role(), Role::Unknown);
    assert!(system.session.capabilities().actions(ViewKind::Products).is_empty());

    let role = system
        .session
        .login(system.backend.as_ref(), "luis", "clave")
        .await
        .expect("Login failed");
    assert_eq!(role, Role::Local);

    let actions = system.session.capabilities().actions(ViewKind::Products);
    assert!(actions.contains(ActionKind::AddToCart));
    assert!(!actions.contains(ActionKind::Edit));

    // Logging out keeps the draft
    system
        .draft
        .add_record(&product(1, "Tornillo", 5.0), 1)
        .await
        .unwrap();
    system.session.logout().unwrap();
    assert_eq!(system.session.role(), Role::Unknown);
    assert!(store.get(CART_KEY).unwrap().is_some());

    system.shutdown().await.unwrap();
}

/// Only roles that can open the orders section may submit the draft.
#[tokio::test]
async fn test_place_order_requires_orders_section() {
    let store = Arc::new(MemoryStore::new());
    let mut backend = MockBackendApi::new();
    backend
        .expect_create_order()
        .times(1)
        .returning(|_| Ok(serde_json::json!({ "id": 1 })));
    let system = system_with(store.clone(), backend);

    system
        .draft
        .add_record(&product(5, "Bisagra", 4.0), 2)
        .await
        .unwrap();

    // Logged out, then logged in as admin: refused, nothing sent, draft kept
    for credential in [None, Some(token(r#"{"sub":7,"role":"admin"}"#))] {
        if let Some(credential) = &credential {
            store.set(CREDENTIAL_KEY, credential).unwrap();
        }
        let mut form = CheckoutForm::new();
        form.open();
        let err = system.place_order(&mut form).await.unwrap_err();
        match &err {
            CheckoutError::Forbidden(AccessDenied { section, .. }) => {
                assert_eq!(*section, Section::Orders)
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(err.user_message(), messages::ACCESS_DENIED);
        assert!(form.is_open());
        assert_eq!(system.draft.items().await.unwrap().len(), 1);
    }
    assert!(system.authorize(Section::Orders).is_err());

    // A local user goes through
    store
        .set(CREDENTIAL_KEY, &token(r#"{"sub":"luis","role":"local"}"#))
        .unwrap();
    assert_eq!(system.authorize(Section::Orders).unwrap().role(), Role::Local);
    let receipt = system.place_order(&mut CheckoutForm::new()).await.unwrap();
    assert_eq!(receipt.total, 8.0);
    assert!(system.draft.items().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}
