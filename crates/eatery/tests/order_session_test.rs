//! Session-manager tests: a real registry and real sessions, with the store
//! as the only controlled collaborator.

use async_trait::async_trait;
use eatery::session::{registry, OrderCommand, OrderError};
use eatery::store::{MemoryStore, OrderId, OrderStore, StoreError};
use session_actor::SessionError;
use std::sync::Arc;

fn menu_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_menu([
        ("samosa", 1.5),
        ("chhole", 4.0),
        ("rice", 3.0),
    ]))
}

fn add(items: &[(&str, u32)]) -> OrderCommand {
    OrderCommand::Add {
        items: items
            .iter()
            .map(|(item, quantity)| (item.to_string(), *quantity))
            .collect(),
    }
}

fn remove(items: &[&str], quantities: &[u32]) -> OrderCommand {
    OrderCommand::Remove {
        items: items.iter().map(|item| item.to_string()).collect(),
        quantities: quantities.to_vec(),
    }
}

/// A store that lost its database connection.
struct OfflineStore;

#[async_trait]
impl OrderStore for OfflineStore {
    async fn next_order_id(&self) -> Result<OrderId, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert_order_item(
        &self,
        _item: &str,
        _quantity: u32,
        _order_id: OrderId,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert_order_tracking(
        &self,
        _order_id: OrderId,
        _status: &str,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn order_status(&self, _order_id: OrderId) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn total_order_price(&self, _order_id: OrderId) -> Result<f64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn entity_error(failure: SessionError) -> OrderError {
    match failure {
        SessionError::Entity(source) => source
            .downcast_ref::<OrderError>()
            .cloned()
            .expect("an order error"),
        other => panic!("expected an entity error, got {other:?}"),
    }
}

#[tokio::test]
async fn first_add_builds_the_order_from_the_pairs() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    let reply = sessions
        .dispatch(&sid, add(&[("samosa", 2), ("chhole", 5)]))
        .await
        .unwrap();
    assert_eq!(
        reply,
        "So far you have: 2 samosa, 5 chhole. Do you need anything else?"
    );

    let session = sessions.snapshot(&sid).await.expect("live session");
    assert_eq!(session.order().quantity("samosa"), Some(2));
    assert_eq!(session.order().quantity("chhole"), Some(5));
}

#[tokio::test]
async fn repeated_add_replaces_the_quantity() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions.dispatch(&sid, add(&[("rice", 2)])).await.unwrap();
    let reply = sessions.dispatch(&sid, add(&[("rice", 5)])).await.unwrap();

    assert_eq!(reply, "So far you have: 5 rice. Do you need anything else?");
    let session = sessions.snapshot(&sid).await.unwrap();
    assert_eq!(session.order().quantity("rice"), Some(5));
    assert_eq!(session.order().len(), 1);
}

#[tokio::test]
async fn partial_removal_decrements_in_place() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions.dispatch(&sid, add(&[("samosa", 5)])).await.unwrap();
    let reply = sessions
        .dispatch_existing(&sid, remove(&["samosa"], &[2]))
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Removed 2 samosa from your order. Here is what is left in your order: 3 samosa"
    );
}

#[tokio::test]
async fn removal_beyond_held_deletes_and_reports_the_held_quantity() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions.dispatch(&sid, add(&[("samosa", 2)])).await.unwrap();
    let reply = sessions
        .dispatch_existing(&sid, remove(&["samosa"], &[5]))
        .await
        .unwrap();

    // The reply cites the 2 that were actually held, and the order is empty.
    assert_eq!(reply, "Removed 2 samosa from your order. Your order is empty!");
    let session = sessions.snapshot(&sid).await.unwrap();
    assert!(session.order().is_empty());
}

#[tokio::test]
async fn whole_item_removal_ignores_quantities_held() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions
        .dispatch(&sid, add(&[("samosa", 7), ("chhole", 1)]))
        .await
        .unwrap();
    let reply = sessions
        .dispatch_existing(&sid, remove(&["samosa"], &[]))
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Removed samosa from your order. Here is what is left in your order: 1 chhole"
    );
}

#[tokio::test]
async fn unknown_items_are_reported_not_removed() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions.dispatch(&sid, add(&[("samosa", 2)])).await.unwrap();
    let reply = sessions
        .dispatch_existing(&sid, remove(&["pizza", "samosa"], &[1, 1]))
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Removed 1 samosa from your order. Your current order does not have pizza. \
         Here is what is left in your order: 1 samosa"
    );
}

#[tokio::test]
async fn ragged_quantities_are_a_mismatch_and_mutate_nothing() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions
        .dispatch(&sid, add(&[("samosa", 2), ("chhole", 5)]))
        .await
        .unwrap();
    let failure = sessions
        .dispatch_existing(&sid, remove(&["samosa", "chhole"], &[1]))
        .await
        .unwrap_err();

    assert_eq!(entity_error(failure), OrderError::QuantityMismatch);
    let session = sessions.snapshot(&sid).await.unwrap();
    assert_eq!(session.order().quantity("samosa"), Some(2));
    assert_eq!(session.order().quantity("chhole"), Some(5));
}

#[tokio::test]
async fn remove_without_a_session_is_no_session() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    let failure = sessions
        .dispatch_existing(&sid, remove(&["samosa"], &[1]))
        .await
        .unwrap_err();
    assert!(matches!(failure, SessionError::NoSession(_)));
}

#[tokio::test]
async fn complete_commits_clears_and_confirms() {
    let store = menu_store();
    let sessions = registry(store.clone());
    let sid = "s1".to_string();

    sessions
        .dispatch(&sid, add(&[("samosa", 2), ("chhole", 5)]))
        .await
        .unwrap();
    let reply = sessions
        .dispatch_existing(&sid, OrderCommand::Complete)
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Awesome. We have placed your order. Here is your order id # 1. \
         Your order total is 23 which you can pay at the time of delivery!"
    );
    assert!(sessions.snapshot(&sid).await.is_none());

    // Completing again requires a fresh order first.
    let failure = sessions
        .dispatch_existing(&sid, OrderCommand::Complete)
        .await
        .unwrap_err();
    assert!(matches!(failure, SessionError::NoSession(_)));
}

#[tokio::test]
async fn failed_commit_keeps_the_order_for_a_retry() {
    let store = menu_store();
    let sessions = registry(store.clone());
    let sid = "s1".to_string();

    // "pizza" is off the menu, so the item insert aborts the commit.
    sessions
        .dispatch(&sid, add(&[("samosa", 2), ("pizza", 1)]))
        .await
        .unwrap();
    let failure = sessions
        .dispatch_existing(&sid, OrderCommand::Complete)
        .await
        .unwrap_err();
    assert_eq!(entity_error(failure), OrderError::PersistenceFailure);

    // The session survived with the order intact; fixing it up lets the
    // same session commit.
    let session = sessions.snapshot(&sid).await.expect("session kept");
    assert_eq!(session.order().quantity("samosa"), Some(2));
    assert_eq!(session.order().quantity("pizza"), Some(1));

    sessions
        .dispatch_existing(&sid, remove(&["pizza"], &[]))
        .await
        .unwrap();
    let reply = sessions
        .dispatch_existing(&sid, OrderCommand::Complete)
        .await
        .unwrap();
    assert!(reply.starts_with("Awesome. We have placed your order."));
}

#[tokio::test]
async fn unreachable_store_fails_the_commit_and_keeps_the_order() {
    let sessions = registry(Arc::new(OfflineStore));
    let sid = "s1".to_string();

    sessions.dispatch(&sid, add(&[("samosa", 2)])).await.unwrap();
    let failure = sessions
        .dispatch_existing(&sid, OrderCommand::Complete)
        .await
        .unwrap_err();

    assert_eq!(entity_error(failure), OrderError::PersistenceFailure);
    assert!(sessions.snapshot(&sid).await.is_some());
}

#[tokio::test]
async fn reset_discards_the_order() {
    let sessions = registry(menu_store());
    let sid = "s1".to_string();

    sessions.dispatch(&sid, add(&[("samosa", 2)])).await.unwrap();
    let reply = sessions
        .dispatch_existing(&sid, OrderCommand::Reset)
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Okay, I've cleared your previous order. Please tell me what you'd like to order."
    );
    assert!(sessions.snapshot(&sid).await.is_none());
}

#[tokio::test]
async fn sessions_do_not_leak_across_conversations() {
    let sessions = registry(menu_store());
    let a = "s-a".to_string();
    let b = "s-b".to_string();

    sessions.dispatch(&a, add(&[("samosa", 2)])).await.unwrap();
    sessions.dispatch(&b, add(&[("chhole", 1)])).await.unwrap();

    let order_a = sessions.snapshot(&a).await.unwrap();
    assert_eq!(order_a.order().quantity("samosa"), Some(2));
    assert_eq!(order_a.order().quantity("chhole"), None);
    let order_b = sessions.snapshot(&b).await.unwrap();
    assert_eq!(order_b.order().quantity("chhole"), Some(1));
}
