//! `SQLite` integration tests for adapter persistence.

use super::helpers::{SqliteContext, sqlite};
use mcp_coordinator::adapter_registry::{
    adapters::sqlite::SqliteAdapterStore,
    domain::{AdapterId, AdapterStatus},
    ports::AdapterStore,
    services::{AdapterRegistry, RegisterAdapterRequest},
};
use mcp_coordinator::packet::domain::DataType;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Map, json};
use std::sync::Arc;

fn registry(
    context: &SqliteContext,
) -> AdapterRegistry<SqliteAdapterStore, DefaultClock> {
    AdapterRegistry::new(
        Arc::new(SqliteAdapterStore::new(context.pool.clone())),
        Arc::new(DefaultClock),
    )
}

fn adapter_id(raw: &str) -> AdapterId {
    AdapterId::new(raw).expect("valid adapter id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_round_trips_through_sqlite(sqlite: SqliteContext) {
    let registry = registry(&sqlite);
    let metadata = Map::from_iter([("version".to_owned(), json!("1.2"))]);
    let created = registry
        .register(
            RegisterAdapterRequest::new("m1", "Manus", "http://localhost:8001")
                .with_status(AdapterStatus::Inactive)
                .with_data_types([DataType::ManusConversation, DataType::InteractionLog])
                .with_metadata(metadata),
        )
        .await
        .expect("registration should succeed");

    let stored = registry
        .store()
        .find(&adapter_id("m1"))
        .await
        .expect("lookup should succeed")
        .expect("m1 is persisted");

    assert_eq!(stored.name(), "Manus");
    assert_eq!(stored.status(), AdapterStatus::Inactive);
    assert_eq!(
        stored.data_types(),
        &[DataType::ManusConversation, DataType::InteractionLog]
    );
    assert_eq!(stored.metadata().get("version"), Some(&json!("1.2")));
    assert_eq!(stored.last_heartbeat(), created.last_heartbeat());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reregistration_replaces_durable_row(sqlite: SqliteContext) {
    let registry = registry(&sqlite);
    for name in ["Manus", "Manus v2"] {
        registry
            .register(RegisterAdapterRequest::new("m1", name, "http://localhost:8001"))
            .await
            .expect("registration should succeed");
    }

    let all = registry.store().list_all().await.expect("list succeeds");
    assert_eq!(all.len(), 1);
    assert_eq!(all.first().map(|adapter| adapter.name()), Some("Manus v2"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn durable_rows_outlive_the_registry(sqlite: SqliteContext) {
    let first = registry(&sqlite);
    first
        .register(RegisterAdapterRequest::new("m1", "Manus", "http://x"))
        .await
        .expect("registration should succeed");
    first.close();

    let store = SqliteAdapterStore::new(sqlite.reopen());
    let restarted = AdapterRegistry::new(Arc::new(store), Arc::new(DefaultClock));

    assert!(restarted.status().expect("registry is open").is_empty());
    let persisted = restarted
        .store()
        .find(&adapter_id("m1"))
        .await
        .expect("lookup should succeed");
    assert!(persisted.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_adapter_is_absent(sqlite: SqliteContext) {
    let store = SqliteAdapterStore::new(sqlite.pool.clone());
    let found = store
        .find(&adapter_id("missing"))
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}
