/*!
 * =================================================================
 * APARATO: SNAPSHOT STORE (C2)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA TENANT-SCOPED DE SNAPSHOTS
 *
 * Única capa del workspace que habla `libsql` para `Snapshot`/`Node`/
 * `Edge`. C3-C11 operan sobre valores en memoria; este crate es su
 * frontera de I/O: todo lo que entra o sale pasa por `TenantContext`.
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repository;
pub mod schema;

pub use client::SnapshotStoreClient;
pub use errors::{StoreError, StoreResult};
pub use repository::SnapshotRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use meshdrift_core_graph_model::{Edge, Node, Snapshot, TenantContext};

    fn ts(hour: u32) -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap() + chrono::Duration::hours(hour as i64)
    }

    async fn repo() -> SnapshotRepository {
        let client = SnapshotStoreClient::connect(":memory:", None).await.unwrap();
        SnapshotRepository::new(client)
    }

    fn sample(id: &str) -> Snapshot {
        let nodes = vec![
            Node::new("checkout-svc", None, None).unwrap(),
            Node::new("orders-db", None, None).unwrap(),
        ];
        let edges = vec![Edge::new("checkout-svc", "orders-db", 100, 2, 10.0, 25.0).unwrap()];
        Snapshot::new(id, ts(0), ts(1), nodes, edges).unwrap()
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");
        let snapshot = sample("snap-1");

        repository.save(&tenant, &snapshot).await.unwrap();
        let loaded = repository.get(&tenant, "snap-1").await.unwrap();

        assert_eq!(loaded.snapshot_id, "snap-1");
        assert_eq!(loaded.edge_count(), 1);
        assert_eq!(loaded.nodes().len(), 2);
    }

    #[tokio::test]
    async fn save_is_idempotent_upsert() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");
        let snapshot = sample("snap-1");

        repository.save(&tenant, &snapshot).await.unwrap();
        repository.save(&tenant, &snapshot).await.unwrap();

        let loaded = repository.get(&tenant, "snap-1").await.unwrap();
        assert_eq!(loaded.edge_count(), 1);
    }

    #[tokio::test]
    async fn cross_tenant_read_is_not_found_not_forbidden() {
        let repository = repo().await;
        let owner = TenantContext::for_tenant("acme");
        let intruder = TenantContext::for_tenant("globex");
        repository.save(&owner, &sample("snap-1")).await.unwrap();

        let result = repository.get(&intruder, "snap-1").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_missing_snapshot_is_not_found() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");
        let result = repository.get(&tenant, "nope").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_latest_two_returns_none_below_two_snapshots() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");
        repository.save(&tenant, &sample("snap-1")).await.unwrap();

        assert!(repository.get_latest_two(&tenant).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_latest_two_orders_previous_before_latest() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");

        let mut first = sample("snap-1");
        first.timestamp_start = ts(0);
        first.timestamp_end = ts(1);
        let mut second = sample("snap-2");
        second.timestamp_start = ts(1);
        second.timestamp_end = ts(2);

        repository.save(&tenant, &first).await.unwrap();
        repository.save(&tenant, &second).await.unwrap();

        let (previous, latest) = repository.get_latest_two(&tenant).await.unwrap().unwrap();
        assert_eq!(previous.snapshot_id, "snap-1");
        assert_eq!(latest.snapshot_id, "snap-2");
    }

    #[tokio::test]
    async fn delete_removes_header_and_children() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");
        repository.save(&tenant, &sample("snap-1")).await.unwrap();

        assert!(repository.delete(&tenant, "snap-1").await.unwrap());
        assert!(matches!(
            repository.get(&tenant, "snap-1").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_missing_snapshot_returns_false() {
        let repository = repo().await;
        let tenant = TenantContext::for_tenant("acme");
        assert!(!repository.delete(&tenant, "nope").await.unwrap());
    }

    #[tokio::test]
    async fn write_without_tenant_is_rejected() {
        let repository = repo().await;
        let super_admin = TenantContext::super_admin();
        let result = repository.save(&super_admin, &sample("snap-1")).await;
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }
}
