/*!
 * =================================================================
 * APARATO: MEMORY STORE (C7 / C9)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA TENANT-SCOPED DE BASELINE ML, FEEDBACK
 *                  Y WHITELIST
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod feedback_store;
pub mod profile_store;
pub mod schema;

pub use client::MemoryStoreClient;
pub use errors::{StoreError, StoreResult};
pub use feedback_store::LibsqlFeedbackStore;
pub use profile_store::{LibsqlProfileStore, ProfileStore};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use meshdrift_core_graph_model::{EdgeProfile, EventType, MetricStats, TenantContext};
    use meshdrift_domain_feedback_memory::{FeedbackRecord, FeedbackStore, FeedbackVerdict, WhitelistEntry};

    async fn client() -> MemoryStoreClient {
        MemoryStoreClient::connect(":memory:", None).await.unwrap()
    }

    #[tokio::test]
    async fn feedback_round_trips_latest_by_edge_and_type() {
        let store = LibsqlFeedbackStore::new(client().await);
        let tenant = TenantContext::for_tenant("acme");

        let first = FeedbackRecord::new(
            "order-svc",
            "payments-db",
            EventType::NewEdge,
            FeedbackVerdict::TruePositive,
            Utc::now() - chrono::Duration::hours(1),
        );
        let second = FeedbackRecord::new(
            "order-svc",
            "payments-db",
            EventType::NewEdge,
            FeedbackVerdict::Expected,
            Utc::now(),
        )
        .with_note("confirmed rollout");

        store.record_feedback(&tenant, first).await.unwrap();
        store.record_feedback(&tenant, second).await.unwrap();

        let latest = store
            .latest_feedback(&tenant, &("order-svc".to_string(), "payments-db".to_string()), EventType::NewEdge)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(latest.verdict, FeedbackVerdict::Expected);
        assert_eq!(latest.note.as_deref(), Some("confirmed rollout"));
    }

    #[tokio::test]
    async fn whitelist_upsert_is_idempotent_and_cross_tenant_isolated() {
        let store = LibsqlFeedbackStore::new(client().await);
        let owner = TenantContext::for_tenant("acme");
        let other = TenantContext::for_tenant("globex");

        let entry = WhitelistEntry::new("svc-a", "svc-b", "manual", Utc::now());
        store.upsert_whitelist(&owner, entry.clone()).await.unwrap();
        store.upsert_whitelist(&owner, entry).await.unwrap();

        let edge_key = ("svc-a".to_string(), "svc-b".to_string());
        assert!(store.is_whitelisted(&owner, &edge_key).await.unwrap());
        assert!(!store.is_whitelisted(&other, &edge_key).await.unwrap());
    }

    #[tokio::test]
    async fn expired_whitelist_entry_is_not_active() {
        let store = LibsqlFeedbackStore::new(client().await);
        let tenant = TenantContext::for_tenant("acme");

        let entry = WhitelistEntry::new("svc-a", "svc-b", "temp", Utc::now() - chrono::Duration::hours(2))
            .with_expiry(Utc::now() - chrono::Duration::hours(1));
        store.upsert_whitelist(&tenant, entry).await.unwrap();

        let edge_key = ("svc-a".to_string(), "svc-b".to_string());
        assert!(!store.is_whitelisted(&tenant, &edge_key).await.unwrap());
    }

    #[tokio::test]
    async fn profile_save_then_get_round_trips() {
        let store = LibsqlProfileStore::new(client().await);
        let tenant = TenantContext::for_tenant("acme");
        let edge_key = ("order-svc".to_string(), "payments-db".to_string());

        let profile = EdgeProfile::new(
            edge_key.clone(),
            MetricStats::new(100.0, 10.0),
            MetricStats::new(0.02, 0.01),
            MetricStats::new(25.0, 5.0),
            6,
            Utc::now(),
        );
        store.save_profile(&tenant, &profile).await.unwrap();

        let loaded = store.get_profile(&tenant, &edge_key).await.unwrap().unwrap();
        assert_eq!(loaded.sample_count, 6);
        assert!((loaded.request_count.mean - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn profile_missing_returns_none() {
        let store = LibsqlProfileStore::new(client().await);
        let tenant = TenantContext::for_tenant("acme");
        let edge_key = ("a".to_string(), "b".to_string());
        assert!(store.get_profile(&tenant, &edge_key).await.unwrap().is_none());
    }
}
