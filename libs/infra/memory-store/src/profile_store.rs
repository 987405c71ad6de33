// [libs/infra/memory-store/src/profile_store.rs]
//! Persistencia de `EdgeProfile` (C7): no forma parte del contrato de
//! `FeedbackStore` porque vive en un dominio distinto (baseline ML vs.
//! feedback humano), pero comparte base de datos y cliente.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::params;
use meshdrift_core_graph_model::{EdgeKey, EdgeProfile, MetricStats, TenantContext};
use tracing::instrument;

use crate::client::MemoryStoreClient;
use crate::errors::{from_core, from_libsql, StoreResult};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, tenant: &TenantContext, edge_key: &EdgeKey) -> StoreResult<Option<EdgeProfile>>;

    async fn save_profile(&self, tenant: &TenantContext, profile: &EdgeProfile) -> StoreResult<()>;
}

pub struct LibsqlProfileStore {
    client: MemoryStoreClient,
}

impl LibsqlProfileStore {
    pub fn new(client: MemoryStoreClient) -> Self {
        LibsqlProfileStore { client }
    }
}

#[async_trait]
impl ProfileStore for LibsqlProfileStore {
    #[instrument(skip(self))]
    async fn get_profile(&self, tenant: &TenantContext, edge_key: &EdgeKey) -> StoreResult<Option<EdgeProfile>> {
        let tenant_id = tenant.read_scope().map_err(from_core)?;
        let conn = self.client.connection()?;

        let mut rows = match tenant_id {
            Some(tenant_id) => conn
                .query(
                    "SELECT request_count_mean, request_count_std, error_rate_mean, error_rate_std, \
                     p99_latency_mean, p99_latency_std, sample_count, last_updated \
                     FROM edge_profiles WHERE tenant_id = ?1 AND source = ?2 AND destination = ?3",
                    params![tenant_id.to_string(), edge_key.0.clone(), edge_key.1.clone()],
                )
                .await
                .map_err(from_libsql)?,
            None => conn
                .query(
                    "SELECT request_count_mean, request_count_std, error_rate_mean, error_rate_std, \
                     p99_latency_mean, p99_latency_std, sample_count, last_updated \
                     FROM edge_profiles WHERE source = ?1 AND destination = ?2",
                    params![edge_key.0.clone(), edge_key.1.clone()],
                )
                .await
                .map_err(from_libsql)?,
        };

        match rows.next().await.map_err(from_libsql)? {
            Some(row) => {
                let request_count = MetricStats::new(
                    row.get::<f64>(0).map_err(from_libsql)?,
                    row.get::<f64>(1).map_err(from_libsql)?,
                );
                let error_rate = MetricStats::new(
                    row.get::<f64>(2).map_err(from_libsql)?,
                    row.get::<f64>(3).map_err(from_libsql)?,
                );
                let p99_latency_ms = MetricStats::new(
                    row.get::<f64>(4).map_err(from_libsql)?,
                    row.get::<f64>(5).map_err(from_libsql)?,
                );
                let sample_count: i64 = row.get(6).map_err(from_libsql)?;
                let last_updated: String = row.get(7).map_err(from_libsql)?;

                Ok(Some(EdgeProfile::new(
                    edge_key.clone(),
                    request_count,
                    error_rate,
                    p99_latency_ms,
                    sample_count as u32,
                    parse_rfc3339(&last_updated)?,
                )))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, profile))]
    async fn save_profile(&self, tenant: &TenantContext, profile: &EdgeProfile) -> StoreResult<()> {
        let tenant_id = tenant.require_write_tenant().map_err(from_core)?;
        let conn = self.client.connection()?;

        conn.execute(
            "INSERT INTO edge_profiles (tenant_id, source, destination, request_count_mean, request_count_std, \
             error_rate_mean, error_rate_std, p99_latency_mean, p99_latency_std, sample_count, last_updated) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
             ON CONFLICT(tenant_id, source, destination) DO UPDATE SET \
             request_count_mean = excluded.request_count_mean, \
             request_count_std = excluded.request_count_std, \
             error_rate_mean = excluded.error_rate_mean, \
             error_rate_std = excluded.error_rate_std, \
             p99_latency_mean = excluded.p99_latency_mean, \
             p99_latency_std = excluded.p99_latency_std, \
             sample_count = excluded.sample_count, \
             last_updated = excluded.last_updated",
            params![
                tenant_id,
                profile.edge_key.0.clone(),
                profile.edge_key.1.clone(),
                profile.request_count.mean,
                profile.request_count.std,
                profile.error_rate.mean,
                profile.error_rate.std,
                profile.p99_latency_ms.mean,
                profile.p99_latency_ms.std,
                profile.sample_count as i64,
                profile.last_updated.to_rfc3339(),
            ],
        )
        .await
        .map_err(from_libsql)?;

        Ok(())
    }
}

fn parse_rfc3339(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| meshdrift_domain_feedback_memory::FeedbackError::Unavailable(format!(
            "corrupt timestamp '{value}': {e}"
        )))
}
