// [libs/infra/memory-store/src/feedback_store.rs]
//! Implementación `libsql`-backed del contrato `FeedbackStore` de C9.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::params;
use meshdrift_core_graph_model::{EdgeKey, EventType, TenantContext};
use meshdrift_domain_feedback_memory::{
    FeedbackError, FeedbackRecord, FeedbackResult, FeedbackStore, FeedbackVerdict, SuppressRule, WhitelistEntry,
};
use tracing::instrument;

use crate::client::MemoryStoreClient;
use crate::errors::from_libsql;

pub struct LibsqlFeedbackStore {
    client: MemoryStoreClient,
}

impl LibsqlFeedbackStore {
    pub fn new(client: MemoryStoreClient) -> Self {
        LibsqlFeedbackStore { client }
    }
}

#[async_trait]
impl FeedbackStore for LibsqlFeedbackStore {
    #[instrument(skip(self, record))]
    async fn record_feedback(&self, tenant: &TenantContext, record: FeedbackRecord) -> FeedbackResult<()> {
        let tenant_id = tenant.require_write_tenant().map_err(crate::errors::from_core)?;
        let conn = self.client.connection()?;

        conn.execute(
            "INSERT INTO feedback (tenant_id, source, destination, event_type, verdict, note, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tenant_id,
                record.source.clone(),
                record.destination.clone(),
                event_type_to_str(record.event_type).to_string(),
                verdict_to_str(record.verdict).to_string(),
                record.note.clone(),
                record.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(from_libsql)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn latest_feedback(
        &self,
        tenant: &TenantContext,
        edge_key: &EdgeKey,
        event_type: EventType,
    ) -> FeedbackResult<Option<FeedbackRecord>> {
        let tenant_id = tenant.read_scope().map_err(crate::errors::from_core)?;
        let conn = self.client.connection()?;

        let mut rows = match tenant_id {
            Some(tenant_id) => conn
                .query(
                    "SELECT verdict, note, created_at FROM feedback \
                     WHERE tenant_id = ?1 AND source = ?2 AND destination = ?3 AND event_type = ?4 \
                     ORDER BY created_at DESC LIMIT 1",
                    params![
                        tenant_id.to_string(),
                        edge_key.0.clone(),
                        edge_key.1.clone(),
                        event_type_to_str(event_type).to_string()
                    ],
                )
                .await
                .map_err(from_libsql)?,
            None => conn
                .query(
                    "SELECT verdict, note, created_at FROM feedback \
                     WHERE source = ?1 AND destination = ?2 AND event_type = ?3 \
                     ORDER BY created_at DESC LIMIT 1",
                    params![edge_key.0.clone(), edge_key.1.clone(), event_type_to_str(event_type).to_string()],
                )
                .await
                .map_err(from_libsql)?,
        };

        match rows.next().await.map_err(from_libsql)? {
            Some(row) => {
                let verdict_raw: String = row.get(0).map_err(from_libsql)?;
                let note: Option<String> = row.get(1).map_err(from_libsql)?;
                let created_at_raw: String = row.get(2).map_err(from_libsql)?;

                let mut record = FeedbackRecord::new(
                    edge_key.0.clone(),
                    edge_key.1.clone(),
                    event_type,
                    verdict_from_str(&verdict_raw)?,
                    parse_rfc3339(&created_at_raw)?,
                );
                if let Some(note) = note {
                    record = record.with_note(note);
                }
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, entry))]
    async fn upsert_whitelist(&self, tenant: &TenantContext, entry: WhitelistEntry) -> FeedbackResult<()> {
        let tenant_id = tenant.require_write_tenant().map_err(crate::errors::from_core)?;
        let conn = self.client.connection()?;

        conn.execute(
            "INSERT INTO whitelist (tenant_id, source, destination, reason, created_at, expires_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             ON CONFLICT(tenant_id, source, destination) DO UPDATE SET \
             reason = excluded.reason, created_at = excluded.created_at, expires_at = excluded.expires_at",
            params![
                tenant_id,
                entry.source.clone(),
                entry.destination.clone(),
                entry.reason.clone(),
                entry.created_at.to_rfc3339(),
                entry.expires_at.map(|t| t.to_rfc3339()),
            ],
        )
        .await
        .map_err(from_libsql)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_whitelisted(&self, tenant: &TenantContext, edge_key: &EdgeKey) -> FeedbackResult<bool> {
        let tenant_id = tenant.read_scope().map_err(crate::errors::from_core)?;
        let conn = self.client.connection()?;

        let mut rows = match tenant_id {
            Some(tenant_id) => conn
                .query(
                    "SELECT expires_at FROM whitelist WHERE tenant_id = ?1 AND source = ?2 AND destination = ?3",
                    params![tenant_id.to_string(), edge_key.0.clone(), edge_key.1.clone()],
                )
                .await
                .map_err(from_libsql)?,
            None => conn
                .query(
                    "SELECT expires_at FROM whitelist WHERE source = ?1 AND destination = ?2",
                    params![edge_key.0.clone(), edge_key.1.clone()],
                )
                .await
                .map_err(from_libsql)?,
        };

        match rows.next().await.map_err(from_libsql)? {
            Some(row) => {
                let expires_at: Option<String> = row.get(0).map_err(from_libsql)?;
                let active = match expires_at {
                    Some(raw) => Utc::now() < parse_rfc3339(&raw)?,
                    None => true,
                };
                Ok(active)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn list_active_suppress_rules(&self, tenant: &TenantContext) -> FeedbackResult<Vec<SuppressRule>> {
        let tenant_id = tenant.read_scope().map_err(crate::errors::from_core)?;
        let conn = self.client.connection()?;

        let mut rows = match tenant_id {
            Some(tenant_id) => conn
                .query(
                    "SELECT event_type, service_pattern, reason, created_at, expires_at FROM suppress_rules WHERE tenant_id = ?1",
                    params![tenant_id.to_string()],
                )
                .await
                .map_err(from_libsql)?,
            None => conn
                .query(
                    "SELECT event_type, service_pattern, reason, created_at, expires_at FROM suppress_rules",
                    (),
                )
                .await
                .map_err(from_libsql)?,
        };

        let mut rules = Vec::new();
        while let Some(row) = rows.next().await.map_err(from_libsql)? {
            let event_type_raw: String = row.get(0).map_err(from_libsql)?;
            let service_pattern: String = row.get(1).map_err(from_libsql)?;
            let reason: String = row.get(2).map_err(from_libsql)?;
            let created_at_raw: String = row.get(3).map_err(from_libsql)?;
            let expires_at_raw: Option<String> = row.get(4).map_err(from_libsql)?;

            let expires_at = expires_at_raw.as_deref().map(parse_rfc3339).transpose()?;
            let rule = SuppressRule {
                event_type: event_type_from_str(&event_type_raw)?,
                service_pattern,
                reason,
                created_at: parse_rfc3339(&created_at_raw)?,
                expires_at,
            };

            if rule.is_active_at(Utc::now()) {
                rules.push(rule);
            }
        }

        Ok(rules)
    }
}

fn event_type_to_str(event_type: EventType) -> &'static str {
    event_type.as_str()
}

fn event_type_from_str(value: &str) -> FeedbackResult<EventType> {
    match value {
        "new_edge" => Ok(EventType::NewEdge),
        "removed_edge" => Ok(EventType::RemovedEdge),
        "error_spike" => Ok(EventType::ErrorSpike),
        "latency_spike" => Ok(EventType::LatencySpike),
        "traffic_spike" => Ok(EventType::TrafficSpike),
        "blast_radius_increase" => Ok(EventType::BlastRadiusIncrease),
        other => Err(FeedbackError::Unavailable(format!("corrupt event_type '{other}'"))),
    }
}

fn verdict_to_str(verdict: FeedbackVerdict) -> &'static str {
    match verdict {
        FeedbackVerdict::FalsePositive => "false_positive",
        FeedbackVerdict::Expected => "expected",
        FeedbackVerdict::TruePositive => "true_positive",
    }
}

fn verdict_from_str(value: &str) -> FeedbackResult<FeedbackVerdict> {
    match value {
        "false_positive" => Ok(FeedbackVerdict::FalsePositive),
        "expected" => Ok(FeedbackVerdict::Expected),
        "true_positive" => Ok(FeedbackVerdict::TruePositive),
        other => Err(FeedbackError::Unavailable(format!("corrupt verdict '{other}'"))),
    }
}

fn parse_rfc3339(value: &str) -> FeedbackResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FeedbackError::Unavailable(format!("corrupt timestamp '{value}': {e}")))
}
