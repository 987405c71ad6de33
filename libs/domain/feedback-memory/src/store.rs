// [libs/domain/feedback-memory/src/store.rs]
//! Contrato de persistencia para feedback/whitelist/supresión — la
//! implementación `libsql`-backed vive en `meshdrift-infra-memory-store`;
//! este crate solo define la forma del dato y del trait (C9).

use async_trait::async_trait;
use meshdrift_core_graph_model::{EdgeKey, EventType, TenantContext};

use crate::error::FeedbackResult;
use crate::record::FeedbackRecord;
use crate::whitelist::{SuppressRule, WhitelistEntry};

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn record_feedback(&self, tenant: &TenantContext, record: FeedbackRecord) -> FeedbackResult<()>;

    /// El más reciente por `created_at` para la arista + tipo de evento
    /// dados, dentro del tenant (§4.8).
    async fn latest_feedback(
        &self,
        tenant: &TenantContext,
        edge_key: &EdgeKey,
        event_type: EventType,
    ) -> FeedbackResult<Option<FeedbackRecord>>;

    async fn upsert_whitelist(&self, tenant: &TenantContext, entry: WhitelistEntry) -> FeedbackResult<()>;

    async fn is_whitelisted(&self, tenant: &TenantContext, edge_key: &EdgeKey) -> FeedbackResult<bool>;

    async fn list_active_suppress_rules(&self, tenant: &TenantContext) -> FeedbackResult<Vec<SuppressRule>>;
}
