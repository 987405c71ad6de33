// [apps/orchestrator/src/state.rs]
//! `CoreServices`: el registro explícito que sustituye a cualquier
//! singleton de proceso (Design Note "Global stores → explicit
//! registries", §9). Se construye una vez en `main.rs` y se clona
//! (barato, todo detrás de `Arc`) hacia cada cuerpo de tarea y cada
//! daemon de cron.

use std::sync::Arc;

use anyhow::Result;
use meshdrift_core_integration_facade::{
    EmptyIngestor, Ingestor, LoggingNotifier, LoggingPublisher, NoPolicyRenderer, Notifier, PolicyRenderer,
    Publisher,
};
use meshdrift_domain_feedback_memory::FeedbackStore;
use meshdrift_domain_risk_engine::RiskEngineConfig;
use meshdrift_infra_memory_store::{LibsqlFeedbackStore, LibsqlProfileStore, MemoryStoreClient, ProfileStore};
use meshdrift_infra_snapshot_store::{SnapshotRepository, SnapshotStoreClient};
use meshdrift_infra_task_queue::TaskBroker;

use crate::config::{OrchestratorConfig, TenantSource};

/// Registro de colaboradores construidos, compartido por todo el
/// proceso. Cada campo es el tipo concreto o un trait object detrás de
/// `Arc` — nunca una variable `static`/`OnceCell` de proceso.
#[derive(Clone)]
pub struct CoreServices {
    pub snapshots: Arc<SnapshotRepository>,
    pub profiles: Arc<dyn ProfileStore>,
    pub feedback: Arc<dyn FeedbackStore>,
    pub ingestor: Arc<dyn Ingestor>,
    pub notifiers: Arc<Vec<Arc<dyn Notifier>>>,
    pub policy_renderer: Arc<dyn PolicyRenderer>,
    pub publisher: Arc<dyn Publisher>,
    pub broker: Arc<TaskBroker>,
    pub risk_engine: Arc<RiskEngineConfig>,
    pub tenants: Arc<Vec<TenantSource>>,
    pub retention_days: i64,
}

impl CoreServices {
    /// Conecta ambas bases libsql, instala los adaptadores no-op por
    /// defecto (§4.12: en ausencia de un colaborador externo real, la
    /// tubería debe seguir progresando) y arma el broker en memoria.
    pub async fn bootstrap(config: &OrchestratorConfig) -> Result<Self> {
        let snapshot_client =
            SnapshotStoreClient::connect(&config.snapshot_db_url, config.snapshot_db_token.clone()).await?;
        let memory_client =
            MemoryStoreClient::connect(&config.memory_db_url, config.memory_db_token.clone()).await?;

        let snapshots = Arc::new(SnapshotRepository::new(snapshot_client));
        let profiles: Arc<dyn ProfileStore> = Arc::new(LibsqlProfileStore::new(memory_client.clone()));
        let feedback: Arc<dyn FeedbackStore> = Arc::new(LibsqlFeedbackStore::new(memory_client));

        Ok(CoreServices {
            snapshots,
            profiles,
            feedback,
            ingestor: Arc::new(EmptyIngestor),
            notifiers: Arc::new(vec![Arc::new(LoggingNotifier::new("default"))]),
            policy_renderer: Arc::new(NoPolicyRenderer),
            publisher: Arc::new(LoggingPublisher),
            broker: Arc::new(TaskBroker::new()),
            risk_engine: Arc::new(config.risk_engine.clone()),
            tenants: Arc::new(config.tenants.clone()),
            retention_days: config.retention_days,
        })
    }
}
