// [libs/core/integration-facade/src/publisher.rs]
//! `Publisher`: hand-off en tiempo real, fire-and-forget, hacia el tópico
//! `drift_events:<tenant_id>` (§6). Opcional por diseño — ver Design Note
//! "Pub/sub is optional": si no hay suscriptores, la tubería sigue siendo
//! correcta porque las tareas y el estado no dependen de este canal.

use async_trait::async_trait;

use crate::error::FacadeResult;

pub fn drift_topic(tenant_id: &str) -> String {
    format!("drift_events:{tenant_id}")
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> FacadeResult<()>;
}

/// Publisher que solo registra por tracing — ningún suscriptor real
/// detrás de él, pero la interfaz se mantiene satisfecha.
pub struct LoggingPublisher;

#[async_trait]
impl Publisher for LoggingPublisher {
    async fn publish(&self, topic: &str, payload: serde_json::Value) -> FacadeResult<()> {
        tracing::debug!(topic = %topic, payload = %payload, "📡 [PUBLISHER_NOOP]: realtime fan-out (no subscribers wired)");
        Ok(())
    }
}
