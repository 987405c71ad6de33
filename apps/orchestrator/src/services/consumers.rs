// [apps/orchestrator/src/services/consumers.rs]
//! Arranca los tres consumidores de `TaskBroker` sobre los cuerpos de
//! tarea reales. Espejo del idiom `spawn_reaper` del teacher: cada
//! consumidor es un `tokio::spawn` que corre hasta que el canal se cierra.

use meshdrift_infra_task_queue::{run_consumer, TaskKind};
use tracing::warn;

use crate::state::CoreServices;
use crate::tasks::{
    build_snapshot::build_snapshot_task, detect_drift::detect_drift_task,
    send_notifications::send_notifications_task,
};

/// Suscribe y lanza los tres consumidores. Debe llamarse una única vez
/// por proceso — un segundo intento de `take_receiver` sobre el mismo
/// `TaskKind` encontraría la cola ya tomada.
pub async fn spawn_all(services: CoreServices) {
    spawn_one(services.clone(), TaskKind::BuildSnapshot, build_snapshot_task).await;
    spawn_one(services.clone(), TaskKind::DetectDrift, detect_drift_task).await;
    spawn_one(services, TaskKind::SendNotifications, send_notifications_task).await;
}

async fn spawn_one<F, Fut>(services: CoreServices, kind: TaskKind, handler: F)
where
    F: Fn(CoreServices, meshdrift_infra_task_queue::TaskEnvelope) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = meshdrift_infra_task_queue::TaskResult<()>> + Send,
{
    let broker = services.broker.clone();
    let receiver = match broker.take_receiver(kind).await {
        Some(receiver) => receiver,
        None => {
            warn!(queue = kind.queue_name(), "🛑 [CONSUMERS]: receiver already taken, skipping spawn");
            return;
        }
    };

    tokio::spawn(async move {
        run_consumer(broker, kind, receiver, move |envelope| handler(services.clone(), envelope)).await;
    });
}
