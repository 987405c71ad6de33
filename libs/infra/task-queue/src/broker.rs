// [libs/infra/task-queue/src/broker.rs]
/*!
 * =================================================================
 * APARATO: IN-PROCESS TASK BROKER (C12)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: COLA MPSC POR TIPO DE TAREA + COALESCING
 *
 * Un broker durable (Redis/SQS/tabla Turso) satisface el mismo
 * contrato sin que `apps/orchestrator` cambie un solo cuerpo de tarea —
 * ver Design Note "Task broker abstraction".
 * =================================================================
 */

use std::sync::Arc;

use dashmap::DashSet;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::envelope::{TaskEnvelope, TaskKind};
use crate::error::{TaskError, TaskResult};

const QUEUE_CAPACITY: usize = 1024;

struct Queue {
    sender: mpsc::Sender<TaskEnvelope>,
    receiver: Mutex<Option<mpsc::Receiver<TaskEnvelope>>>,
}

/// Broker de colas en memoria, una por `TaskKind`, más el set de
/// coalescing compartido entre las tres.
pub struct TaskBroker {
    queues: [Queue; 3],
    in_flight: DashSet<String>,
}

impl Default for TaskBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBroker {
    pub fn new() -> Self {
        let build = mpsc::channel(QUEUE_CAPACITY);
        let drift = mpsc::channel(QUEUE_CAPACITY);
        let notify = mpsc::channel(QUEUE_CAPACITY);

        TaskBroker {
            queues: [
                Queue {
                    sender: build.0,
                    receiver: Mutex::new(Some(build.1)),
                },
                Queue {
                    sender: drift.0,
                    receiver: Mutex::new(Some(drift.1)),
                },
                Queue {
                    sender: notify.0,
                    receiver: Mutex::new(Some(notify.1)),
                },
            ],
            in_flight: DashSet::new(),
        }
    }

    fn queue_for(&self, kind: TaskKind) -> &Queue {
        match kind {
            TaskKind::BuildSnapshot => &self.queues[0],
            TaskKind::DetectDrift => &self.queues[1],
            TaskKind::SendNotifications => &self.queues[2],
        }
    }

    /// Encola `envelope`. Si trae `coalesce_key` y ya existe un envío
    /// en vuelo con la misma clave, la tarea se descarta silenciosamente
    /// y se devuelve `Ok(false)` — el caller no debe tratarlo como error
    /// (§4.11: "build_snapshot for the same window must serialize").
    pub async fn enqueue(&self, envelope: TaskEnvelope) -> TaskResult<bool> {
        if let Some(key) = &envelope.coalesce_key {
            if !self.in_flight.insert(key.clone()) {
                debug!(coalesce_key = %key, "⏭️  [TASK_QUEUE]: coalesced, skipping duplicate enqueue");
                return Ok(false);
            }
        }

        let queue = self.queue_for(envelope.kind);
        queue
            .sender
            .send(envelope)
            .await
            .map_err(|e| TaskError::Unavailable(format!("queue closed: {e}")))?;

        Ok(true)
    }

    /// Libera una clave de coalescing una vez que la tarea que la
    /// sostenía terminó (con éxito o tras agotar reintentos).
    pub fn release_coalesce_key(&self, key: &str) {
        self.in_flight.remove(key);
    }

    /// Toma el receptor de `kind` — solo puede llamarse una vez por
    /// kind; un segundo intento retorna `None` (ya fue tomado por el
    /// primer `subscribe`).
    pub async fn take_receiver(&self, kind: TaskKind) -> Option<mpsc::Receiver<TaskEnvelope>> {
        self.queue_for(kind).receiver.lock().await.take()
    }
}

/// Bucle de consumo perpetuo para una cola: retira envíos, ejecuta
/// `handler` bajo la política de reintentos de `kind`, libera el
/// coalescing key al terminar. Espejo del idiom `spawn_reaper` del
/// teacher: un `tokio::spawn` con un loop que nunca retorna salvo que
/// el canal se cierre.
pub async fn run_consumer<F, Fut>(
    broker: Arc<TaskBroker>,
    kind: TaskKind,
    mut receiver: mpsc::Receiver<TaskEnvelope>,
    handler: F,
) where
    F: Fn(TaskEnvelope) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = TaskResult<()>> + Send,
{
    info!(queue = kind.queue_name(), "🚦 [TASK_QUEUE]: consumer online");

    while let Some(envelope) = receiver.recv().await {
        let coalesce_key = envelope.coalesce_key.clone();
        let result = crate::retry::with_retry(kind, envelope, &handler).await;

        if let Some(key) = coalesce_key {
            broker.release_coalesce_key(&key);
        }

        if let Err(error) = result {
            warn!(queue = kind.queue_name(), %error, "❌ [TASK_QUEUE]: task exhausted retries, dropping");
        }
    }

    warn!(queue = kind.queue_name(), "🛑 [TASK_QUEUE]: channel closed, consumer exiting");
}
