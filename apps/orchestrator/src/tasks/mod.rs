// [apps/orchestrator/src/tasks/mod.rs]
/*!
 * Cuerpos de las tres tareas nombradas (§4.11) más el refresco de
 * baseline, que no es una de las tres y por eso el cron lo invoca
 * directamente en vez de pasar por el `TaskBroker` (ver
 * `services::cron`).
 *
 * Cada `From<XError> for TaskError` viviría en un crate ajeno a ambos
 * tipos (regla de huérfanos) — de ahí las funciones libres de
 * conversión en vez de `impl From`.
 */

pub mod baseline_refresh;
pub mod build_snapshot;
pub mod detect_drift;
pub mod send_notifications;

use meshdrift_core_graph_model::CoreError;
use meshdrift_core_integration_facade::FacadeError;
use meshdrift_domain_feedback_memory::FeedbackError;
use meshdrift_infra_snapshot_store::StoreError as SnapshotStoreError;
use meshdrift_infra_task_queue::TaskError;

pub fn from_core(error: CoreError) -> TaskError {
    TaskError::Failed(error.to_string())
}

pub fn from_snapshot_store(error: SnapshotStoreError) -> TaskError {
    if error.is_retryable() {
        TaskError::Unavailable(error.to_string())
    } else {
        TaskError::Failed(error.to_string())
    }
}

pub fn from_feedback(error: FeedbackError) -> TaskError {
    match error {
        FeedbackError::Unavailable(_) => TaskError::Unavailable(error.to_string()),
        FeedbackError::NotFound(_) | FeedbackError::InvalidArgument(_) => TaskError::Failed(error.to_string()),
    }
}

pub fn from_facade(error: FacadeError) -> TaskError {
    if error.is_retryable() {
        TaskError::Unavailable(error.to_string())
    } else {
        TaskError::Failed(error.to_string())
    }
}
