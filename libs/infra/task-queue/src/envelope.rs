// [libs/infra/task-queue/src/envelope.rs]
//! Forma de mensaje que viaja por la cola en proceso.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind cerrado de tarea (§4.11): cada variante conoce su propio delay
/// base de reintento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    BuildSnapshot,
    DetectDrift,
    SendNotifications,
}

impl TaskKind {
    pub fn queue_name(&self) -> &'static str {
        match self {
            TaskKind::BuildSnapshot => "build_snapshot_task",
            TaskKind::DetectDrift => "detect_drift_task",
            TaskKind::SendNotifications => "send_notifications_task",
        }
    }

    /// Delay base en segundos para `15·2^n`/`30·2^n`/`60·2^n` (§4.11).
    pub fn base_delay_secs(&self) -> u64 {
        match self {
            TaskKind::BuildSnapshot => 15,
            TaskKind::DetectDrift => 30,
            TaskKind::SendNotifications => 60,
        }
    }

    /// Plazo blando por tarea (§5): 60s/30s/30s.
    pub fn soft_deadline_secs(&self) -> u64 {
        match self {
            TaskKind::BuildSnapshot => 60,
            TaskKind::DetectDrift => 30,
            TaskKind::SendNotifications => 30,
        }
    }
}

/// Mensaje en tránsito. `coalesce_key`, cuando está presente, es la
/// clave `(tenant_id, window_start)` usada para deduplicar encolados
/// concurrentes (§4.11).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub kind: TaskKind,
    pub args: serde_json::Value,
    pub tenant_id: String,
    pub coalesce_key: Option<String>,
    pub attempt: u32,
    pub enqueued_at: DateTime<Utc>,
}

impl TaskEnvelope {
    pub fn new(kind: TaskKind, tenant_id: impl Into<String>, args: serde_json::Value) -> Self {
        TaskEnvelope {
            kind,
            args,
            tenant_id: tenant_id.into(),
            coalesce_key: None,
            attempt: 0,
            enqueued_at: Utc::now(),
        }
    }

    pub fn with_coalesce_key(mut self, key: impl Into<String>) -> Self {
        self.coalesce_key = Some(key.into());
        self
    }

    pub fn next_attempt(&self) -> Self {
        let mut retried = self.clone();
        retried.attempt += 1;
        retried
    }
}
