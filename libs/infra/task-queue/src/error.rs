// [libs/infra/task-queue/src/error.rs]
//! Catálogo de errores de C12 (§7): solo `unavailable`/`timeout` se
//! reintentan; cualquier otra variante es terminal para ese intento.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// El cuerpo de la tarea falló por una causa que un reintento no
    /// arregla (argumento inválido, violación de invariante).
    #[error("[TASK_FAILED]: {0}")]
    Failed(String),

    /// Fallo transitorio (DB, publisher, adaptador downstream) — se
    /// reintenta hasta agotar los 3 intentos.
    #[error("[TASK_UNAVAILABLE]: {0}")]
    Unavailable(String),

    /// El plazo blando de la tarea expiró entre fases; se reintenta en
    /// el próximo tick de cron, no dentro del mismo intento.
    #[error("[TASK_TIMEOUT]: deadline of {0:?} exceeded")]
    Timeout(std::time::Duration),

    /// Cancelación cooperativa observada entre fases; no deja estado
    /// parcial.
    #[error("[TASK_CANCELLED]")]
    Cancelled,
}

impl TaskError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TaskError::Unavailable(_) | TaskError::Timeout(_))
    }
}

pub type TaskResult<T> = Result<T, TaskError>;
