// [libs/infra/task-queue/src/retry.rs]
//! Envoltura de reintentos (§4.11): 3 intentos, backoff `base·2^n`
//! donde `base` es el delay propio del `TaskKind`. Solo
//! `TaskError::is_retryable` dispara un reintento; cualquier otra
//! variante es terminal en el primer intento.
//!
//! Cada intento además corre bajo el plazo blando de `kind` (§5:
//! "Each task has a soft deadline... upon deadline the task aborts
//! between phases... reports timeout"): un handler que no completa a
//! tiempo se trata como `TaskError::Timeout`, que es retryable igual
//! que `Unavailable`.

use std::time::Duration;

use tracing::{info, warn};

use crate::envelope::{TaskEnvelope, TaskKind};
use crate::error::{TaskError, TaskResult};

const MAX_ATTEMPTS: u32 = 3;

pub async fn with_retry<F, Fut>(kind: TaskKind, envelope: TaskEnvelope, handler: &F) -> TaskResult<()>
where
    F: Fn(TaskEnvelope) -> Fut,
    Fut: std::future::Future<Output = TaskResult<()>>,
{
    let mut current = envelope;
    let deadline = Duration::from_secs(kind.soft_deadline_secs());

    loop {
        let attempt = current.attempt;
        let outcome = match tokio::time::timeout(deadline, handler(current.clone())).await {
            Ok(result) => result,
            Err(_elapsed) => Err(TaskError::Timeout(deadline)),
        };

        match outcome {
            Ok(()) => return Ok(()),
            Err(error) if error.is_retryable() && attempt + 1 < MAX_ATTEMPTS => {
                let delay = backoff_delay(kind, attempt);
                warn!(
                    queue = kind.queue_name(),
                    attempt,
                    delay_secs = delay.as_secs(),
                    %error,
                    "🔁 [TASK_RETRY]: retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
                current = current.next_attempt();
            }
            Err(error) => {
                info!(queue = kind.queue_name(), attempt, %error, "🛑 [TASK_RETRY]: not retrying");
                return Err(error);
            }
        }
    }
}

fn backoff_delay(kind: TaskKind, attempt: u32) -> Duration {
    Duration::from_secs(kind.base_delay_secs() * 2u64.pow(attempt))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    fn envelope() -> TaskEnvelope {
        TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({}))
    }

    #[tokio::test(start_paused = true)]
    async fn retries_retryable_errors_up_to_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = with_retry(TaskKind::BuildSnapshot, envelope(), &move |_env| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TaskError::Unavailable("db down".into()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_error_fails_fast() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = with_retry(TaskKind::DetectDrift, envelope(), &move |_env| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TaskError::Failed("bad args".into()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_without_retry_on_first_try() {
        let result = with_retry(TaskKind::SendNotifications, envelope(), &|_env| async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn handler_exceeding_soft_deadline_is_treated_as_retryable_timeout() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        // DetectDrift's soft deadline is 30s; sleep past it every attempt
        // so the wrapper always sees an elapsed timeout, never the body's
        // own result.
        let result = with_retry(TaskKind::DetectDrift, envelope(), &move |_env| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(31)).await;
                Ok(())
            }
        })
        .await;

        assert!(matches!(result, Err(TaskError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
