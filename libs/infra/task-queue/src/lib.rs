/*!
 * =================================================================
 * APARATO: TASK PIPELINE PRIMITIVE (C12)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ENQUEUE/SUBSCRIBE/CRON PARA LOS TRES TIPOS DE TAREA
 *
 * `apps/orchestrator` compone los cuerpos reales de
 * `build_snapshot_task`/`detect_drift_task`/`send_notifications_task`
 * sobre esta primitiva; este crate no conoce C2-C11, solo transporte,
 * coalescing y reintentos.
 * =================================================================
 */

pub mod broker;
pub mod cron;
pub mod envelope;
pub mod error;
pub mod retry;

pub use broker::{run_consumer, TaskBroker};
pub use cron::{
    is_baseline_refresh_tick, is_daily_retention_tick, is_hourly_tick, spawn_cron_loop, CRON_TICK_INTERVAL,
};
pub use envelope::{TaskEnvelope, TaskKind};
pub use error::{TaskError, TaskResult};
pub use retry::with_retry;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn enqueue_then_take_receiver_delivers_envelope() {
        let broker = TaskBroker::new();
        let envelope = TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({"source_ref": "k8s"}));

        assert!(broker.enqueue(envelope).await.unwrap());

        let mut receiver = broker.take_receiver(TaskKind::BuildSnapshot).await.unwrap();
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.tenant_id, "acme");
    }

    #[tokio::test]
    async fn coalesced_enqueue_is_skipped_until_released() {
        let broker = TaskBroker::new();
        let first = TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({})).with_coalesce_key("acme:2026-01-01T00:00:00Z");
        let second = TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({})).with_coalesce_key("acme:2026-01-01T00:00:00Z");

        assert!(broker.enqueue(first).await.unwrap());
        assert!(!broker.enqueue(second).await.unwrap());

        broker.release_coalesce_key("acme:2026-01-01T00:00:00Z");

        let third = TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({})).with_coalesce_key("acme:2026-01-01T00:00:00Z");
        assert!(broker.enqueue(third).await.unwrap());
    }

    #[tokio::test]
    async fn distinct_coalesce_keys_do_not_collide() {
        let broker = TaskBroker::new();
        let a = TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({})).with_coalesce_key("acme:window-1");
        let b = TaskEnvelope::new(TaskKind::BuildSnapshot, "acme", json!({})).with_coalesce_key("acme:window-2");

        assert!(broker.enqueue(a).await.unwrap());
        assert!(broker.enqueue(b).await.unwrap());
    }

    #[tokio::test]
    async fn run_consumer_releases_coalesce_key_after_success() {
        let broker = Arc::new(TaskBroker::new());
        let receiver = broker.take_receiver(TaskKind::DetectDrift).await.unwrap();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let consumer = {
            let broker = broker.clone();
            tokio::spawn(async move {
                run_consumer(broker, TaskKind::DetectDrift, receiver, move |_env| {
                    let calls = calls_clone.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                })
                .await;
            })
        };

        let envelope = TaskEnvelope::new(TaskKind::DetectDrift, "acme", json!({})).with_coalesce_key("acme:w1");
        broker.enqueue(envelope).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let retry_envelope = TaskEnvelope::new(TaskKind::DetectDrift, "acme", json!({})).with_coalesce_key("acme:w1");
        assert!(broker.enqueue(retry_envelope).await.unwrap());

        consumer.abort();
    }

    #[test]
    fn hourly_tick_matches_minute_zero_only() {
        let minute_zero = "2026-01-01T05:00:00Z".parse().unwrap();
        let minute_thirty = "2026-01-01T05:30:00Z".parse().unwrap();
        assert!(is_hourly_tick(minute_zero));
        assert!(!is_hourly_tick(minute_thirty));
    }

    #[test]
    fn daily_retention_tick_matches_three_am_utc_only() {
        assert!(is_daily_retention_tick("2026-01-01T03:00:00Z".parse().unwrap()));
        assert!(!is_daily_retention_tick("2026-01-01T04:00:00Z".parse().unwrap()));
    }

    #[test]
    fn baseline_refresh_tick_matches_every_thirty_minutes() {
        assert!(is_baseline_refresh_tick("2026-01-01T05:00:00Z".parse().unwrap()));
        assert!(is_baseline_refresh_tick("2026-01-01T05:30:00Z".parse().unwrap()));
        assert!(!is_baseline_refresh_tick("2026-01-01T05:15:00Z".parse().unwrap()));
    }

    #[test]
    fn task_kind_base_delays_match_spec_table() {
        assert_eq!(TaskKind::BuildSnapshot.base_delay_secs(), 15);
        assert_eq!(TaskKind::DetectDrift.base_delay_secs(), 30);
        assert_eq!(TaskKind::SendNotifications.base_delay_secs(), 60);
    }
}
