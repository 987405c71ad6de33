// [apps/orchestrator/src/services/cron.rs]
//! Los tres horarios fijos de §4.11: `build_snapshot` cada hora en
//! punto (una tarea por tenant registrado), barrido de retención a las
//! 03:00 UTC, refresco de baseline cada 30 minutos.

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::TenantContext;
use meshdrift_infra_task_queue::{is_baseline_refresh_tick, is_daily_retention_tick, is_hourly_tick, spawn_cron_loop, TaskEnvelope, TaskKind};
use tracing::warn;

use crate::state::CoreServices;
use crate::tasks::baseline_refresh::refresh_baselines_task;

pub fn spawn_all(services: CoreServices) {
    spawn_hourly_build(services.clone());
    spawn_daily_retention(services.clone());
    spawn_baseline_refresh(services);
}

fn spawn_hourly_build(services: CoreServices) {
    spawn_cron_loop("hourly_build_snapshot", is_hourly_tick, move |now: DateTime<Utc>| {
        let services = services.clone();
        async move {
            for tenant in services.tenants.iter() {
                let window_end = now;
                let window_start = now - chrono::Duration::hours(1);
                let envelope = TaskEnvelope::new(
                    TaskKind::BuildSnapshot,
                    tenant.tenant_id.clone(),
                    serde_json::json!({
                        "source_ref": tenant.source_ref,
                        "window_start": window_start,
                        "window_end": window_end,
                    }),
                )
                .with_coalesce_key(format!("{}:{}", tenant.tenant_id, window_start.to_rfc3339()));

                if let Err(error) = services.broker.enqueue(envelope).await {
                    warn!(tenant = %tenant.tenant_id, %error, "⚠️  [CRON]: failed to enqueue hourly build_snapshot");
                }
            }
        }
    });
}

fn spawn_daily_retention(services: CoreServices) {
    spawn_cron_loop("daily_retention_sweep", is_daily_retention_tick, move |_now| {
        let services = services.clone();
        async move {
            for tenant in services.tenants.iter() {
                let ctx = TenantContext::for_tenant(tenant.tenant_id.clone());
                match services.snapshots.delete_older_than(&ctx, services.retention_days).await {
                    Ok(purged) => {
                        if purged > 0 {
                            tracing::info!(tenant = %tenant.tenant_id, purged, "🧹 [CRON]: retention sweep purged stale snapshots");
                        }
                    }
                    Err(error) => {
                        warn!(tenant = %tenant.tenant_id, %error, "⚠️  [CRON]: retention sweep failed");
                    }
                }
            }
        }
    });
}

fn spawn_baseline_refresh(services: CoreServices) {
    spawn_cron_loop("baseline_refresh", is_baseline_refresh_tick, move |now| {
        let services = services.clone();
        async move {
            refresh_baselines_task(services, now).await;
        }
    });
}
