// [apps/orchestrator/src/tasks/baseline_refresh.rs]
//! Refresco periódico de `EdgeProfile` (C7), disparado directamente por
//! el cron de §4.11 — no es uno de los tres `TaskKind` nombrados, así
//! que no pasa por el `TaskBroker`: un refresco de baseline perdido no
//! tiene reintento propio, el próximo tick de cron ya lo corrige.

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::{EdgeKey, TenantContext};
use meshdrift_domain_risk_engine::baseline::{build_profile, update_profile_ema, MetricSample};
use tracing::{info, warn};

use crate::state::CoreServices;

pub async fn refresh_baselines_task(services: CoreServices, now: DateTime<Utc>) {
    for tenant_source in services.tenants.iter() {
        let tenant = TenantContext::for_tenant(tenant_source.tenant_id.clone());

        if let Err(error) = refresh_for_tenant(&services, &tenant, now).await {
            warn!(tenant = %tenant_source.tenant_id, %error, "⚠️  [BASELINE_REFRESH]: tenant refresh failed");
        }
    }
}

async fn refresh_for_tenant(
    services: &CoreServices,
    tenant: &TenantContext,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let current = match services.snapshots.get_latest(tenant).await? {
        Some(snapshot) => snapshot,
        None => return Ok(()),
    };

    let window_size = services.risk_engine.baseline_window_size;
    let history = services.snapshots.list(tenant, window_size).await?;
    // `list` returns newest-first; the builder wants oldest-first.
    let history: Vec<_> = history.into_iter().rev().collect();

    for edge in current.edges() {
        let edge_key: EdgeKey = edge.edge_key();
        let sample = MetricSample::from(edge);

        match services.profiles.get_profile(tenant, &edge_key).await? {
            Some(profile) => {
                let updated = update_profile_ema(&profile, sample, window_size, now);
                services.profiles.save_profile(tenant, &updated).await?;
            }
            None => {
                let samples: Vec<MetricSample> = history
                    .iter()
                    .filter_map(|snap| snap.get_edge(&edge_key))
                    .map(MetricSample::from)
                    .collect();

                if let Some(profile) = build_profile(edge_key.clone(), &samples, window_size, now) {
                    services.profiles.save_profile(tenant, &profile).await?;
                }
            }
        }
    }

    info!(
        tenant = tenant.tenant_id().unwrap_or("?"),
        edges = current.edge_count(),
        "📈 [BASELINE_REFRESH]: profiles synchronized"
    );

    Ok(())
}
