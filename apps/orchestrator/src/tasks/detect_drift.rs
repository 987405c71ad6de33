// [apps/orchestrator/src/tasks/detect_drift.rs]
//! `detect_drift_task` (§4.11): diff de los últimos dos snapshots (C4),
//! enriquecido con baseline/whitelist/feedback (C7-C9) y escorado (C10),
//! explicado (C11), publicado en tiempo real (C13) y, para severidad
//! alta/crítica, encadenado hacia `send_notifications_task`.
//!
//! `DriftEvent`/`ExplainCard` son deliberadamente no persistidos (§3:
//! "synthesized by C4 on demand; persisted only if the caller asks") —
//! no hay tabla `drift_events` en este despliegue, así que las cards
//! accionables viajan embebidas en el propio `TaskEnvelope` de
//! `send_notifications_task` en vez de resolverse por `event_id`.

use meshdrift_core_graph_model::{EdgeProfile, ExplainCard, TenantContext};
use meshdrift_core_integration_facade::publisher::drift_topic;
use meshdrift_domain_drift_detector::diff;
use meshdrift_domain_explainer::explain_batch;
use meshdrift_domain_feedback_memory::compute_history_mod;
use meshdrift_domain_risk_engine::{score_batch, ScorerInput};
use meshdrift_infra_task_queue::{TaskEnvelope, TaskError, TaskKind, TaskResult};
use tracing::{info, warn};

use crate::state::CoreServices;
use crate::tasks::{from_feedback, from_snapshot_store};

pub async fn detect_drift_task(services: CoreServices, envelope: TaskEnvelope) -> TaskResult<()> {
    let tenant = TenantContext::for_tenant(envelope.tenant_id.clone());

    let pair = services.snapshots.get_latest_two(&tenant).await.map_err(from_snapshot_store)?;
    let (baseline, current) = match pair {
        Some(pair) => pair,
        None => {
            info!(tenant = %envelope.tenant_id, "🟡 [DETECT_DRIFT]: fewer than two snapshots, nothing to diff");
            return Ok(());
        }
    };

    let events = diff(&baseline, ¤t);
    if events.is_empty() {
        info!(tenant = %envelope.tenant_id, "🟢 [DETECT_DRIFT]: no drift between last two snapshots");
        return Ok(());
    }

    let mut inputs = Vec::with_capacity(events.len());
    for event in events {
        let edge_key = event.edge_key();

        let current_sample = current.get_edge(&edge_key).map(Into::into);
        let profile: Option<EdgeProfile> = if current_sample.is_some() {
            services.profiles.get_profile(&tenant, &edge_key).await.map_err(from_feedback)?
        } else {
            None
        };

        let whitelisted = services.feedback.is_whitelisted(&tenant, &edge_key).await.map_err(from_feedback)?;
        let latest_feedback = services
            .feedback
            .latest_feedback(&tenant, &edge_key, event.event_type)
            .await
            .map_err(from_feedback)?;
        let (history_mod, history_reason) = compute_history_mod(whitelisted, latest_feedback.as_ref());

        inputs.push(ScorerInput {
            event,
            current_sample,
            profile,
            history_mod,
            history_reason,
        });
    }

    let scored = score_batch(inputs, &services.risk_engine);
    let cards = explain_batch(&scored);

    let topic = drift_topic(&envelope.tenant_id);
    for card in &cards {
        let payload = serde_json::to_value(card).map_err(|e| TaskError::Failed(format!("card serialization: {e}")))?;
        if let Err(error) = services.publisher.publish(&topic, payload).await {
            warn!(tenant = %envelope.tenant_id, %error, "📡 [DETECT_DRIFT]: realtime publish failed, continuing");
        }
    }

    let actionable: Vec<&ExplainCard> = cards.iter().filter(|c| c.severity.is_actionable()).collect();
    if actionable.is_empty() {
        return Ok(());
    }

    info!(
        tenant = %envelope.tenant_id,
        count = actionable.len(),
        "🚨 [DETECT_DRIFT]: actionable drift found, chaining notifications"
    );

    let notify_envelope = TaskEnvelope::new(
        TaskKind::SendNotifications,
        envelope.tenant_id.clone(),
        serde_json::json!({ "cards": actionable }),
    );

    services.broker.enqueue(notify_envelope).await?;

    Ok(())
}
