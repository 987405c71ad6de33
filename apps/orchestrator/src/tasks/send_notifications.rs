// [apps/orchestrator/src/tasks/send_notifications.rs]
//! `send_notifications_task` (§4.11): itera los sinks registrados
//! (C13) para cada `ExplainCard` de severidad alta/crítica, best-effort
//! — el fallo de un sink no tumba a los demás ni al intento completo
//! (§7: solo un fallo sistémico de transporte es reintentable).

use meshdrift_core_graph_model::ExplainCard;
use meshdrift_infra_task_queue::{TaskEnvelope, TaskError, TaskResult};
use serde::Deserialize;
use tracing::{info, warn};

use crate::state::CoreServices;

#[derive(Debug, Deserialize)]
struct Args {
    cards: Vec<ExplainCard>,
}

pub async fn send_notifications_task(services: CoreServices, envelope: TaskEnvelope) -> TaskResult<()> {
    let args: Args = serde_json::from_value(envelope.args.clone())
        .map_err(|e| TaskError::Failed(format!("malformed send_notifications args: {e}")))?;

    if args.cards.is_empty() {
        return Ok(());
    }

    for card in &args.cards {
        for notifier in services.notifiers.iter() {
            match notifier.send(card).await {
                Ok(ack) if ack.delivered => {
                    info!(
                        tenant = %envelope.tenant_id,
                        sink = notifier.sink_name(),
                        severity = card.severity.as_str(),
                        "📬 [SEND_NOTIFICATIONS]: card delivered"
                    );
                }
                Ok(_) => {
                    info!(
                        tenant = %envelope.tenant_id,
                        sink = notifier.sink_name(),
                        "🔕 [SEND_NOTIFICATIONS]: sink accepted but suppressed delivery"
                    );
                }
                Err(error) => {
                    warn!(
                        tenant = %envelope.tenant_id,
                        sink = notifier.sink_name(),
                        %error,
                        "❌ [SEND_NOTIFICATIONS]: sink failed, continuing with remaining sinks"
                    );
                }
            }
        }

        if card.severity.is_actionable() {
            if let Some(policy) = services.policy_renderer.render(card).await {
                info!(
                    tenant = %envelope.tenant_id,
                    source = %card.source,
                    destination = %card.destination,
                    bytes = policy.len(),
                    "📐 [SEND_NOTIFICATIONS]: policy proposal rendered"
                );
            }
        }
    }

    Ok(())
}
