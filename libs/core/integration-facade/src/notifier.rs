// [libs/core/integration-facade/src/notifier.rs]
//! `Notifier`: sink best-effort por canal (Slack, Jira, SIEM...) para
//! `ExplainCard`s de severidad alta. El núcleo no reintenta fallos de
//! transporte más allá de lo que ya hace el wrapper de reintentos de C12.

use async_trait::async_trait;
use meshdrift_core_graph_model::ExplainCard;

use crate::error::FacadeResult;

/// Acuse de recepción de un sink. `delivered = false` con `Ok(..)` modela
/// un sink que aceptó la entrega pero la marcó como suprimida/filtrada
/// aguas abajo (p. ej. un rate-limiter de Slack) — no es un error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub sink_name: String,
    pub delivered: bool,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn sink_name(&self) -> &str;

    async fn send(&self, card: &ExplainCard) -> FacadeResult<Ack>;
}

/// Notifier que solo registra por tracing — el adaptador por defecto que
/// permite correr el pipeline de punta a punta sin un sink real
/// configurado (Design Note "Pub/sub is optional" se extiende aquí:
/// la ausencia de sinks reales no impide que la tubería progrese).
pub struct LoggingNotifier {
    name: String,
}

impl LoggingNotifier {
    pub fn new(name: impl Into<String>) -> Self {
        LoggingNotifier { name: name.into() }
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    fn sink_name(&self) -> &str {
        &self.name
    }

    async fn send(&self, card: &ExplainCard) -> FacadeResult<Ack> {
        tracing::info!(
            sink = %self.name,
            severity = card.severity.as_str(),
            score = card.risk_score,
            title = %card.title,
            "📣 [NOTIFIER_NOOP]: would deliver card to external sink"
        );
        Ok(Ack {
            sink_name: self.name.clone(),
            delivered: true,
        })
    }
}
