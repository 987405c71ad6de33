// [libs/core/graph-model/src/explain_card.rs]
//! `ExplainCard`: salida estructurada y legible por humanos de C11, también
//! la forma de alambre (§6) que consumen el publisher y los adaptadores de
//! notificación.

use serde::{Deserialize, Serialize};

use crate::drift_event::EventType;
use crate::severity::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainCard {
    pub event_type: EventType,
    pub source: String,
    pub destination: String,
    pub severity: Severity,
    pub risk_score: u8,
    pub title: String,
    pub what_changed: String,
    /// Razones en el orden en que las reglas disparadas las emitieron;
    /// `["Change recorded; manual review required"]` cuando ninguna regla
    /// disparó (§4.10).
    pub why_risk: Vec<String>,
    /// `[source] ++ [destination si destination != "*"]`, deduplicado,
    /// preservando el orden de aparición.
    pub affected: Vec<String>,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let card = ExplainCard {
            event_type: EventType::ErrorSpike,
            source: "order-svc".into(),
            destination: "inventory-svc".into(),
            severity: Severity::High,
            risk_score: 72,
            title: "Error spike: order-svc -> inventory-svc".into(),
            what_changed: "Error rate rose from 2.00% to 15.00% (7.5x)".into(),
            why_risk: vec!["Error rate above 10%".into()],
            affected: vec!["order-svc".into(), "inventory-svc".into()],
            recommendation: "Inspect logs of inventory-svc".into(),
        };
        let json = serde_json::to_string(&card).unwrap();
        let back: ExplainCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
