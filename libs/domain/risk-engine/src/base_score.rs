// [libs/domain/risk-engine/src/base_score.rs]
//! Scorer base (C6): `clamp(base[event_type] + Σ boosts, 0, 100)`.
//!
//! A diferencia de la redacción original de §4.5 ("the scorer writes
//! severity back onto the event"), aquí el resultado es un valor
//! independiente — `DriftEvent` permanece inmutable (ver Open Question
//! de severidad resuelta en graph-model::drift_event).

use meshdrift_core_graph_model::{DriftEvent, Severity};

use crate::config::RiskEngineConfig;
use crate::rules::TriggeredRule;

#[derive(Debug, Clone, PartialEq)]
pub struct BaseScore {
    pub base: u8,
    pub score: u8,
    pub severity: Severity,
}

pub fn score_base(event: &DriftEvent, triggered: &[TriggeredRule], config: &RiskEngineConfig) -> BaseScore {
    let base = config.base_score_for(event.event_type);
    let boost_sum: i32 = triggered.iter().map(|r| r.boost).sum();
    let raw = base as i32 + boost_sum;
    let score = raw.clamp(0, 100) as u8;

    BaseScore {
        base,
        score,
        severity: Severity::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use meshdrift_core_graph_model::{DriftDetails, EventType};

    use super::*;
    use crate::rules;

    #[test]
    fn new_edge_to_sensitive_db_yields_critical() {
        let config = RiskEngineConfig::default();
        let event = DriftEvent::new(
            EventType::NewEdge,
            "order-svc",
            "payments-db",
            DriftDetails::default(),
        );
        let triggered = rules::evaluate(&event, &config);
        let scored = score_base(&event, &triggered, &config);
        // base 40 + sensitive_target 30 + bypass_gateway 20 = 90
        assert_eq!(scored.score, 90);
        assert_eq!(scored.severity, Severity::Critical);
    }

    #[test]
    fn clamps_above_one_hundred() {
        let mut config = RiskEngineConfig::default();
        config
            .db_owners
            .insert("payments-db".to_string(), "payments-svc".to_string());
        let event = DriftEvent::new(
            EventType::NewEdge,
            "order-svc",
            "payments-db",
            DriftDetails::default(),
        );
        let triggered = rules::evaluate(&event, &config);
        // base 40 + sensitive 30 + bypass 20 + db_direct 30 = 120 -> clamp 100
        let scored = score_base(&event, &triggered, &config);
        assert_eq!(scored.score, 100);
    }
}
