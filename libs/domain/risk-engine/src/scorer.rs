// [libs/domain/risk-engine/src/scorer.rs]
//! Composición del smart score (C10): `base + rule_boost + anomaly_mod +
//! pattern_mod + history_mod`, clampeado a `[0,100]`, junto al breakdown
//! que la UI (y los tests) leen.

use meshdrift_core_graph_model::{DriftEvent, Severity};

use crate::anomaly::{self, AnomalyClassification, AnomalyLabel};
use crate::baseline::MetricSample;
use crate::config::RiskEngineConfig;
use crate::patterns::{self, Pattern};
use crate::rules::{self, TriggeredRule};

/// Desglose del score — lo que la UI renderiza y lo que los tests
/// assertan, por §4.9.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub base: i32,
    pub rule_boost: i32,
    pub triggered_rules: Vec<TriggeredRule>,
    pub anomaly_label: AnomalyLabel,
    pub anomaly_mod: i32,
    pub pattern: Pattern,
    pub pattern_confidence: f64,
    pub pattern_mod: i32,
    pub history_mod: i32,
    pub history_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEvent {
    pub event: DriftEvent,
    pub score: u8,
    pub severity: Severity,
    pub breakdown: Breakdown,
}

/// Todo lo que `score_batch` necesita por evento además del motor de
/// reglas/patrones, que opera sobre el batch completo directamente.
/// `current_sample`/`profile` son `None` para eventos sin una arista
/// viva a la que comparar (`removed_edge`, `blast_radius_increase`).
/// `history_mod`/`history_reason` llegan ya resueltos por el llamador
/// (whitelist/feedback, C9) — `risk-engine` no conoce esos tipos.
#[derive(Debug, Clone)]
pub struct ScorerInput {
    pub event: DriftEvent,
    pub current_sample: Option<MetricSample>,
    pub profile: Option<meshdrift_core_graph_model::EdgeProfile>,
    pub history_mod: i32,
    pub history_reason: Option<String>,
}

/// Escora un batch completo y devuelve la lista ordenada por
/// `final_score` descendente, con empates resueltos por score base del
/// tipo de evento y luego `(source, destination)` lexicográfico.
pub fn score_batch(inputs: Vec<ScorerInput>, config: &RiskEngineConfig) -> Vec<ScoredEvent> {
    let events: Vec<DriftEvent> = inputs.iter().map(|i| i.event.clone()).collect();

    let mut scored: Vec<ScoredEvent> = inputs
        .into_iter()
        .map(|input| score_one(input, &events, config))
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| {
                config
                    .base_score_for(b.event.event_type)
                    .cmp(&config.base_score_for(a.event.event_type))
            })
            .then_with(|| {
                (a.event.source.as_str(), a.event.destination.as_str())
                    .cmp(&(b.event.source.as_str(), b.event.destination.as_str()))
            })
    });

    scored
}

fn score_one(input: ScorerInput, events: &[DriftEvent], config: &RiskEngineConfig) -> ScoredEvent {
    let triggered = rules::evaluate(&input.event, config);
    let base = config.base_score_for(input.event.event_type) as i32;
    let rule_boost: i32 = triggered.iter().map(|r| r.boost).sum();

    let anomaly = match input.current_sample {
        Some(sample) => anomaly::classify(sample, input.profile.as_ref(), config),
        None => AnomalyClassification {
            label: AnomalyLabel::InsufficientData,
            score: 0.0,
        },
    };

    let pattern_match = patterns::recognize(events, &input.event);

    let raw = base + rule_boost + anomaly.label.modifier() + pattern_match.modifier + input.history_mod;
    let score = raw.clamp(0, 100) as u8;
    let severity = Severity::from_score(score);

    ScoredEvent {
        event: input.event,
        score,
        severity,
        breakdown: Breakdown {
            base,
            rule_boost,
            triggered_rules: triggered,
            anomaly_label: anomaly.label,
            anomaly_mod: anomaly.label.modifier(),
            pattern: pattern_match.pattern,
            pattern_confidence: pattern_match.confidence,
            pattern_mod: pattern_match.modifier,
            history_mod: input.history_mod,
            history_reason: input.history_reason,
        },
    }
}

#[cfg(test)]
mod tests {
    use meshdrift_core_graph_model::{DriftDetails, EventType};

    use super::*;

    fn input(event: DriftEvent) -> ScorerInput {
        ScorerInput {
            event,
            current_sample: None,
            profile: None,
            history_mod: 0,
            history_reason: None,
        }
    }

    #[test]
    fn s1_new_edge_to_sensitive_db_is_critical() {
        let mut config = RiskEngineConfig::default();
        config
            .db_owners
            .insert("payments-db".to_string(), "payments-svc".to_string());
        let event = DriftEvent::new(
            EventType::NewEdge,
            "order-svc",
            "payments-db",
            DriftDetails::default().with_request_count(40),
        );
        let scored = score_batch(vec![input(event)], &config);
        assert_eq!(scored[0].score, 100);
        assert_eq!(scored[0].severity, Severity::Critical);
        let rule_names: Vec<&str> = scored[0]
            .breakdown
            .triggered_rules
            .iter()
            .map(|r| r.name)
            .collect();
        assert!(rule_names.contains(&"sensitive_target"));
        assert!(rule_names.contains(&"bypass_gateway"));
    }

    #[test]
    fn s2_error_spike_above_ten_percent_is_medium() {
        let config = RiskEngineConfig::default();
        let event = DriftEvent::new(
            EventType::ErrorSpike,
            "a",
            "b",
            DriftDetails::metric_change(0.02, 0.12, 6.0),
        );
        let scored = score_batch(vec![input(event)], &config);
        // base 35 + high_error_rate 20 = 55 -> medium
        assert_eq!(scored[0].score, 55);
        assert_eq!(scored[0].severity, Severity::Medium);
    }

    #[test]
    fn s3_deployment_pattern_suppresses_new_edge_scores() {
        let config = RiskEngineConfig::default();
        let events: Vec<DriftEvent> = (0..4)
            .map(|i| {
                // matching stems ("order{i}") keep bypass_gateway from
                // firing; these destinations are not in the sensitive
                // or db_owners tables either.
                DriftEvent::new(
                    EventType::NewEdge,
                    format!("order{i}-svc"),
                    format!("order{i}-db"),
                    DriftDetails::default(),
                )
            })
            .collect();
        let inputs = events.into_iter().map(input).collect();
        let scored = score_batch(inputs, &config);
        for s in &scored {
            assert_eq!(s.score, 10); // base 40 - 30 (deployment) = 10
            assert_eq!(s.severity, Severity::Low);
        }
    }

    #[test]
    fn s4_whitelisted_edge_subtracts_forty_from_history() {
        let config = RiskEngineConfig::default();
        let event = DriftEvent::new(EventType::NewEdge, "svc-a", "svc-b", DriftDetails::default());
        let mut scorer_input = input(event);
        scorer_input.history_mod = -40;
        scorer_input.history_reason = Some("whitelisted".to_string());
        let scored = score_batch(vec![scorer_input], &config);
        // base 40 + bypass_gateway 20 (stems "svc-a" != "svc-b") - 40 history = 20
        assert_eq!(scored[0].score, 20);
        assert_eq!(scored[0].breakdown.history_mod, -40);
    }

    #[test]
    fn s5_blast_radius_reaches_medium() {
        let config = RiskEngineConfig::default();
        let event = DriftEvent::new(
            EventType::BlastRadiusIncrease,
            "order-svc",
            "*",
            DriftDetails::metric_change(1.0, 3.0, 2.0).with_request_count(3),
        );
        let scored = score_batch(vec![input(event)], &config);
        assert_eq!(scored[0].score, 50);
        assert_eq!(scored[0].severity, Severity::Medium);
        assert!(scored[0]
            .breakdown
            .triggered_rules
            .iter()
            .any(|r| r.name == "blast_radius"));
    }

    #[test]
    fn final_list_sorted_by_score_descending() {
        let config = RiskEngineConfig::default();
        let low = DriftEvent::new(EventType::RemovedEdge, "a", "b", DriftDetails::default());
        let high = DriftEvent::new(
            EventType::NewEdge,
            "x",
            "payments-db",
            DriftDetails::default(),
        );
        let scored = score_batch(vec![input(low), input(high)], &config);
        assert!(scored[0].score >= scored[1].score);
        assert_eq!(scored[0].event.destination, "payments-db");
    }
}
