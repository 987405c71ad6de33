// [libs/domain/risk-engine/src/patterns.rs]
//! Reconocedor de patrones sobre un batch (C8): identifica como máximo un
//! patrón dominante para el evento focal, probando en el orden de
//! prioridad rollback → deployment → error_cascade → canary → unknown.

use meshdrift_core_graph_model::{DriftEvent, EventType};
use serde::{Deserialize, Serialize};

const CONFIDENCE_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Rollback,
    Deployment,
    ErrorCascade,
    Canary,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch {
    pub pattern: Pattern,
    pub confidence: f64,
    pub modifier: i32,
}

fn unknown() -> PatternMatch {
    PatternMatch {
        pattern: Pattern::Unknown,
        confidence: 0.0,
        modifier: 0,
    }
}

/// `batch` es el conjunto completo de eventos de una corrida de
/// detección; `focal` es el evento bajo evaluación (normalmente
/// `batch[focal_index]`, pasado por separado para no exigir que el
/// llamador indexe).
pub fn recognize(batch: &[DriftEvent], focal: &DriftEvent) -> PatternMatch {
    let removed_count = batch
        .iter()
        .filter(|e| e.event_type == EventType::RemovedEdge)
        .count();
    if focal.event_type == EventType::RemovedEdge && removed_count >= 2 {
        let confidence = (removed_count as f64 / 5.0).min(1.0);
        if confidence >= CONFIDENCE_THRESHOLD {
            return PatternMatch {
                pattern: Pattern::Rollback,
                confidence,
                modifier: -40,
            };
        }
    }

    let new_edge_count = batch
        .iter()
        .filter(|e| e.event_type == EventType::NewEdge)
        .count();
    if focal.event_type == EventType::NewEdge && new_edge_count >= 3 {
        let confidence = (new_edge_count as f64 / 10.0).min(1.0);
        if confidence >= CONFIDENCE_THRESHOLD {
            return PatternMatch {
                pattern: Pattern::Deployment,
                confidence,
                modifier: -30,
            };
        }
    }

    let error_spike_count = batch
        .iter()
        .filter(|e| e.event_type == EventType::ErrorSpike)
        .count();
    if focal.event_type == EventType::ErrorSpike && error_spike_count >= 2 {
        let confidence = (error_spike_count as f64 / 5.0).min(1.0);
        if confidence >= CONFIDENCE_THRESHOLD {
            return PatternMatch {
                pattern: Pattern::ErrorCascade,
                confidence,
                modifier: 10,
            };
        }
    }

    if focal.event_type == EventType::NewEdge {
        if let Some(count) = focal.details.request_count {
            if count > 0 && count < 10 {
                return PatternMatch {
                    pattern: Pattern::Canary,
                    confidence: 0.8,
                    modifier: -20,
                };
            }
        }
    }

    unknown()
}

#[cfg(test)]
mod tests {
    use meshdrift_core_graph_model::DriftDetails;

    use super::*;

    fn new_edge(count: Option<u64>) -> DriftEvent {
        let mut details = DriftDetails::default();
        details.request_count = count;
        DriftEvent::new(EventType::NewEdge, "a", "b", details)
    }

    fn removed_edge() -> DriftEvent {
        DriftEvent::new(EventType::RemovedEdge, "a", "b", DriftDetails::default())
    }

    fn error_spike() -> DriftEvent {
        DriftEvent::new(
            EventType::ErrorSpike,
            "a",
            "b",
            DriftDetails::metric_change(0.01, 0.2, 20.0),
        )
    }

    #[test]
    fn four_new_edges_recognized_as_deployment() {
        let batch = vec![new_edge(None), new_edge(None), new_edge(None), new_edge(None)];
        let result = recognize(&batch, &batch[0]);
        assert_eq!(result.pattern, Pattern::Deployment);
        assert_eq!(result.modifier, -30);
    }

    #[test]
    fn two_removed_edges_recognized_as_rollback() {
        let batch = vec![removed_edge(), removed_edge()];
        let result = recognize(&batch, &batch[0]);
        assert_eq!(result.pattern, Pattern::Rollback);
        assert_eq!(result.modifier, -40);
    }

    #[test]
    fn rollback_does_not_apply_to_non_removed_focal() {
        let batch = vec![removed_edge(), removed_edge(), new_edge(None)];
        let result = recognize(&batch, &batch[2]);
        assert_ne!(result.pattern, Pattern::Rollback);
    }

    #[test]
    fn error_cascade_needs_two_spikes() {
        let batch = vec![error_spike(), error_spike()];
        let result = recognize(&batch, &batch[0]);
        assert_eq!(result.pattern, Pattern::ErrorCascade);
        assert_eq!(result.modifier, 10);
    }

    #[test]
    fn canary_detected_by_low_request_count_new_edge() {
        let batch = vec![new_edge(Some(5))];
        let result = recognize(&batch, &batch[0]);
        assert_eq!(result.pattern, Pattern::Canary);
        assert_eq!(result.modifier, -20);
    }

    #[test]
    fn canary_requires_count_strictly_below_ten() {
        let batch = vec![new_edge(Some(10))];
        let result = recognize(&batch, &batch[0]);
        assert_eq!(result.pattern, Pattern::Unknown);
    }

    #[test]
    fn single_new_edge_with_no_pattern_is_unknown() {
        let batch = vec![new_edge(None)];
        let result = recognize(&batch, &batch[0]);
        assert_eq!(result.pattern, Pattern::Unknown);
        assert_eq!(result.modifier, 0);
    }
}
