/*!
 * =================================================================
 * APARATO: EXPLAINER (C11)
 * CLASIFICACIÓN: PURE DOMAIN FUNCTION (ESTRATO L2)
 * RESPONSABILIDAD: COMPONER `ExplainCard` A PARTIR DE UN `ScoredEvent`
 *
 * Función pura; no conoce publishers, notifiers ni persistencia. Cada
 * `ScoredEvent` entra, un `ExplainCard` sale (§4.10).
 * =================================================================
 */

pub mod templates;

use meshdrift_core_graph_model::ExplainCard;
use meshdrift_domain_risk_engine::ScoredEvent;

const DEFAULT_WHY_RISK: &str = "Change recorded; manual review required";

/// Compone el `ExplainCard` de un evento ya escorado.
///
/// `why_risk` toma las razones de las reglas disparadas en el orden en
/// que dispararon; cuando ninguna regla disparó cae al mensaje genérico
/// de revisión manual en vez de quedar vacío.
pub fn explain(scored: &ScoredEvent) -> ExplainCard {
    let event = &scored.event;

    let why_risk = if scored.breakdown.triggered_rules.is_empty() {
        vec![DEFAULT_WHY_RISK.to_string()]
    } else {
        scored
            .breakdown
            .triggered_rules
            .iter()
            .map(|rule| rule.reason.clone())
            .collect()
    };

    let mut affected = vec![event.source.clone()];
    if event.destination != "*" && event.destination != event.source {
        affected.push(event.destination.clone());
    }

    ExplainCard {
        event_type: event.event_type,
        source: event.source.clone(),
        destination: event.destination.clone(),
        severity: scored.severity,
        risk_score: scored.score,
        title: templates::title(event.event_type, &event.source, &event.destination),
        what_changed: templates::what_changed(event.event_type, &event.source, &event.destination, &event.details),
        why_risk,
        affected,
        recommendation: templates::recommendation(event.event_type, &event.source, &event.destination),
    }
}

/// Composición en batch, preservando el orden de `scored` (ya ordenado
/// por score descendente por `score_batch`).
pub fn explain_batch(scored: &[ScoredEvent]) -> Vec<ExplainCard> {
    scored.iter().map(explain).collect()
}
