// [libs/domain/risk-engine/src/rules.rs]
//! Motor de reglas orthogonales (C5): cada regla mapea un `DriftEvent` a
//! `{triggered, reason, boost}`. `evaluate` devuelve solo las reglas que
//! dispararon, en el orden de declaración de la tabla §4.4.

use meshdrift_core_graph_model::{DriftEvent, EventType};

use crate::config::RiskEngineConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredRule {
    pub name: &'static str,
    pub reason: String,
    pub boost: i32,
}

/// Evalúa las cinco reglas contra `event` y devuelve las que dispararon,
/// preservando el orden de declaración (sensitive_target, bypass_gateway,
/// database_direct_access, high_error_rate, blast_radius).
pub fn evaluate(event: &DriftEvent, config: &RiskEngineConfig) -> Vec<TriggeredRule> {
    let mut triggered = Vec::new();

    if let Some(rule) = sensitive_target(event, config) {
        triggered.push(rule);
    }
    if let Some(rule) = bypass_gateway(event, config) {
        triggered.push(rule);
    }
    if let Some(rule) = database_direct_access(event, config) {
        triggered.push(rule);
    }
    if let Some(rule) = high_error_rate(event) {
        triggered.push(rule);
    }
    if let Some(rule) = blast_radius(event) {
        triggered.push(rule);
    }

    triggered
}

fn sensitive_target(event: &DriftEvent, config: &RiskEngineConfig) -> Option<TriggeredRule> {
    if config.sensitive_services.contains(&event.destination) {
        Some(TriggeredRule {
            name: "sensitive_target",
            reason: format!("connection to sensitive {}", event.destination),
            boost: 30,
        })
    } else {
        None
    }
}

/// Resuelto hacia equivalencia por sufijo despojado: `strip_suffix(source,
/// "-svc")` vs `strip_suffix(destination, "-db")`, cayendo al string
/// original cuando el sufijo no está presente. Con esta semántica
/// `payment-svc → payments-db` dispara (`"payment"` ≠ `"payments"`) y
/// `order-svc → order-db` no (`"order"` == `"order"`) — el ejemplo S1.
fn bypass_gateway(event: &DriftEvent, config: &RiskEngineConfig) -> Option<TriggeredRule> {
    if event.event_type != EventType::NewEdge {
        return None;
    }
    if config.gateways.contains(&event.source) {
        return None;
    }

    let source_stem = event.source.strip_suffix("-svc").unwrap_or(&event.source);
    let dest_stem = event
        .destination
        .strip_suffix("-db")
        .unwrap_or(&event.destination);

    if source_stem != dest_stem {
        Some(TriggeredRule {
            name: "bypass_gateway",
            reason: "direct connection bypassing gateway".to_string(),
            boost: 20,
        })
    } else {
        None
    }
}

fn database_direct_access(event: &DriftEvent, config: &RiskEngineConfig) -> Option<TriggeredRule> {
    if !event.destination.contains("-db") {
        return None;
    }
    let owner = config.db_owners.get(&event.destination)?;
    if owner != &event.source {
        Some(TriggeredRule {
            name: "database_direct_access",
            reason: "unexpected service accesses owned DB".to_string(),
            boost: 30,
        })
    } else {
        None
    }
}

fn high_error_rate(event: &DriftEvent) -> Option<TriggeredRule> {
    if event.event_type != EventType::ErrorSpike {
        return None;
    }
    let current = event.details.current_value.unwrap_or(0.0);
    if current > 0.10 {
        Some(TriggeredRule {
            name: "high_error_rate",
            reason: "error rate above 10%".to_string(),
            boost: 20,
        })
    } else {
        None
    }
}

fn blast_radius(event: &DriftEvent) -> Option<TriggeredRule> {
    if event.event_type != EventType::BlastRadiusIncrease {
        return None;
    }
    Some(TriggeredRule {
        name: "blast_radius",
        reason: format!("attack surface of {} grew", event.source),
        boost: 15,
    })
}
