// [libs/domain/explainer/src/templates.rs]
//! Plantillas de título/cuerpo/recomendación por `event_type` (§4.10,
//! forma de alambre en §6). Traducidas al inglés desde las plantillas en
//! ruso del original — no transliteradas.

use meshdrift_core_graph_model::{DriftDetails, EventType};

fn pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn factor(value: f64) -> String {
    format!("{:.1}\u{d7}", value) // "×"
}

fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

pub fn title(event_type: EventType, source: &str, destination: &str) -> String {
    match event_type {
        EventType::NewEdge => format!("New connection: {source} \u{2192} {destination}"),
        EventType::RemovedEdge => format!("Connection removed: {source} \u{2192} {destination}"),
        EventType::ErrorSpike => format!("Error spike: {source} \u{2192} {destination}"),
        EventType::LatencySpike => format!("Latency spike: {source} \u{2192} {destination}"),
        EventType::TrafficSpike => format!("Traffic spike: {source} \u{2192} {destination}"),
        EventType::BlastRadiusIncrease => format!("Blast radius increase: {source}"),
    }
}

pub fn what_changed(event_type: EventType, source: &str, destination: &str, details: &DriftDetails) -> String {
    match event_type {
        EventType::NewEdge => match details.request_count {
            Some(count) => format!("{source} started calling {destination} ({count} requests observed)"),
            None => format!("{source} started calling {destination}"),
        },
        EventType::RemovedEdge => format!("{source} stopped calling {destination}"),
        EventType::ErrorSpike => {
            let baseline = details.baseline_value.unwrap_or(0.0);
            let current = details.current_value.unwrap_or(0.0);
            let change = details.change_factor.unwrap_or(0.0);
            format!(
                "Error rate rose from {} to {} ({})",
                pct(baseline),
                pct(current),
                factor(change)
            )
        }
        EventType::LatencySpike => {
            let baseline = details.baseline_value.unwrap_or(0.0);
            let current = details.current_value.unwrap_or(0.0);
            let change = details.change_factor.unwrap_or(0.0);
            format!(
                "p99 latency rose from {}ms to {}ms ({})",
                num(baseline),
                num(current),
                factor(change)
            )
        }
        EventType::TrafficSpike => {
            let baseline = details.baseline_value.unwrap_or(0.0);
            let current = details.current_value.unwrap_or(0.0);
            let change = details.change_factor.unwrap_or(0.0);
            format!(
                "Request volume rose from {} to {} ({})",
                num(baseline),
                num(current),
                factor(change)
            )
        }
        EventType::BlastRadiusIncrease => {
            let baseline = details.baseline_value.unwrap_or(0.0);
            let current = details.current_value.unwrap_or(0.0);
            format!(
                "{source}'s outgoing connections grew from {} to {}",
                num(baseline),
                num(current)
            )
        }
    }
}

pub fn recommendation(event_type: EventType, source: &str, destination: &str) -> String {
    match event_type {
        EventType::NewEdge => {
            format!("Review NetworkPolicy for {destination}; confirm this connection is expected from {source}")
        }
        EventType::RemovedEdge => {
            format!("Confirm removal of {source} \u{2192} {destination} was intentional; check for a related incident")
        }
        EventType::ErrorSpike => format!("Inspect logs of {destination}; consider rate-limiting {source}"),
        EventType::LatencySpike => format!("Check {destination} for resource exhaustion or downstream slowness"),
        EventType::TrafficSpike => format!("Verify {destination} capacity can absorb the new load from {source}"),
        EventType::BlastRadiusIncrease => {
            format!("Review the new dependencies created by {source} for unintended coupling")
        }
    }
}
