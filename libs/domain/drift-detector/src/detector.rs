// [libs/domain/drift-detector/src/detector.rs]
//! Diff puro entre dos snapshots consecutivos (C4).
//!
//! El orden de emisión es fijo y determinista: `new_edge`, `removed_edge`,
//! luego por cada arista común (ordenada por clave) `error_spike` /
//! `latency_spike` / `traffic_spike`, y por último `blast_radius_increase`
//! por servicio origen (ordenado por nombre). Ningún paso depende del
//! orden de iteración de un `HashMap` — `Snapshot` ya expone sus aristas y
//! `outgoing_counts()` ordenados, así que `diff` hereda el determinismo.

use meshdrift_core_graph_model::{DriftDetails, DriftEvent, EventType, Snapshot};

use crate::rounding::{round_2, round_4};

const ERROR_RATE_FLOOR: f64 = 0.05;
const ERROR_RATE_RATIO_THRESHOLD: f64 = 2.0;
const LATENCY_FLOOR_MS: f64 = 100.0;
const LATENCY_RATIO_THRESHOLD: f64 = 2.0;
const TRAFFIC_RATIO_THRESHOLD: f64 = 3.0;
const BLAST_RADIUS_MIN_INCREASE: usize = 2;

/// Calcula la lista de `DriftEvent` entre `baseline` y `current`.
/// `diff(s, s)` siempre devuelve una lista vacía (Propiedad Testable #3).
pub fn diff(baseline: &Snapshot, current: &Snapshot) -> Vec<DriftEvent> {
    let mut events = Vec::new();

    diff_structural(baseline, current, &mut events);
    diff_metrics(baseline, current, &mut events);
    diff_blast_radius(baseline, current, &mut events);

    events
}

fn diff_structural(baseline: &Snapshot, current: &Snapshot, events: &mut Vec<DriftEvent>) {
    for key in current.edge_keys() {
        if baseline.get_edge(key).is_none() {
            let edge = current.get_edge(key).expect("key came from current");
            events.push(DriftEvent::new(
                EventType::NewEdge,
                key.0.clone(),
                key.1.clone(),
                DriftDetails::default().with_request_count(edge.request_count),
            ));
        }
    }

    for key in baseline.edge_keys() {
        if current.get_edge(key).is_none() {
            let edge = baseline.get_edge(key).expect("key came from baseline");
            events.push(DriftEvent::new(
                EventType::RemovedEdge,
                key.0.clone(),
                key.1.clone(),
                DriftDetails::default().with_request_count(edge.request_count),
            ));
        }
    }
}

fn diff_metrics(baseline: &Snapshot, current: &Snapshot, events: &mut Vec<DriftEvent>) {
    for key in current.edge_keys() {
        let (Some(base_edge), Some(curr_edge)) = (baseline.get_edge(key), current.get_edge(key))
        else {
            continue;
        };

        let base_error_rate = base_edge.error_rate();
        let curr_error_rate = curr_edge.error_rate();
        if base_error_rate > 0.0 && curr_error_rate > ERROR_RATE_FLOOR {
            let ratio = curr_error_rate / base_error_rate;
            if ratio > ERROR_RATE_RATIO_THRESHOLD {
                events.push(DriftEvent::new(
                    EventType::ErrorSpike,
                    key.0.clone(),
                    key.1.clone(),
                    DriftDetails::metric_change(
                        round_4(base_error_rate),
                        round_4(curr_error_rate),
                        round_2(ratio),
                    )
                    .with_request_count(curr_edge.request_count),
                ));
            }
        }

        let base_p99 = base_edge.p99_latency_ms;
        let curr_p99 = curr_edge.p99_latency_ms;
        if base_p99 > 0.0 && curr_p99 > LATENCY_FLOOR_MS {
            let ratio = curr_p99 / base_p99;
            if ratio > LATENCY_RATIO_THRESHOLD {
                events.push(DriftEvent::new(
                    EventType::LatencySpike,
                    key.0.clone(),
                    key.1.clone(),
                    DriftDetails::metric_change(round_2(base_p99), round_2(curr_p99), round_2(ratio))
                        .with_request_count(curr_edge.request_count),
                ));
            }
        }

        let base_requests = base_edge.request_count;
        let curr_requests = curr_edge.request_count;
        if base_requests > 0 {
            let ratio = curr_requests as f64 / base_requests as f64;
            if ratio > TRAFFIC_RATIO_THRESHOLD {
                events.push(DriftEvent::new(
                    EventType::TrafficSpike,
                    key.0.clone(),
                    key.1.clone(),
                    DriftDetails::metric_change(base_requests as f64, curr_requests as f64, round_2(ratio))
                        .with_request_count(curr_requests),
                ));
            }
        }
    }
}

fn diff_blast_radius(baseline: &Snapshot, current: &Snapshot, events: &mut Vec<DriftEvent>) {
    let base_counts = baseline.outgoing_counts();
    let curr_counts = current.outgoing_counts();

    for (source, curr_count) in &curr_counts {
        let base_count = base_counts.get(source).copied().unwrap_or(0);
        if curr_count.saturating_sub(base_count) >= BLAST_RADIUS_MIN_INCREASE {
            // §8 S5: change_factor here is the raw outgoing-edge delta
            // (curr - base), not a ratio like the metric spikes above —
            // there is no natural "factor" for a neighbor count going
            // from 0 to N.
            let details = DriftDetails {
                baseline_value: Some(base_count as f64),
                current_value: Some(*curr_count as f64),
                change_factor: Some((*curr_count as f64) - (base_count as f64)),
                request_count: Some(*curr_count as u64),
            };
            events.push(DriftEvent::new(
                EventType::BlastRadiusIncrease,
                source.clone(),
                "*",
                details,
            ));
        }
    }
}
