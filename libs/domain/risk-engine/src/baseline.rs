// [libs/domain/risk-engine/src/baseline.rs]
//! Construcción y actualización del `EdgeProfile` (C7).
//!
//! El build en bloque usa varianza poblacional (`ddof=0`, como
//! `numpy.std` por defecto) sobre hasta `W` muestras; la actualización
//! incremental usa el recurrencia EMA de §4.6.

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::{Edge, EdgeKey, EdgeProfile, MetricStats, MIN_SAMPLES_FOR_BASELINE};

/// Una observación histórica de una arista — normalmente el `Edge` de un
/// snapshot pasado, reducido a las tres métricas que importan al ML.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub request_count: f64,
    pub error_rate: f64,
    pub p99_latency_ms: f64,
}

impl From<&Edge> for MetricSample {
    fn from(edge: &Edge) -> Self {
        MetricSample {
            request_count: edge.request_count as f64,
            error_rate: edge.error_rate(),
            p99_latency_ms: edge.p99_latency_ms,
        }
    }
}

fn population_stats(values: &[f64]) -> MetricStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    MetricStats::new(mean, variance.sqrt())
}

/// Construye un `EdgeProfile` desde hasta `window_size` muestras
/// históricas, en orden cronológico ascendente (las más antiguas
/// primero). Requiere al menos `MIN_SAMPLES_FOR_BASELINE` muestras.
pub fn build_profile(
    edge_key: EdgeKey,
    samples: &[MetricSample],
    window_size: u32,
    now: DateTime<Utc>,
) -> Option<EdgeProfile> {
    if samples.len() < MIN_SAMPLES_FOR_BASELINE as usize {
        return None;
    }

    let windowed: Vec<&MetricSample> = samples
        .iter()
        .rev()
        .take(window_size as usize)
        .collect();

    let request_counts: Vec<f64> = windowed.iter().map(|s| s.request_count).collect();
    let error_rates: Vec<f64> = windowed.iter().map(|s| s.error_rate).collect();
    let latencies: Vec<f64> = windowed.iter().map(|s| s.p99_latency_ms).collect();

    Some(EdgeProfile::new(
        edge_key,
        population_stats(&request_counts),
        population_stats(&error_rates),
        population_stats(&latencies),
        windowed.len() as u32,
        now,
    ))
}

/// Actualiza `profile` incorporando la observación `sample` vía EMA con
/// `α = 2/(window_size+1)`. `sample_count` crece hasta `window_size`.
pub fn update_profile_ema(
    profile: &EdgeProfile,
    sample: MetricSample,
    window_size: u32,
    now: DateTime<Utc>,
) -> EdgeProfile {
    let alpha = 2.0 / (window_size as f64 + 1.0);

    let request_count = ema_step(profile.request_count, sample.request_count, alpha);
    let error_rate = ema_step(profile.error_rate, sample.error_rate, alpha);
    let p99_latency_ms = ema_step(profile.p99_latency_ms, sample.p99_latency_ms, alpha);

    EdgeProfile::new(
        profile.edge_key.clone(),
        request_count,
        error_rate,
        p99_latency_ms,
        (profile.sample_count + 1).min(window_size),
        now,
    )
}

fn ema_step(stats: MetricStats, x: f64, alpha: f64) -> MetricStats {
    let mean = (1.0 - alpha) * stats.mean + alpha * x;
    let variance = (1.0 - alpha) * stats.std.powi(2) + alpha * (x - mean).powi(2);
    MetricStats::new(mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        "2026-01-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn insufficient_samples_yields_none() {
        let samples = vec![
            MetricSample {
                request_count: 100.0,
                error_rate: 0.01,
                p99_latency_ms: 20.0,
            };
            2
        ];
        assert!(build_profile(("a".into(), "b".into()), &samples, 24, ts()).is_none());
    }

    #[test]
    fn three_samples_build_a_profile() {
        let samples = vec![
            MetricSample {
                request_count: 100.0,
                error_rate: 0.01,
                p99_latency_ms: 20.0,
            },
            MetricSample {
                request_count: 110.0,
                error_rate: 0.02,
                p99_latency_ms: 22.0,
            },
            MetricSample {
                request_count: 90.0,
                error_rate: 0.015,
                p99_latency_ms: 18.0,
            },
        ];
        let profile = build_profile(("a".into(), "b".into()), &samples, 24, ts()).unwrap();
        assert_eq!(profile.sample_count, 3);
        assert!(profile.has_sufficient_data());
        assert!((profile.request_count.mean - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ema_update_increments_sample_count_up_to_window() {
        let profile = EdgeProfile::new(
            ("a".into(), "b".into()),
            MetricStats::new(100.0, 5.0),
            MetricStats::new(0.01, 0.002),
            MetricStats::new(20.0, 2.0),
            24,
            ts(),
        );
        let sample = MetricSample {
            request_count: 500.0,
            error_rate: 0.2,
            p99_latency_ms: 300.0,
        };
        let updated = update_profile_ema(&profile, sample, 24, ts());
        assert_eq!(updated.sample_count, 24); // already at window cap
        assert!(updated.request_count.mean > profile.request_count.mean);
    }
}
