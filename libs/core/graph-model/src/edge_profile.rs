// [libs/core/graph-model/src/edge_profile.rs]
//! Estado ML (C7): estadísticas móviles por `(tenant_id, source, destination)`
//! sobre las últimas ≤ W ventanas, usadas para la clasificación por z-score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::edge::EdgeKey;

/// Tamaño de ventana por defecto (§3: `W = 24`).
pub const DEFAULT_WINDOW_SIZE: u32 = 24;

/// Mínimo de muestras para que un `EdgeProfile` sea estadísticamente
/// utilizable por el clasificador de anomalías (§4.6).
pub const MIN_SAMPLES_FOR_BASELINE: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    pub std: f64,
}

impl MetricStats {
    pub fn new(mean: f64, std: f64) -> Self {
        MetricStats { mean, std }
    }

    /// `(value - mean) / std`, o `0.0` cuando `std == 0` (§4.6).
    pub fn z_score(&self, value: f64) -> f64 {
        if self.std > 0.0 {
            (value - self.mean) / self.std
        } else {
            0.0
        }
    }
}

/// Perfil de referencia móvil de una arista. Construido en bloque desde
/// los últimos snapshots o actualizado incrementalmente por EMA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeProfile {
    pub edge_key: EdgeKey,
    pub request_count: MetricStats,
    pub error_rate: MetricStats,
    pub p99_latency_ms: MetricStats,
    pub sample_count: u32,
    pub last_updated: DateTime<Utc>,
}

impl EdgeProfile {
    pub fn new(
        edge_key: EdgeKey,
        request_count: MetricStats,
        error_rate: MetricStats,
        p99_latency_ms: MetricStats,
        sample_count: u32,
        last_updated: DateTime<Utc>,
    ) -> Self {
        EdgeProfile {
            edge_key,
            request_count,
            error_rate,
            p99_latency_ms,
            sample_count,
            last_updated,
        }
    }

    pub fn has_sufficient_data(&self) -> bool {
        self.sample_count >= MIN_SAMPLES_FOR_BASELINE
    }
}
