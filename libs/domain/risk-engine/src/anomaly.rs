// [libs/domain/risk-engine/src/anomaly.rs]
//! Clasificador de anomalías (C7): combina z-scores de las tres métricas
//! de una arista contra su `EdgeProfile` en una única puntuación `A`.

use meshdrift_core_graph_model::EdgeProfile;
use serde::{Deserialize, Serialize};

use crate::baseline::MetricSample;
use crate::config::RiskEngineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyLabel {
    InsufficientData,
    Normal,
    Suspicious,
    Anomaly,
}

impl AnomalyLabel {
    /// Modificador que aporta al smart score (§4.6).
    pub fn modifier(&self) -> i32 {
        match self {
            AnomalyLabel::Anomaly => 20,
            AnomalyLabel::Suspicious => 10,
            AnomalyLabel::Normal => -20,
            AnomalyLabel::InsufficientData => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyClassification {
    pub label: AnomalyLabel,
    pub score: f64,
}

/// Clasifica `current` contra `profile`. Un profile ausente o sin datos
/// suficientes siempre produce `insufficient_data`.
pub fn classify(
    current: MetricSample,
    profile: Option<&EdgeProfile>,
    config: &RiskEngineConfig,
) -> AnomalyClassification {
    let profile = match profile {
        Some(p) if p.has_sufficient_data() => p,
        _ => {
            return AnomalyClassification {
                label: AnomalyLabel::InsufficientData,
                score: 0.0,
            }
        }
    };

    let z_err = profile.error_rate.z_score(current.error_rate);
    let z_lat = profile.p99_latency_ms.z_score(current.p99_latency_ms);
    let z_req = profile.request_count.z_score(current.request_count);

    let weights = config.anomaly_weights;
    let score = weights.error * z_err.max(0.0) + weights.latency * z_lat.max(0.0) + weights.request * z_req.abs();

    let thresholds = config.anomaly_thresholds;
    let label = if score >= thresholds.anomaly {
        AnomalyLabel::Anomaly
    } else if score >= thresholds.suspicious {
        AnomalyLabel::Suspicious
    } else {
        AnomalyLabel::Normal
    };

    AnomalyClassification { label, score }
}
