// [libs/domain/risk-engine/src/config.rs]
//! Configuración enumerada del motor de riesgo (§6 "Configuration").
//! Todos los valores por defecto reproducen los de la especificación;
//! un despliegue puede retunearlos sin recompilar el core.

use std::collections::{BTreeMap, BTreeSet};

use meshdrift_core_graph_model::EventType;

/// Pesos de la combinación lineal de z-scores del clasificador de
/// anomalías (§4.6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyWeights {
    pub error: f64,
    pub latency: f64,
    pub request: f64,
}

impl Default for AnomalyWeights {
    fn default() -> Self {
        AnomalyWeights {
            error: 2.0,
            latency: 1.5,
            request: 1.0,
        }
    }
}

/// Umbrales de la combinación `A` que deciden `anomaly`/`suspicious`/`normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyThresholds {
    pub anomaly: f64,
    pub suspicious: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        AnomalyThresholds {
            anomaly: 3.0,
            suspicious: 2.0,
        }
    }
}

/// Todo lo que el motor de riesgo necesita para evaluar un batch: tablas
/// de reglas, scores base, tamaño de ventana ML y bandas de anomalía.
#[derive(Debug, Clone)]
pub struct RiskEngineConfig {
    pub baseline_window_size: u32,
    pub anomaly_weights: AnomalyWeights,
    pub anomaly_thresholds: AnomalyThresholds,
    pub sensitive_services: BTreeSet<String>,
    pub gateways: BTreeSet<String>,
    /// `destination -> owning source`; usado por `database_direct_access`.
    pub db_owners: BTreeMap<String, String>,
    pub base_scores: BTreeMap<EventType, u8>,
}

impl Default for RiskEngineConfig {
    fn default() -> Self {
        let sensitive_services = ["payments-db", "users-db", "orders-db", "auth-svc"]
            .into_iter()
            .map(String::from)
            .collect();

        let gateways = ["api-gateway"].into_iter().map(String::from).collect();

        let db_owners = BTreeMap::new();

        let base_scores = [
            (EventType::NewEdge, 40),
            (EventType::RemovedEdge, 20),
            (EventType::ErrorSpike, 35),
            (EventType::LatencySpike, 25),
            (EventType::TrafficSpike, 30),
            (EventType::BlastRadiusIncrease, 35),
        ]
        .into_iter()
        .collect();

        RiskEngineConfig {
            baseline_window_size: 24,
            anomaly_weights: AnomalyWeights::default(),
            anomaly_thresholds: AnomalyThresholds::default(),
            sensitive_services,
            gateways,
            db_owners,
            base_scores,
        }
    }
}

impl RiskEngineConfig {
    /// Score base para `event_type`, o `10` (default de §4.5) si la tabla
    /// no lo enumera explícitamente.
    pub fn base_score_for(&self, event_type: EventType) -> u8 {
        self.base_scores.get(&event_type).copied().unwrap_or(10)
    }
}
