// [libs/core/graph-model/src/drift_event.rs]
//! Evento de drift puro, emitido por C4 y consumido por C5-C11.
//!
//! Open Question §9.2 resuelta hacia la variante inmutable: `DriftEvent` no
//! carga `severity`. La severidad y el breakdown de score son la salida de
//! C10 (`ScoredEvent`, ver `risk-engine`), nunca un campo mutado en el
//! propio evento.

use serde::{Deserialize, Serialize};

/// Tipo cerrado de evento de drift (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    NewEdge,
    RemovedEdge,
    ErrorSpike,
    LatencySpike,
    TrafficSpike,
    BlastRadiusIncrease,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::NewEdge => "new_edge",
            EventType::RemovedEdge => "removed_edge",
            EventType::ErrorSpike => "error_spike",
            EventType::LatencySpike => "latency_spike",
            EventType::TrafficSpike => "traffic_spike",
            EventType::BlastRadiusIncrease => "blast_radius_increase",
        }
    }
}

/// Contexto numérico asociado a un evento — el esquema varía por
/// `event_type` pero comparte estas tres llaves (§3), más un
/// `request_count` opcional usado por el reconocedor de patrones para
/// distinguir un release canary de un `new_edge` ordinario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_count: Option<u64>,
}

impl DriftDetails {
    pub fn metric_change(baseline_value: f64, current_value: f64, change_factor: f64) -> Self {
        DriftDetails {
            baseline_value: Some(baseline_value),
            current_value: Some(current_value),
            change_factor: Some(change_factor),
            request_count: None,
        }
    }

    pub fn with_request_count(mut self, request_count: u64) -> Self {
        self.request_count = Some(request_count);
        self
    }
}

/// Un cambio estructural o métrico entre dos snapshots. `destination` es
/// `"*"` cuando el evento está anclado a un nodo (`blast_radius_increase`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftEvent {
    pub event_type: EventType,
    pub source: String,
    pub destination: String,
    pub details: DriftDetails,
}

impl DriftEvent {
    pub fn new(
        event_type: EventType,
        source: impl Into<String>,
        destination: impl Into<String>,
        details: DriftDetails,
    ) -> Self {
        DriftEvent {
            event_type,
            source: source.into(),
            destination: destination.into(),
            details,
        }
    }

    /// Clave de edge para eventos ligados a una arista concreta
    /// (todo salvo `blast_radius_increase`, cuyo destino centinela `"*"`
    /// no identifica una arista real).
    pub fn edge_key(&self) -> (String, String) {
        (self.source.clone(), self.destination.clone())
    }

    pub fn is_node_scoped(&self) -> bool {
        self.destination == "*"
    }
}
