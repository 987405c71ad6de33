// [libs/core/graph-model/src/edge.rs]
//! Arista dirigida del grafo de malla, con métricas de salud por ventana.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Clave única de una arista dentro de un snapshot: `(source, destination)`.
pub type EdgeKey = (String, String);

/// Entidad de valor inmutable. `error_rate` es un campo derivado, nunca
/// almacenado: se recalcula desde `error_count`/`request_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub destination: String,
    pub request_count: u64,
    pub error_count: u64,
    pub avg_latency_ms: f64,
    pub p99_latency_ms: f64,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        request_count: u64,
        error_count: u64,
        avg_latency_ms: f64,
        p99_latency_ms: f64,
    ) -> CoreResult<Self> {
        let source = source.into();
        let destination = destination.into();

        if source.trim().is_empty() {
            return Err(CoreError::invalid("Edge.source must not be empty"));
        }
        if destination.trim().is_empty() {
            return Err(CoreError::invalid("Edge.destination must not be empty"));
        }
        if error_count > request_count {
            return Err(CoreError::invalid(
                "Edge.error_count must not exceed request_count",
            ));
        }
        if avg_latency_ms < 0.0 || p99_latency_ms < 0.0 {
            return Err(CoreError::invalid("Edge latencies must be non-negative"));
        }

        Ok(Edge {
            source,
            destination,
            request_count,
            error_count,
            avg_latency_ms,
            p99_latency_ms,
        })
    }

    pub fn edge_key(&self) -> EdgeKey {
        (self.source.clone(), self.destination.clone())
    }

    /// `error_count / request_count`, o `0.0` cuando no hubo tráfico.
    pub fn error_rate(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.error_count as f64 / self.request_count as f64
        }
    }
}
