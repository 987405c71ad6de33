// [libs/core/integration-facade/src/record.rs]
//! Registro de solicitud inbound (§6): la forma de alambre que cualquier
//! `Ingestor` —sin importar el formato de log de origen— debe producir
//! antes de entregarla al snapshot builder (C3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Una solicitud individual observada entre dos servicios. Campos extra
/// en el JSON de origen se ignoran (§6: "Extras ignored").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub destination: String,
    pub status_code: u16,
    pub latency_ms: f64,
}

impl RequestRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        source: impl Into<String>,
        destination: impl Into<String>,
        status_code: u16,
        latency_ms: f64,
    ) -> Self {
        RequestRecord {
            timestamp,
            source: source.into(),
            destination: destination.into(),
            status_code,
            latency_ms,
        }
    }

    /// Política del builder (§4.2): solo 5xx cuenta como error; 4xx no.
    pub fn is_error(&self) -> bool {
        self.status_code >= 500
    }

    pub fn is_within_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.timestamp >= start && self.timestamp < end
    }
}
