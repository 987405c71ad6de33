// [libs/domain/feedback-memory/src/whitelist.rs]
//! Entradas de whitelist y reglas de supresión (§4.8).

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::{EdgeKey, EventType};
use serde::{Deserialize, Serialize};

pub const AUTO_WHITELIST_REASON: &str = "auto-whitelisted from feedback";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub source: String,
    pub destination: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl WhitelistEntry {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        WhitelistEntry {
            source: source.into(),
            destination: destination.into(),
            reason: reason.into(),
            created_at,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn edge_key(&self) -> EdgeKey {
        (self.source.clone(), self.destination.clone())
    }

    /// Una entrada sin `expires_at` nunca expira (§4.8: "an active entry").
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|expiry| now < expiry).unwrap_or(true)
    }
}

/// Extensión no exigida por el núcleo (§4.8): suprime un tipo de evento
/// para los servicios que calcen `service_pattern`, con expiración.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressRule {
    pub event_type: EventType,
    pub service_pattern: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SuppressRule {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|expiry| now < expiry).unwrap_or(true)
    }

    /// `service_pattern` soporta un único comodín `*` de sufijo o
    /// prefijo (p.ej. `"staging-*"`, `"*-canary"`) — suficiente para el
    /// caso de uso descrito en el original (glob sobre nombres de
    /// servicio), sin arrastrar una dependencia de globbing completa.
    pub fn matches_service(&self, service: &str) -> bool {
        match self.service_pattern.strip_suffix('*') {
            Some(prefix) => service.starts_with(prefix),
            None => match self.service_pattern.strip_prefix('*') {
                Some(suffix) => service.ends_with(suffix),
                None => self.service_pattern == service,
            },
        }
    }

    pub fn applies_to(&self, event_type: EventType, source: &str, destination: &str) -> bool {
        self.event_type == event_type && (self.matches_service(source) || self.matches_service(destination))
    }
}
