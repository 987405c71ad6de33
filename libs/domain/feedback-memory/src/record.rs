// [libs/domain/feedback-memory/src/record.rs]
//! Registro de feedback humano sobre un evento de drift (§4.8).

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::{EdgeKey, EventType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVerdict {
    FalsePositive,
    Expected,
    TruePositive,
}

impl FeedbackVerdict {
    /// Modificador aportado a `history_mod` (§4.8 / §4.9). `TruePositive`
    /// confirma el riesgo detectado y no empuja el score en ninguna
    /// dirección.
    pub fn modifier(&self) -> i32 {
        match self {
            FeedbackVerdict::FalsePositive => -40,
            FeedbackVerdict::Expected => -30,
            FeedbackVerdict::TruePositive => 0,
        }
    }

    /// `true` cuando este veredicto es candidato a auto-whitelist (§4.8:
    /// "writing verdict = expected MAY auto-insert a whitelist entry").
    pub fn suggests_whitelist(&self) -> bool {
        matches!(self, FeedbackVerdict::Expected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub source: String,
    pub destination: String,
    pub event_type: EventType,
    pub verdict: FeedbackVerdict,
    pub created_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl FeedbackRecord {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        event_type: EventType,
        verdict: FeedbackVerdict,
        created_at: DateTime<Utc>,
    ) -> Self {
        FeedbackRecord {
            source: source.into(),
            destination: destination.into(),
            event_type,
            verdict,
            created_at,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn edge_key(&self) -> EdgeKey {
        (self.source.clone(), self.destination.clone())
    }
}

/// Modificador de feedback puro (§4.8): `absent → 0`.
pub fn feedback_modifier(record: Option<&FeedbackRecord>) -> i32 {
    record.map(|r| r.verdict.modifier()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_feedback_has_zero_modifier() {
        assert_eq!(feedback_modifier(None), 0);
    }

    #[test]
    fn false_positive_subtracts_forty() {
        let record = FeedbackRecord::new(
            "a",
            "b",
            EventType::NewEdge,
            FeedbackVerdict::FalsePositive,
            "2026-01-01T00:00:00Z".parse().unwrap(),
        );
        assert_eq!(feedback_modifier(Some(&record)), -40);
    }
}
