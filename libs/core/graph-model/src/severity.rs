// [libs/core/graph-model/src/severity.rs]
//! Etiqueta de severidad derivada del score final — función de banda
//! compartida por C6 (base scorer) y C10 (smart scorer) para que ambos
//! caminos de scoring produzcan la misma etiqueta para el mismo score.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// `>=80 critical, >=60 high, >=40 medium, else low` (§4.5).
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Severity::Critical
        } else if score >= 60 {
            Severity::High
        } else if score >= 40 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_match_spec_boundaries() {
        assert_eq!(Severity::from_score(100), Severity::Critical);
        assert_eq!(Severity::from_score(80), Severity::Critical);
        assert_eq!(Severity::from_score(79), Severity::High);
        assert_eq!(Severity::from_score(60), Severity::High);
        assert_eq!(Severity::from_score(59), Severity::Medium);
        assert_eq!(Severity::from_score(40), Severity::Medium);
        assert_eq!(Severity::from_score(39), Severity::Low);
        assert_eq!(Severity::from_score(0), Severity::Low);
    }

    #[test]
    fn actionable_is_high_or_critical() {
        assert!(Severity::High.is_actionable());
        assert!(Severity::Critical.is_actionable());
        assert!(!Severity::Medium.is_actionable());
        assert!(!Severity::Low.is_actionable());
    }
}
