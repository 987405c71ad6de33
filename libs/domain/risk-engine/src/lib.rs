// [libs/domain/risk-engine/src/lib.rs]
/*!
 * =================================================================
 * APARATO: RISK ENGINE (C5, C6, C7, C8, C10)
 * CLASIFICACIÓN: PURE DOMAIN FUNCTIONS (ESTRATO L2)
 * RESPONSABILIDAD: REGLAS, SCORE BASE, BASELINE ML, PATRONES Y
 *                  COMPOSICIÓN DEL SMART SCORE
 * =================================================================
 */

pub mod anomaly;
pub mod base_score;
pub mod baseline;
pub mod config;
pub mod patterns;
pub mod rules;
pub mod scorer;

pub use anomaly::{classify, AnomalyClassification, AnomalyLabel};
pub use base_score::{score_base, BaseScore};
pub use baseline::{build_profile, update_profile_ema, MetricSample};
pub use config::{AnomalyThresholds, AnomalyWeights, RiskEngineConfig};
pub use patterns::{recognize, Pattern, PatternMatch};
pub use rules::{evaluate, TriggeredRule};
pub use scorer::{score_batch, Breakdown, ScoredEvent, ScorerInput};
