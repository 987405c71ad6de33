// [libs/core/graph-model/src/lib.rs]
/*!
 * =================================================================
 * APARATO: GRAPH DOMAIN MODEL (MESHDRIFT CORE)
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: TIPOS DE VALOR INMUTABLES DEL PIPELINE DE DRIFT
 *
 * Este crate es el Single Source of Truth para las entidades C1 del
 * sistema: `Node`, `Edge`, `Snapshot`, `DriftEvent`, `EdgeProfile`,
 * `ExplainCard`, y el contexto de tenant (C14) que las atraviesa. Ningún
 * otro crate del workspace redefine estos tipos.
 * =================================================================
 */

pub mod drift_event;
pub mod edge;
pub mod edge_profile;
pub mod error;
pub mod explain_card;
pub mod node;
pub mod severity;
pub mod snapshot;
pub mod tenant;

pub use drift_event::{DriftDetails, DriftEvent, EventType};
pub use edge::{Edge, EdgeKey};
pub use edge_profile::{EdgeProfile, MetricStats, DEFAULT_WINDOW_SIZE, MIN_SAMPLES_FOR_BASELINE};
pub use error::{CoreError, CoreResult};
pub use explain_card::ExplainCard;
pub use node::{Node, NodeType};
pub use severity::Severity;
pub use snapshot::Snapshot;
pub use tenant::TenantContext;
