// [libs/core/integration-facade/src/lib.rs]
/*!
 * =================================================================
 * APARATO: INTEGRATION FACADE (C13)
 * CLASIFICACIÓN: ADAPTER CONTRACTS (ESTRATO L1)
 * RESPONSABILIDAD: DEFINIR LA FRONTERA HACIA COLABORADORES EXTERNOS
 *
 * Solo contratos y adaptadores no-op viven aquí. Los parsers de log
 * reales, el render de NetworkPolicy, el bot de PRs de Git y los
 * transportes Slack/Jira/SIEM son aparatos fuera de este repositorio
 * (§1) — este crate define la forma exacta con la que el núcleo los
 * invoca, nada más.
 * =================================================================
 */

pub mod error;
pub mod ingestor;
pub mod notifier;
pub mod policy;
pub mod publisher;
pub mod record;

pub use error::{FacadeError, FacadeResult};
pub use ingestor::{EmptyIngestor, Ingestor};
pub use notifier::{Ack, LoggingNotifier, Notifier};
pub use policy::{NoPolicyRenderer, PolicyRenderer};
pub use publisher::{drift_topic, LoggingPublisher, Publisher};
pub use record::RequestRecord;
