// [libs/core/integration-facade/src/policy.rs]
//! `PolicyRenderer`: traduce un `ExplainCard` de severidad alta/crítica en
//! un blob de política (NetworkPolicy YAML u otro formato de destino).
//! El renderizador concreto es un adaptador externo (§1, §6) — fuera de
//! alcance del núcleo.

use async_trait::async_trait;
use meshdrift_core_graph_model::ExplainCard;

#[async_trait]
pub trait PolicyRenderer: Send + Sync {
    /// `None` cuando el renderizador decide que esta card no amerita una
    /// propuesta de política (p. ej. está fuera de su alcance de reglas).
    async fn render(&self, card: &ExplainCard) -> Option<String>;
}

/// Renderizador que nunca emite una propuesta de política — el default
/// seguro para un despliegue que aún no conectó un generador de YAML.
pub struct NoPolicyRenderer;

#[async_trait]
impl PolicyRenderer for NoPolicyRenderer {
    async fn render(&self, _card: &ExplainCard) -> Option<String> {
        None
    }
}
