// [libs/core/integration-facade/src/ingestor.rs]
//! `Ingestor`: el contrato que desacopla el snapshot builder (C3) de
//! cualquier formato de log concreto (Envoy, nginx, ingress, OTEL...).
//! Los parsers en sí son adaptadores fuera de alcance del núcleo (§1).

use async_trait::async_trait;

use crate::error::FacadeResult;
use crate::record::RequestRecord;

/// Fuente opaca de registros. `source_ref` es interpretado enteramente
/// por la implementación — un path de archivo, un nombre de tópico, una
/// URL de scrape, lo que sea.
#[async_trait]
pub trait Ingestor: Send + Sync {
    async fn fetch_records(&self, source_ref: &str) -> FacadeResult<Vec<RequestRecord>>;
}

/// Ingestor que nunca produce tráfico; útil para arrancar el pipeline en
/// ausencia de un adaptador real, y en pruebas de la cadena de tareas C12.
pub struct EmptyIngestor;

#[async_trait]
impl Ingestor for EmptyIngestor {
    async fn fetch_records(&self, _source_ref: &str) -> FacadeResult<Vec<RequestRecord>> {
        Ok(Vec::new())
    }
}
