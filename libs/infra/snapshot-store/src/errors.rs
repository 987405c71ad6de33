// [libs/infra/snapshot-store/src/errors.rs]
//! Catálogo de errores de C2 (§7): un store solo produce `not_found`,
//! `invalid_argument` o `unavailable` — nunca un mensaje interno crudo.

use meshdrift_core_graph_model::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// El snapshot/perfil solicitado no existe para el tenant del caller.
    /// Una lectura cross-tenant también cae aquí — nunca "forbidden",
    /// para no operar como oráculo de existencia (§4.1).
    #[error("[STORE_NOT_FOUND]: {0}")]
    NotFound(String),

    /// Argumento inválido: tenant ausente en una escritura, snapshot_id
    /// vacío, ventana invertida, etc.
    #[error("[STORE_INVALID_ARGUMENT]: {0}")]
    InvalidArgument(String),

    /// Fallo transitorio de I/O — el wrapper de reintentos de C12 lo
    /// reintenta; nunca es terminal en sí mismo.
    #[error("[STORE_UNAVAILABLE]: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<CoreError> for StoreError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidArgument(message) => StoreError::InvalidArgument(message),
        }
    }
}

impl From<libsql::Error> for StoreError {
    fn from(value: libsql::Error) -> Self {
        StoreError::Unavailable(value.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
