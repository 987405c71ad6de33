// [libs/core/graph-model/src/error.rs]
//! Catálogo de errores para los componentes puros del núcleo (C3-C8, C10, C11).
//!
//! Los componentes puros no hacen I/O: la única falla que pueden producir es
//! un argumento inválido. Los crates de persistencia (`snapshot-store`,
//! `memory-store`) definen su propio `StoreError` y convierten desde este
//! tipo cuando corresponde, en vez de heredar variantes de infraestructura
//! en el núcleo.

use thiserror::Error;

/// Error semántico compartido por las capas sin estado del pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Un argumento violó un invariante del dominio (campo vacío, métrica
    /// negativa, `error_count` mayor que `request_count`, tenant ausente
    /// en una escritura, etc).
    #[error("[CORE_INVALID_ARGUMENT]: {0}")]
    InvalidArgument(String),
}

impl CoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CoreError::InvalidArgument(message.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
