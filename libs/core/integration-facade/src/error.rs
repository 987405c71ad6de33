// [libs/core/integration-facade/src/error.rs]
//! Error de transporte para los adaptadores externos. El pipeline nunca
//! interpreta el contenido de este error más allá de distinguir
//! "reintentable" de "terminal" — ver §7, propagación C12.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("[FACADE_UNAVAILABLE]: upstream collaborator unreachable: {0}")]
    Unavailable(String),

    #[error("[FACADE_REJECTED]: upstream collaborator rejected the payload: {0}")]
    Rejected(String),
}

impl FacadeError {
    /// Los fallos `Unavailable` son los únicos que el task wrapper (C12)
    /// debe tratar como transitorios y reintentar.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FacadeError::Unavailable(_))
    }
}

pub type FacadeResult<T> = Result<T, FacadeError>;
