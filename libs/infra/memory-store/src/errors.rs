// [libs/infra/memory-store/src/errors.rs]
//! Traducción de fallas `libsql`/`chrono` al catálogo de C9
//! (`meshdrift_domain_feedback_memory::FeedbackError`), reutilizado aquí
//! para `EdgeProfile` también — ambos viven en la misma base de datos y
//! responden a la misma taxonomía not_found/invalid_argument/unavailable.

use meshdrift_core_graph_model::CoreError;
use meshdrift_domain_feedback_memory::FeedbackError;

pub type StoreError = FeedbackError;
pub type StoreResult<T> = Result<T, StoreError>;

pub fn from_core(value: CoreError) -> StoreError {
    match value {
        CoreError::InvalidArgument(message) => FeedbackError::InvalidArgument(message),
    }
}

pub fn from_libsql(value: libsql::Error) -> StoreError {
    FeedbackError::Unavailable(value.to_string())
}
