// [libs/infra/memory-store/src/client.rs]
/*!
 * =================================================================
 * APARATO: MEMORY STORE CLIENT
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CONEXIÓN LIBSQL Y BOOTSTRAP DE ESQUEMA
 *
 * Misma ancla de conexión en memoria que `snapshot-store::client` — las
 * dos bases viven en procesos libsql separados, de modo que cada store
 * mantiene su propio esquema y su propia conexión ancla.
 * =================================================================
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::{info, instrument};

use crate::errors::{from_libsql, StoreResult};
use crate::schema::apply_schema;
use meshdrift_domain_feedback_memory::FeedbackError;

#[derive(Clone)]
pub struct MemoryStoreClient {
    database: Arc<Database>,
    _memory_anchor: Option<Arc<Connection>>,
}

impl MemoryStoreClient {
    #[instrument(skip(auth_token))]
    pub async fn connect(database_url: &str, auth_token: Option<String>) -> StoreResult<Self> {
        if database_url.is_empty() {
            return Err(FeedbackError::InvalidArgument(
                "DATABASE_URL must not be empty".into(),
            ));
        }

        let is_remote = database_url.starts_with("libsql://") || database_url.starts_with("https://");
        let is_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let database = if is_remote {
            let token = auth_token.ok_or_else(|| {
                FeedbackError::InvalidArgument("remote connection requires an auth token".into())
            })?;
            Builder::new_remote(database_url.to_string(), token)
                .build()
                .await
                .map_err(from_libsql)?
        } else {
            Builder::new_local(database_url).build().await.map_err(from_libsql)?
        };

        let database = Arc::new(database);
        let mut anchor = None;

        if is_memory {
            let anchor_conn = database.connect().map_err(from_libsql)?;
            apply_schema(&anchor_conn)
                .await
                .map_err(|e| FeedbackError::Unavailable(e.to_string()))?;
            anchor = Some(Arc::new(anchor_conn));
        } else {
            let bootstrap_conn = database.connect().map_err(from_libsql)?;
            apply_schema(&bootstrap_conn)
                .await
                .map_err(|e| FeedbackError::Unavailable(e.to_string()))?;
        }

        info!(url = %database_url, "🔌 [MEMORY_STORE]: connected and schema synchronized");

        Ok(MemoryStoreClient {
            database,
            _memory_anchor: anchor,
        })
    }

    pub fn connection(&self) -> StoreResult<Connection> {
        self.database.connect().map_err(from_libsql)
    }
}
