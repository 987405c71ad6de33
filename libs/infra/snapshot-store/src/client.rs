// [libs/infra/snapshot-store/src/client.rs]
/*!
 * =================================================================
 * APARATO: SNAPSHOT STORE CLIENT
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CONEXIÓN LIBSQL Y BOOTSTRAP DE ESQUEMA
 *
 * En modo `:memory:`/`mode=memory`, mantiene una conexión ancla viva
 * durante toda la vida del cliente — sin ella, libsql purga el
 * contenido de la base en memoria tan pronto como la última conexión
 * se cierra, rompiendo la visibilidad del esquema entre conexiones
 * concurrentes (mismo patrón que el teacher's `TursoClient`).
 * =================================================================
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::{info, instrument};

use crate::errors::{StoreError, StoreResult};
use crate::schema::apply_schema;

#[derive(Clone)]
pub struct SnapshotStoreClient {
    database: Arc<Database>,
    _memory_anchor: Option<Arc<Connection>>,
}

impl SnapshotStoreClient {
    #[instrument(skip(auth_token))]
    pub async fn connect(database_url: &str, auth_token: Option<String>) -> StoreResult<Self> {
        if database_url.is_empty() {
            return Err(StoreError::InvalidArgument("DATABASE_URL must not be empty".into()));
        }

        let is_remote = database_url.starts_with("libsql://") || database_url.starts_with("https://");
        let is_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let database = if is_remote {
            let token = auth_token
                .ok_or_else(|| StoreError::InvalidArgument("remote connection requires an auth token".into()))?;
            Builder::new_remote(database_url.to_string(), token)
                .build()
                .await
                .map_err(StoreError::from)?
        } else {
            Builder::new_local(database_url).build().await.map_err(StoreError::from)?
        };

        let database = Arc::new(database);
        let mut anchor = None;

        if is_memory {
            let anchor_conn = database.connect().map_err(StoreError::from)?;
            apply_schema(&anchor_conn)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            anchor = Some(Arc::new(anchor_conn));
        } else {
            let bootstrap_conn = database.connect().map_err(StoreError::from)?;
            apply_schema(&bootstrap_conn)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        info!(url = %database_url, "🔌 [SNAPSHOT_STORE]: connected and schema synchronized");

        Ok(SnapshotStoreClient {
            database,
            _memory_anchor: anchor,
        })
    }

    pub fn connection(&self) -> StoreResult<Connection> {
        self.database.connect().map_err(StoreError::from)
    }
}
