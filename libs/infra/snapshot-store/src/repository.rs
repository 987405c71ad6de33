// [libs/infra/snapshot-store/src/repository.rs]
//! `SnapshotRepository`: las siete operaciones de C2 (§4.1) sobre la
//! conexión `libsql`. Cada consulta de lectura filtra por `tenant_id` en
//! el propio `WHERE` — nunca se hace un fetch sin filtro y se descarta
//! en Rust, lo que sería un oráculo de existencia entre tenants.

use chrono::{DateTime, Utc};
use libsql::{params, Connection};
use meshdrift_core_graph_model::{Edge, Node, NodeType, Snapshot, TenantContext};
use tracing::instrument;

use crate::client::SnapshotStoreClient;
use crate::errors::{StoreError, StoreResult};

pub struct SnapshotRepository {
    client: SnapshotStoreClient,
}

impl SnapshotRepository {
    pub fn new(client: SnapshotStoreClient) -> Self {
        SnapshotRepository { client }
    }

    /// Upsert atómico por `snapshot_id`: borra nodos/aristas previos
    /// (si el id ya existía) y re-inserta encabezado + nodos + aristas
    /// en una única transacción (§4.1: "save appears atomic").
    #[instrument(skip(self, snapshot))]
    pub async fn save(&self, tenant: &TenantContext, snapshot: &Snapshot) -> StoreResult<()> {
        let tenant_id = tenant.require_write_tenant()?;
        let conn = self.client.connection()?;
        let tx = conn.transaction().await.map_err(StoreError::from)?;

        tx.execute(
            "DELETE FROM edges WHERE tenant_id = ?1 AND snapshot_id = ?2",
            params![tenant_id, snapshot.snapshot_id.as_str()],
        )
        .await
        .map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM nodes WHERE tenant_id = ?1 AND snapshot_id = ?2",
            params![tenant_id, snapshot.snapshot_id.as_str()],
        )
        .await
        .map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM snapshots WHERE tenant_id = ?1 AND snapshot_id = ?2",
            params![tenant_id, snapshot.snapshot_id.as_str()],
        )
        .await
        .map_err(StoreError::from)?;

        tx.execute(
            "INSERT INTO snapshots (tenant_id, snapshot_id, timestamp_start, timestamp_end) VALUES (?1, ?2, ?3, ?4)",
            params![
                tenant_id,
                snapshot.snapshot_id.as_str(),
                snapshot.timestamp_start.to_rfc3339(),
                snapshot.timestamp_end.to_rfc3339(),
            ],
        )
        .await
        .map_err(StoreError::from)?;

        for node in snapshot.nodes() {
            tx.execute(
                "INSERT INTO nodes (tenant_id, snapshot_id, name, namespace, node_type) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    tenant_id,
                    snapshot.snapshot_id.as_str(),
                    node.name.as_str(),
                    node.namespace.as_str(),
                    node.node_type.as_str(),
                ],
            )
            .await
            .map_err(StoreError::from)?;
        }

        for edge in snapshot.edges() {
            tx.execute(
                "INSERT INTO edges (tenant_id, snapshot_id, source, destination, request_count, error_count, avg_latency_ms, p99_latency_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    tenant_id,
                    snapshot.snapshot_id.as_str(),
                    edge.source.as_str(),
                    edge.destination.as_str(),
                    edge.request_count as i64,
                    edge.error_count as i64,
                    edge.avg_latency_ms,
                    edge.p99_latency_ms,
                ],
            )
            .await
            .map_err(StoreError::from)?;
        }

        tx.commit().await.map_err(StoreError::from)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, tenant: &TenantContext, snapshot_id: &str) -> StoreResult<Snapshot> {
        let conn = self.client.connection()?;
        self.load_one(&conn, tenant, snapshot_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_latest(&self, tenant: &TenantContext) -> StoreResult<Option<Snapshot>> {
        let conn = self.client.connection()?;
        let scope = tenant.read_scope()?;

        let (sql, id) = match scope {
            Some(tenant_id) => (
                "SELECT snapshot_id FROM snapshots WHERE tenant_id = ?1 ORDER BY timestamp_start DESC, snapshot_id ASC LIMIT 1",
                Some(tenant_id.to_string()),
            ),
            None => (
                "SELECT snapshot_id FROM snapshots ORDER BY timestamp_start DESC, snapshot_id ASC LIMIT 1",
                None,
            ),
        };

        let mut rows = match id {
            Some(tenant_id) => conn.query(sql, params![tenant_id]).await.map_err(StoreError::from)?,
            None => conn.query(sql, ()).await.map_err(StoreError::from)?,
        };

        match rows.next().await.map_err(StoreError::from)? {
            Some(row) => {
                let snapshot_id: String = row.get(0).map_err(StoreError::from)?;
                Ok(Some(self.load_one(&conn, tenant, &snapshot_id).await?))
            }
            None => Ok(None),
        }
    }

    /// `(previous, latest)` u `none` cuando hay menos de dos snapshots
    /// guardados para el tenant (§4.1).
    #[instrument(skip(self))]
    pub async fn get_latest_two(&self, tenant: &TenantContext) -> StoreResult<Option<(Snapshot, Snapshot)>> {
        let ids = self.latest_ids(tenant, 2).await?;
        if ids.len() < 2 {
            return Ok(None);
        }
        let conn = self.client.connection()?;
        let latest = self.load_one(&conn, tenant, &ids[0]).await?;
        let previous = self.load_one(&conn, tenant, &ids[1]).await?;
        Ok(Some((previous, latest)))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, tenant: &TenantContext, limit: u32) -> StoreResult<Vec<Snapshot>> {
        let ids = self.latest_ids(tenant, limit).await?;
        let conn = self.client.connection()?;
        let mut snapshots = Vec::with_capacity(ids.len());
        for id in ids {
            snapshots.push(self.load_one(&conn, tenant, &id).await?);
        }
        Ok(snapshots)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, tenant: &TenantContext, snapshot_id: &str) -> StoreResult<bool> {
        let tenant_id = tenant.require_write_tenant()?;
        let conn = self.client.connection()?;
        let tx = conn.transaction().await.map_err(StoreError::from)?;

        tx.execute(
            "DELETE FROM edges WHERE tenant_id = ?1 AND snapshot_id = ?2",
            params![tenant_id, snapshot_id],
        )
        .await
        .map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM nodes WHERE tenant_id = ?1 AND snapshot_id = ?2",
            params![tenant_id, snapshot_id],
        )
        .await
        .map_err(StoreError::from)?;
        let affected = tx
            .execute(
                "DELETE FROM snapshots WHERE tenant_id = ?1 AND snapshot_id = ?2",
                params![tenant_id, snapshot_id],
            )
            .await
            .map_err(StoreError::from)?;

        tx.commit().await.map_err(StoreError::from)?;
        Ok(affected > 0)
    }

    /// Barrido de retención: descarta todo snapshot con `timestamp_end`
    /// anterior a `now - days`. Devuelve el número de snapshots purgados.
    #[instrument(skip(self))]
    pub async fn delete_older_than(&self, tenant: &TenantContext, days: i64) -> StoreResult<u64> {
        let tenant_id = tenant.require_write_tenant()?;
        let cutoff = (Utc::now() - chrono::Duration::days(days)).to_rfc3339();
        let conn = self.client.connection()?;

        let mut rows = conn
            .query(
                "SELECT snapshot_id FROM snapshots WHERE tenant_id = ?1 AND timestamp_end < ?2",
                params![tenant_id, cutoff.clone()],
            )
            .await
            .map_err(StoreError::from)?;

        let mut stale_ids = Vec::new();
        while let Some(row) = rows.next().await.map_err(StoreError::from)? {
            stale_ids.push(row.get::<String>(0).map_err(StoreError::from)?);
        }

        let tx = conn.transaction().await.map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM edges WHERE tenant_id = ?1 AND snapshot_id IN (SELECT snapshot_id FROM snapshots WHERE tenant_id = ?1 AND timestamp_end < ?2)",
            params![tenant_id, cutoff.clone()],
        )
        .await
        .map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM nodes WHERE tenant_id = ?1 AND snapshot_id IN (SELECT snapshot_id FROM snapshots WHERE tenant_id = ?1 AND timestamp_end < ?2)",
            params![tenant_id, cutoff.clone()],
        )
        .await
        .map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM snapshots WHERE tenant_id = ?1 AND timestamp_end < ?2",
            params![tenant_id, cutoff],
        )
        .await
        .map_err(StoreError::from)?;
        tx.commit().await.map_err(StoreError::from)?;

        Ok(stale_ids.len() as u64)
    }

    async fn latest_ids(&self, tenant: &TenantContext, limit: u32) -> StoreResult<Vec<String>> {
        let conn = self.client.connection()?;
        let scope = tenant.read_scope()?;

        let mut rows = match scope {
            Some(tenant_id) => conn
                .query(
                    "SELECT snapshot_id FROM snapshots WHERE tenant_id = ?1 ORDER BY timestamp_start DESC, snapshot_id ASC LIMIT ?2",
                    params![tenant_id.to_string(), limit as i64],
                )
                .await
                .map_err(StoreError::from)?,
            None => conn
                .query(
                    "SELECT snapshot_id FROM snapshots ORDER BY timestamp_start DESC, snapshot_id ASC LIMIT ?1",
                    params![limit as i64],
                )
                .await
                .map_err(StoreError::from)?,
        };

        let mut ids = Vec::new();
        while let Some(row) = rows.next().await.map_err(StoreError::from)? {
            ids.push(row.get::<String>(0).map_err(StoreError::from)?);
        }
        Ok(ids)
    }

    async fn load_one(&self, conn: &Connection, tenant: &TenantContext, snapshot_id: &str) -> StoreResult<Snapshot> {
        let scope = tenant.read_scope()?;

        let header = match scope {
            Some(tenant_id) => {
                conn.query(
                    "SELECT timestamp_start, timestamp_end FROM snapshots WHERE tenant_id = ?1 AND snapshot_id = ?2",
                    params![tenant_id.to_string(), snapshot_id.to_string()],
                )
                .await
            }
            None => {
                conn.query(
                    "SELECT timestamp_start, timestamp_end FROM snapshots WHERE snapshot_id = ?1",
                    params![snapshot_id.to_string()],
                )
                .await
            }
        }
        .map_err(StoreError::from)?
        .next()
        .await
        .map_err(StoreError::from)?;

        let header = header.ok_or_else(|| StoreError::NotFound(format!("snapshot '{snapshot_id}' not found")))?;
        let start: String = header.get(0).map_err(StoreError::from)?;
        let end: String = header.get(1).map_err(StoreError::from)?;
        let timestamp_start = parse_rfc3339(&start)?;
        let timestamp_end = parse_rfc3339(&end)?;

        let nodes = self.load_nodes(conn, scope, snapshot_id).await?;
        let edges = self.load_edges(conn, scope, snapshot_id).await?;

        Snapshot::new(snapshot_id, timestamp_start, timestamp_end, nodes, edges).map_err(StoreError::from)
    }

    async fn load_nodes(&self, conn: &Connection, scope: Option<&str>, snapshot_id: &str) -> StoreResult<Vec<Node>> {
        let mut rows = match scope {
            Some(tenant_id) => conn
                .query(
                    "SELECT name, namespace, node_type FROM nodes WHERE tenant_id = ?1 AND snapshot_id = ?2",
                    params![tenant_id.to_string(), snapshot_id.to_string()],
                )
                .await
                .map_err(StoreError::from)?,
            None => conn
                .query(
                    "SELECT name, namespace, node_type FROM nodes WHERE snapshot_id = ?1",
                    params![snapshot_id.to_string()],
                )
                .await
                .map_err(StoreError::from)?,
        };

        let mut nodes = Vec::new();
        while let Some(row) = rows.next().await.map_err(StoreError::from)? {
            let name: String = row.get(0).map_err(StoreError::from)?;
            let namespace: String = row.get(1).map_err(StoreError::from)?;
            let node_type_raw: String = row.get(2).map_err(StoreError::from)?;
            let node_type: NodeType = node_type_raw.parse().map_err(StoreError::from)?;
            nodes.push(Node::new(name, Some(namespace), Some(node_type)).map_err(StoreError::from)?);
        }
        Ok(nodes)
    }

    async fn load_edges(&self, conn: &Connection, scope: Option<&str>, snapshot_id: &str) -> StoreResult<Vec<Edge>> {
        let mut rows = match scope {
            Some(tenant_id) => conn
                .query(
                    "SELECT source, destination, request_count, error_count, avg_latency_ms, p99_latency_ms \
                     FROM edges WHERE tenant_id = ?1 AND snapshot_id = ?2",
                    params![tenant_id.to_string(), snapshot_id.to_string()],
                )
                .await
                .map_err(StoreError::from)?,
            None => conn
                .query(
                    "SELECT source, destination, request_count, error_count, avg_latency_ms, p99_latency_ms \
                     FROM edges WHERE snapshot_id = ?1",
                    params![snapshot_id.to_string()],
                )
                .await
                .map_err(StoreError::from)?,
        };

        let mut edges = Vec::new();
        while let Some(row) = rows.next().await.map_err(StoreError::from)? {
            let source: String = row.get(0).map_err(StoreError::from)?;
            let destination: String = row.get(1).map_err(StoreError::from)?;
            let request_count: i64 = row.get(2).map_err(StoreError::from)?;
            let error_count: i64 = row.get(3).map_err(StoreError::from)?;
            let avg_latency_ms: f64 = row.get(4).map_err(StoreError::from)?;
            let p99_latency_ms: f64 = row.get(5).map_err(StoreError::from)?;
            edges.push(
                Edge::new(
                    source,
                    destination,
                    request_count as u64,
                    error_count as u64,
                    avg_latency_ms,
                    p99_latency_ms,
                )
                .map_err(StoreError::from)?,
            );
        }
        Ok(edges)
    }
}

fn parse_rfc3339(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Unavailable(format!("corrupt timestamp '{value}': {e}")))
}
