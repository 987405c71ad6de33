// [libs/infra/snapshot-store/src/schema.rs]
/*!
 * =================================================================
 * APARATO: SNAPSHOT STORE SCHEMA (C2)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TABLAS `snapshots`/`nodes`/`edges`, IDEMPOTENTES
 *
 * Cascada lógica snapshot -> nodes/edges aplicada a mano en
 * `repository::save`/`delete` (libsql no impone FKs ON DELETE CASCADE de
 * forma fiable entre backends local/remoto), pero el índice compuesto
 * `(tenant_id, snapshot_id)` mantiene la búsqueda O(log n) de cualquier
 * forma.
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

const TABLES: &[(&str, &str)] = &[
    (
        "TABLE_SNAPSHOTS",
        r#"
        CREATE TABLE IF NOT EXISTS snapshots (
            tenant_id TEXT NOT NULL,
            snapshot_id TEXT NOT NULL,
            timestamp_start TEXT NOT NULL,
            timestamp_end TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (tenant_id, snapshot_id)
        );
    "#,
    ),
    (
        "TABLE_NODES",
        r#"
        CREATE TABLE IF NOT EXISTS nodes (
            tenant_id TEXT NOT NULL,
            snapshot_id TEXT NOT NULL,
            name TEXT NOT NULL,
            namespace TEXT NOT NULL,
            node_type TEXT NOT NULL,
            PRIMARY KEY (tenant_id, snapshot_id, name, namespace)
        );
    "#,
    ),
    (
        "TABLE_EDGES",
        r#"
        CREATE TABLE IF NOT EXISTS edges (
            tenant_id TEXT NOT NULL,
            snapshot_id TEXT NOT NULL,
            source TEXT NOT NULL,
            destination TEXT NOT NULL,
            request_count INTEGER NOT NULL,
            error_count INTEGER NOT NULL,
            avg_latency_ms REAL NOT NULL,
            p99_latency_ms REAL NOT NULL,
            PRIMARY KEY (tenant_id, snapshot_id, source, destination)
        );
    "#,
    ),
];

const INDEXES: &[(&str, &str)] = &[(
    "IDX_SNAPSHOTS_TENANT_START",
    "CREATE INDEX IF NOT EXISTS idx_snapshots_tenant_start ON snapshots(tenant_id, timestamp_start);",
)];

/// Aplica el esquema de C2 de forma idempotente sobre `connection`.
#[instrument(skip(connection))]
pub async fn apply_schema(connection: &Connection) -> Result<()> {
    info!("🏗️  [SNAPSHOT_SCHEMA]: syncing snapshots/nodes/edges tables");

    for (name, sql) in TABLES {
        debug!("  ↳ {}", name);
        connection
            .execute(sql, ())
            .await
            .with_context(|| format!("failed to create table {name}"))?;
    }

    for (name, sql) in INDEXES {
        debug!("  ↳ {}", name);
        connection
            .execute(sql, ())
            .await
            .with_context(|| format!("failed to create index {name}"))?;
    }

    Ok(())
}
