// [libs/infra/memory-store/src/schema.rs]
/*!
 * =================================================================
 * APARATO: MEMORY STORE SCHEMA (C7/C9)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TABLAS `edge_profiles`/`feedback`/`whitelist`/
 *                  `suppress_rules`, IDEMPOTENTES
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

const TABLES: &[(&str, &str)] = &[
    (
        "TABLE_EDGE_PROFILES",
        r#"
        CREATE TABLE IF NOT EXISTS edge_profiles (
            tenant_id TEXT NOT NULL,
            source TEXT NOT NULL,
            destination TEXT NOT NULL,
            request_count_mean REAL NOT NULL,
            request_count_std REAL NOT NULL,
            error_rate_mean REAL NOT NULL,
            error_rate_std REAL NOT NULL,
            p99_latency_mean REAL NOT NULL,
            p99_latency_std REAL NOT NULL,
            sample_count INTEGER NOT NULL,
            last_updated TEXT NOT NULL,
            PRIMARY KEY (tenant_id, source, destination)
        );
    "#,
    ),
    (
        "TABLE_FEEDBACK",
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            tenant_id TEXT NOT NULL,
            source TEXT NOT NULL,
            destination TEXT NOT NULL,
            event_type TEXT NOT NULL,
            verdict TEXT NOT NULL,
            note TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_WHITELIST",
        r#"
        CREATE TABLE IF NOT EXISTS whitelist (
            tenant_id TEXT NOT NULL,
            source TEXT NOT NULL,
            destination TEXT NOT NULL,
            reason TEXT NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT,
            PRIMARY KEY (tenant_id, source, destination)
        );
    "#,
    ),
    (
        "TABLE_SUPPRESS_RULES",
        r#"
        CREATE TABLE IF NOT EXISTS suppress_rules (
            tenant_id TEXT NOT NULL,
            event_type TEXT NOT NULL,
            service_pattern TEXT NOT NULL,
            reason TEXT NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT,
            PRIMARY KEY (tenant_id, event_type, service_pattern)
        );
    "#,
    ),
];

const INDEXES: &[(&str, &str)] = &[
    (
        "IDX_FEEDBACK_TENANT_EDGE",
        "CREATE INDEX IF NOT EXISTS idx_feedback_tenant_edge ON feedback(tenant_id, source, destination, event_type, created_at);",
    ),
    (
        "IDX_SUPPRESS_RULES_TENANT",
        "CREATE INDEX IF NOT EXISTS idx_suppress_rules_tenant ON suppress_rules(tenant_id);",
    ),
];

/// Aplica el esquema de C7/C9 de forma idempotente sobre `connection`.
#[instrument(skip(connection))]
pub async fn apply_schema(connection: &Connection) -> Result<()> {
    info!("🏗️  [MEMORY_SCHEMA]: syncing edge_profiles/feedback/whitelist/suppress_rules tables");

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
