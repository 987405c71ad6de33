// [apps/orchestrator/src/tasks/build_snapshot.rs]
//! `build_snapshot_task` (§4.11): tira del `Ingestor` registrado para el
//! tenant, pliega el lote en un `Snapshot` vía C3, lo guarda (C2) y
//! encola `detect_drift_task` para la misma ventana.

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::TenantContext;
use meshdrift_domain_snapshot_builder::{build_snapshot, BuildOptions, RecordBatch};
use meshdrift_infra_task_queue::{TaskEnvelope, TaskError, TaskKind, TaskResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::state::CoreServices;
use crate::tasks::{from_core, from_facade, from_snapshot_store};

#[derive(Debug, Serialize, Deserialize)]
struct Args {
    source_ref: String,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
}

pub async fn build_snapshot_task(services: CoreServices, envelope: TaskEnvelope) -> TaskResult<()> {
    let args: Args = serde_json::from_value(envelope.args.clone())
        .map_err(|e| TaskError::Failed(format!("malformed build_snapshot args: {e}")))?;

    let tenant = TenantContext::for_tenant(envelope.tenant_id.clone());

    let records = services
        .ingestor
        .fetch_records(&args.source_ref)
        .await
        .map_err(from_facade)?;

    let batch = RecordBatch::from_unordered(records);
    let snapshot_id = format!("{}-{}", args.window_start.to_rfc3339(), Uuid::new_v4());
    let snapshot = build_snapshot(&snapshot_id, &batch, args.window_start, args.window_end, &BuildOptions::new())
        .map_err(from_core)?;

    info!(
        tenant = %envelope.tenant_id,
        snapshot_id = %snapshot.snapshot_id,
        edges = snapshot.edge_count(),
        "📸 [BUILD_SNAPSHOT]: folded batch into snapshot"
    );

    services.snapshots.save(&tenant, &snapshot).await.map_err(from_snapshot_store)?;

    let coalesce_key = format!("{}:{}", envelope.tenant_id, args.window_start.to_rfc3339());
    let detect_envelope = TaskEnvelope::new(TaskKind::DetectDrift, envelope.tenant_id.clone(), serde_json::json!({}))
        .with_coalesce_key(coalesce_key);

    services.broker.enqueue(detect_envelope).await?;

    Ok(())
}
