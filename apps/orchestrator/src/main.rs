// [apps/orchestrator/src/main.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR MAIN ENTRY POINT
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L4)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA Y PUESTA EN MARCHA
 *
 * Orden de arranque: cargar entorno, iniciar tracing, construir
 * `CoreServices` (ambas bases libsql conectadas), lanzar los tres
 * consumidores de tarea y los tres daemons de cron, servir la
 * superficie de salud. Ningún paso de dominio corre antes de que
 * `CoreServices::bootstrap` confirme que ambas bases respondieron.
 * =================================================================
 */

use dotenvy::dotenv;
use meshdrift_orchestrator::config::OrchestratorConfig;
use meshdrift_orchestrator::state::CoreServices;
use meshdrift_orchestrator::{health, services};
use meshdrift_shared_telemetry::init_tracing;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing("meshdrift_orchestrator");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(run())
}

async fn run() -> anyhow::Result<()> {
    info!("🛰️  [ORCHESTRATOR]: ignition sequence starting");

    let config = OrchestratorConfig::from_env()?;
    let port = config.port;

    let services = match CoreServices::bootstrap(&config).await {
        Ok(services) => services,
        Err(error) => {
            error!(%error, "❌ [ORCHESTRATOR]: failed to connect to stores, aborting");
            return Err(error);
        }
    };

    info!(tenants = services.tenants.len(), "🔌 [ORCHESTRATOR]: stores connected");

    services::consumers::spawn_all(services.clone()).await;
    services::cron::spawn_all(services.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "🌐 [ORCHESTRATOR]: health surface listening");

    axum::serve(listener, health::router(services)).await?;

    Ok(())
}
