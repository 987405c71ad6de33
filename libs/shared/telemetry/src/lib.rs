/*!
 * =================================================================
 * APARATO: STRUCTURED TELEMETRY
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: INICIALIZACIÓN DE TRACING Y CAPTURA DE PÁNICOS
 *
 * Único punto del workspace que llama `tracing_subscriber::registry().init()`
 * — `apps/orchestrator::main` lo invoca una vez al arrancar.
 * =================================================================
 */

use std::panic;

use tracing::{error, info, instrument};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Inicializa trazado estructurado y un panic hook que reenvía el
/// pánico al subscriber activo antes de que el proceso termine.
///
/// Desarrollo: salida compacta y legible. Producción (`!cfg!(debug_assertions)`):
/// JSON plano, apto para ingesta por un colector de logs.
///
/// # Panics
/// Entra en pánico si otro subscriber global ya fue inicializado en
/// este proceso.
#[instrument(skip_all)]
pub fn init_tracing(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},tower_http=warn,hyper=warn,libsql=warn",
            service_name,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    let is_production = !cfg!(debug_assertions);

    if is_production {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    }

    let service_id = service_name.to_string();
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("<non-string panic payload>");

        error!(
            target: "panic",
            service = %service_id,
            location = %location,
            "🔥 [PANIC]: thread terminated: {}",
            payload
        );
    }));

    info!("👁️  [TELEMETRY]: tracing initialized for [{}]", service_name);
}
