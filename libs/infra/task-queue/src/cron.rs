// [libs/infra/task-queue/src/cron.rs]
/*!
 * Bucle de cron perpetuo (§4.11): un `tokio::time::interval` de
 * resolución fija más una comparación contra los campos del schedule
 * objetivo, en vez de una crate de cron-expressions — solo hay tres
 * horarios fijos (`build_snapshot` horario, retención a las 03:00 UTC,
 * refresco de baseline cada 30 min), así que un parser de expresiones
 * completo sería peso muerto. Misma forma que el `spawn_reaper`/
 * `spawn_archival_loop` del teacher: un `tokio::spawn` con un loop que
 * no retorna.
 */

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use tracing::{debug, info};

/// Resolución del tick de verificación. Basta con que sea más fino que
/// el horario más ajustado (cada hora) para no perder un disparo.
pub const CRON_TICK_INTERVAL: Duration = Duration::from_secs(30);

/// Dispara en el minuto `0` de cada hora — `build_snapshot_task`.
pub fn is_hourly_tick(now: DateTime<Utc>) -> bool {
    now.minute() == 0
}

/// Dispara a las 03:00 UTC — barrido de retención.
pub fn is_daily_retention_tick(now: DateTime<Utc>) -> bool {
    now.hour() == 3 && now.minute() == 0
}

/// Dispara cada 30 minutos — refresco de baseline.
pub fn is_baseline_refresh_tick(now: DateTime<Utc>) -> bool {
    now.minute() == 0 || now.minute() == 30
}

/// Lanza un daemon perpetuo que, en cada tick de `CRON_TICK_INTERVAL`,
/// evalúa `is_due` contra la hora actual y, si coincide, ejecuta `body`.
/// `is_due` se re-evalúa cada tick, así que una llamada de `body` que
/// tarda más que el intervalo simplemente pospone el próximo chequeo —
/// no hay solapamiento de ejecuciones del mismo cron.
pub fn spawn_cron_loop<S, B, Fut>(label: &'static str, is_due: S, body: B) -> tokio::task::JoinHandle<()>
where
    S: Fn(DateTime<Utc>) -> bool + Send + 'static,
    B: Fn(DateTime<Utc>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CRON_TICK_INTERVAL);
        info!(cron = label, "⏰ [CRON]: daemon initiated");

        let mut last_fired_at: Option<DateTime<Utc>> = None;

        loop {
            ticker.tick().await;
            let now = Utc::now();

            if !is_due(now) {
                continue;
            }

            // Evita disparar dos veces dentro del mismo minuto objetivo
            // si el tick cae justo en el borde.
            if last_fired_at.map(|t| t.minute() == now.minute() && t.hour() == now.hour()).unwrap_or(false) {
                continue;
            }

            debug!(cron = label, "🔔 [CRON]: schedule matched, firing");
            body(now).await;
            last_fired_at = Some(now);
        }
    })
}
