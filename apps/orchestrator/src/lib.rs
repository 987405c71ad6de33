// [apps/orchestrator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR (C12 APPLICATION SHELL)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: CABLEAR C1-C11/C13 SOBRE LA PRIMITIVA DE TAREAS C12
 *
 * Este crate no introduce nueva lógica de dominio: compone los cuerpos
 * de tarea (`tasks::*`) sobre los contratos puros/IO ya definidos en
 * `meshdrift-domain-*` y `meshdrift-infra-*`, corre el cron fijo de
 * §4.11, y expone una superficie de salud mínima.
 * =================================================================
 */

pub mod config;
pub mod health;
pub mod services;
pub mod state;
pub mod tasks;

pub use config::OrchestratorConfig;
pub use state::CoreServices;
