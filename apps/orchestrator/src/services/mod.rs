// [apps/orchestrator/src/services/mod.rs]
//! Cableado de los daemons perpetuos del proceso: tres consumidores de
//! cola (uno por `TaskKind`) y tres cron (horario, retención diaria,
//! refresco de baseline cada 30 min) — ver §4.11.

pub mod consumers;
pub mod cron;
