// [apps/orchestrator/src/config.rs]
//! Configuración del orquestador (§6 "Configuration"): todo lo que el
//! proceso necesita para arrancar viene del entorno — ningún valor se
//! hardcodea más allá de los defaults ya documentados en
//! `meshdrift_domain_risk_engine::RiskEngineConfig`.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use meshdrift_domain_risk_engine::RiskEngineConfig;

/// Un tenant concreto más el `source_ref` que su `Ingestor` usa para
/// saber qué cortar de la fuente de logs (§4.3, §4.11).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSource {
    pub tenant_id: String,
    pub source_ref: String,
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub snapshot_db_url: String,
    pub snapshot_db_token: Option<String>,
    pub memory_db_url: String,
    pub memory_db_token: Option<String>,
    pub port: u16,
    pub retention_days: i64,
    pub tenants: Vec<TenantSource>,
    pub risk_engine: RiskEngineConfig,
}

impl OrchestratorConfig {
    /// Lee la configuración completa del entorno de proceso. `.env` ya
    /// debe estar cargado por el binario antes de llamar a esto
    /// (`dotenvy::dotenv()`, ver `main.rs`).
    pub fn from_env() -> Result<Self> {
        let snapshot_db_url = std::env::var("SNAPSHOT_DATABASE_URL")
            .context("SNAPSHOT_DATABASE_URL must be set")?;
        let snapshot_db_token = std::env::var("SNAPSHOT_DATABASE_TOKEN").ok();

        let memory_db_url = std::env::var("MEMORY_DATABASE_URL")
            .context("MEMORY_DATABASE_URL must be set")?;
        let memory_db_token = std::env::var("MEMORY_DATABASE_TOKEN").ok();

        let port: u16 = env_or("PORT", "8080").parse().context("PORT must be a u16")?;
        let retention_days: i64 = env_or("RETENTION_DAYS", "90")
            .parse()
            .context("RETENTION_DAYS must be an integer")?;

        let tenants = parse_tenant_sources(&env_or("TENANT_SOURCES", ""))?;

        let mut risk_engine = RiskEngineConfig::default();
        if let Ok(raw) = std::env::var("SENSITIVE_SERVICES") {
            risk_engine.sensitive_services = parse_set(&raw);
        }
        if let Ok(raw) = std::env::var("GATEWAYS") {
            risk_engine.gateways = parse_set(&raw);
        }
        if let Ok(raw) = std::env::var("BASELINE_WINDOW_SIZE") {
            risk_engine.baseline_window_size = raw.parse().context("BASELINE_WINDOW_SIZE must be a u32")?;
        }

        Ok(OrchestratorConfig {
            snapshot_db_url,
            snapshot_db_token,
            memory_db_url,
            memory_db_token,
            port,
            retention_days,
            tenants,
            risk_engine,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// `TENANT_SOURCES` es una lista `tenant_id=source_ref` separada por
/// comas, p.ej. `acme=k8s-prod-1,globex=k8s-prod-2`. Vacío es válido —
/// un despliegue sin tenants registrados simplemente no tiene nada que
/// el cron horario dispare.
fn parse_tenant_sources(raw: &str) -> Result<Vec<TenantSource>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (tenant_id, source_ref) = pair
                .split_once('=')
                .with_context(|| format!("TENANT_SOURCES entry '{pair}' must be 'tenant_id=source_ref'"))?;
            Ok(TenantSource {
                tenant_id: tenant_id.to_string(),
                source_ref: source_ref.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_tenant_sources() {
        let tenants = parse_tenant_sources("acme=k8s-1, globex=k8s-2").unwrap();
        assert_eq!(
            tenants,
            vec![
                TenantSource {
                    tenant_id: "acme".to_string(),
                    source_ref: "k8s-1".to_string(),
                },
                TenantSource {
                    tenant_id: "globex".to_string(),
                    source_ref: "k8s-2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_tenant_sources_is_valid() {
        assert!(parse_tenant_sources("").unwrap().is_empty());
    }

    #[test]
    fn malformed_entry_is_rejected() {
        assert!(parse_tenant_sources("acme").is_err());
    }
}
