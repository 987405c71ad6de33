// [libs/core/graph-model/src/tenant.rs]
//! Contexto de tenant (C14): el único canal por el que `tenant_id` viaja a
//! través de cada operación del núcleo. Ninguna otra capa mantiene estado
//! de proceso global — ver "Global stores → explicit registries" (spec §9).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Identidad de quien invoca una operación del núcleo.
///
/// Una escritura con `tenant_id = None` se rechaza siempre
/// (`require_write_tenant`). Una lectura con `tenant_id = None` solo se
/// permite cuando `is_super_admin` es `true` — y aun así las
/// implementaciones de `snapshot-store`/`memory-store` deben evitar
/// oráculos de existencia: un super-admin que filtra por un tenant
/// inexistente recibe `not_found`, igual que cualquier otro caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    tenant_id: Option<String>,
    is_super_admin: bool,
    pub user_id: Option<String>,
    pub request_id: Option<String>,
}

impl TenantContext {
    pub fn for_tenant(tenant_id: impl Into<String>) -> Self {
        TenantContext {
            tenant_id: Some(tenant_id.into()),
            is_super_admin: false,
            user_id: None,
            request_id: None,
        }
    }

    pub fn super_admin() -> Self {
        TenantContext {
            tenant_id: None,
            is_super_admin: true,
            user_id: None,
            request_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn is_super_admin(&self) -> bool {
        self.is_super_admin
    }

    /// Exige un tenant concreto para una operación de escritura.
    pub fn require_write_tenant(&self) -> CoreResult<&str> {
        self.tenant_id
            .as_deref()
            .ok_or_else(|| CoreError::invalid("writes require a concrete tenant_id"))
    }

    /// Resuelve el filtro de tenant a aplicar en una lectura: `Some(id)`
    /// restringe a ese tenant; `None` solo se concede a un super-admin y
    /// significa "sin filtro de tenant" (uso interno de auditoría/retención).
    pub fn read_scope(&self) -> CoreResult<Option<&str>> {
        match (&self.tenant_id, self.is_super_admin) {
            (Some(id), _) => Ok(Some(id.as_str())),
            (None, true) => Ok(None),
            (None, false) => Err(CoreError::invalid(
                "reads with no tenant_id require super-admin",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_tenant() {
        assert!(TenantContext::super_admin().require_write_tenant().is_err());
        assert_eq!(
            TenantContext::for_tenant("acme")
                .require_write_tenant()
                .unwrap(),
            "acme"
        );
    }

    #[test]
    fn non_admin_cannot_read_without_tenant() {
        assert!(TenantContext::super_admin().read_scope().is_ok());
        let ctx = TenantContext {
            tenant_id: None,
            is_super_admin: false,
            user_id: None,
            request_id: None,
        };
        assert!(ctx.read_scope().is_err());
    }
}
