// [libs/core/graph-model/src/node.rs]
//! Nodo del grafo de malla: un servicio, base de datos o gateway observado.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Clasificación de un `Node`. Inferida heurísticamente por el builder
/// (C3) a partir del nombre, pero un `Ingestor` puede fijarla explícitamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Service,
    Database,
    Gateway,
}

impl NodeType {
    /// Heurística del spec §4.2: `-db` ⇒ database, `gateway` ⇒ gateway,
    /// cualquier otra cosa ⇒ service. Es solo un *hint*; un caller con
    /// mejor información de catálogo puede sobreescribirla.
    pub fn infer_from_name(name: &str) -> Self {
        if name.contains("-db") {
            NodeType::Database
        } else if name.contains("gateway") {
            NodeType::Gateway
        } else {
            NodeType::Service
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Service => "service",
            NodeType::Database => "database",
            NodeType::Gateway => "gateway",
        }
    }
}

impl std::str::FromStr for NodeType {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "service" => Ok(NodeType::Service),
            "database" => Ok(NodeType::Database),
            "gateway" => Ok(NodeType::Gateway),
            other => Err(CoreError::invalid(format!("unknown node_type '{other}'"))),
        }
    }
}

/// Entidad de valor inmutable. Igualdad por los tres campos, tal como
/// exige el spec §3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub namespace: String,
    pub node_type: NodeType,
}

impl Node {
    /// Construye un `Node`, aplicando `namespace = "default"` cuando no se
    /// especifica uno e inferencia de `node_type` cuando no se fuerza.
    pub fn new(
        name: impl Into<String>,
        namespace: Option<String>,
        node_type: Option<NodeType>,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::invalid("Node.name must not be empty"));
        }
        let node_type = node_type.unwrap_or_else(|| NodeType::infer_from_name(&name));
        Ok(Node {
            namespace: namespace.unwrap_or_else(|| "default".to_string()),
            node_type,
            name,
        })
    }

    pub fn inferred(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert!(Node::new("", None, None).is_err());
    }

    #[test]
    fn defaults_namespace_and_infers_type() {
        let n = Node::inferred("payments-db").unwrap();
        assert_eq!(n.namespace, "default");
        assert_eq!(n.node_type, NodeType::Database);
    }

    #[test]
    fn infers_gateway_and_service() {
        assert_eq!(NodeType::infer_from_name("api-gateway"), NodeType::Gateway);
        assert_eq!(NodeType::infer_from_name("order-svc"), NodeType::Service);
    }
}
