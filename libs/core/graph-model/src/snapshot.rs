// [libs/core/graph-model/src/snapshot.rs]
//! Snapshot: observación inmutable del call-graph sobre una ventana `[start, end)`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::edge::{Edge, EdgeKey};
use crate::error::{CoreError, CoreResult};
use crate::node::Node;

/// Agregado inmutable una vez guardado (§3). `nodes`/`edges` se exponen
/// ordenados (`BTreeMap`/`Vec` ordenado) para que toda iteración aguas
/// abajo sea determinista — condición necesaria para la Propiedad
/// Testable #4 (`diff` insensible al orden).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snapshot_id: String,
    pub timestamp_start: DateTime<Utc>,
    pub timestamp_end: DateTime<Utc>,
    nodes: Vec<Node>,
    edges: BTreeMap<EdgeKey, Edge>,
}

impl Snapshot {
    pub fn new(
        snapshot_id: impl Into<String>,
        timestamp_start: DateTime<Utc>,
        timestamp_end: DateTime<Utc>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> CoreResult<Self> {
        let snapshot_id = snapshot_id.into();
        if snapshot_id.trim().is_empty() {
            return Err(CoreError::invalid("Snapshot.snapshot_id must not be empty"));
        }
        if timestamp_start > timestamp_end {
            return Err(CoreError::invalid(
                "Snapshot.timestamp_start must be <= timestamp_end",
            ));
        }

        let node_names: BTreeSet<&str> = nodes.iter().map(|n| n.name.as_str()).collect();

        let mut edge_map: BTreeMap<EdgeKey, Edge> = BTreeMap::new();
        for edge in edges {
            if !node_names.contains(edge.source.as_str()) {
                return Err(CoreError::invalid(format!(
                    "edge source '{}' does not appear in snapshot nodes",
                    edge.source
                )));
            }
            if !node_names.contains(edge.destination.as_str()) {
                return Err(CoreError::invalid(format!(
                    "edge destination '{}' does not appear in snapshot nodes",
                    edge.destination
                )));
            }
            let key = edge.edge_key();
            if edge_map.insert(key.clone(), edge).is_some() {
                return Err(CoreError::invalid(format!(
                    "duplicate edge key ({}, {}) within snapshot",
                    key.0, key.1
                )));
            }
        }

        let mut nodes = nodes;
        nodes.sort_by(|a, b| a.name.cmp(&b.name).then(a.namespace.cmp(&b.namespace)));
        nodes.dedup();

        Ok(Snapshot {
            snapshot_id,
            timestamp_start,
            timestamp_end,
            nodes,
            edges: edge_map,
        })
    }

    /// Construye un snapshot vacío cubriendo la ventana dada — un
    /// batch de registros vacío no es un error (§4.2).
    pub fn empty(snapshot_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        Self::new(snapshot_id, start, end, Vec::new(), Vec::new())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Aristas ordenadas lexicográficamente por `(source, destination)`.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn get_edge(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    /// Número de aristas salientes por `source` — usado por C4 (blast radius).
    pub fn outgoing_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (source, _) in self.edges.keys() {
            *counts.entry(source.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    fn ts(hour: u32) -> DateTime<Utc> {
        "2026-01-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .unwrap()
            + chrono::Duration::hours(hour as i64)
    }

    #[test]
    fn rejects_edge_with_dangling_endpoint() {
        let nodes = vec![Node::new("a", None, Some(NodeType::Service)).unwrap()];
        let edges = vec![Edge::new("a", "b", 1, 0, 1.0, 1.0).unwrap()];
        assert!(Snapshot::new("s1", ts(0), ts(1), nodes, edges).is_err());
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(Snapshot::empty("s1", ts(1), ts(0)).is_err());
    }

    #[test]
    fn rejects_duplicate_edge_key() {
        let nodes = vec![
            Node::new("a", None, Some(NodeType::Service)).unwrap(),
            Node::new("b", None, Some(NodeType::Service)).unwrap(),
        ];
        let edges = vec![
            Edge::new("a", "b", 1, 0, 1.0, 1.0).unwrap(),
            Edge::new("a", "b", 2, 0, 1.0, 1.0).unwrap(),
        ];
        assert!(Snapshot::new("s1", ts(0), ts(1), nodes, edges).is_err());
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snap = Snapshot::empty("s1", ts(0), ts(1)).unwrap();
        assert_eq!(snap.edge_count(), 0);
        assert!(snap.nodes().is_empty());
    }
}
