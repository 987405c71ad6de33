// [libs/domain/snapshot-builder/src/builder.rs]
//! Folding de un lote de `RequestRecord` en un `Snapshot` inmutable (C3).

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::{CoreResult, Edge, Node, NodeType, Snapshot};
use meshdrift_core_integration_facade::RequestRecord;

use crate::percentile::{mean, p99_nearest_rank, round_2};

/// Envoltura de un lote de registros de entrada. El nombre documenta la
/// garantía de la API: el caller NO necesita pre-ordenar los registros —
/// `build_snapshot` agrupa con un `HashMap` y solo ordena al emitir, así
/// el resultado es insensible al orden de llegada (Propiedad Testable #4).
#[derive(Debug, Clone, Default)]
pub struct RecordBatch(Vec<RequestRecord>);

impl RecordBatch {
    pub fn from_unordered(records: Vec<RequestRecord>) -> Self {
        RecordBatch(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<RequestRecord>> for RecordBatch {
    fn from(records: Vec<RequestRecord>) -> Self {
        RecordBatch::from_unordered(records)
    }
}

/// Overrides opcionales de `node_type` por nombre de servicio — un
/// `Ingestor` con mejor información de catálogo los usa en vez de dejar
/// que el builder infiera desde el nombre (§4.2, SPEC_FULL §3 supplement).
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub node_type_overrides: HashMap<String, NodeType>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, name: impl Into<String>, node_type: NodeType) -> Self {
        self.node_type_overrides.insert(name.into(), node_type);
        self
    }

    fn resolve(&self, name: &str) -> NodeType {
        self.node_type_overrides
            .get(name)
            .copied()
            .unwrap_or_else(|| NodeType::infer_from_name(name))
    }
}

/// Construye un `Snapshot` a partir de `records` restringidos a
/// `[start, end)`. Un lote vacío produce un snapshot vacío — no un error
/// (§4.2).
pub fn build_snapshot(
    snapshot_id: impl Into<String>,
    records: &RecordBatch,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    options: &BuildOptions,
) -> CoreResult<Snapshot> {
    // 1. Descarta registros fuera de la ventana.
    let in_window: Vec<&RequestRecord> = records
        .0
        .iter()
        .filter(|r| r.is_within_window(start, end))
        .collect();

    // 2. Agrupa por (source, destination).
    let mut groups: HashMap<(String, String), Vec<&RequestRecord>> = HashMap::new();
    for record in &in_window {
        groups
            .entry((record.source.clone(), record.destination.clone()))
            .or_default()
            .push(record);
    }

    // 3. Conjunto de nombres de nodo observados.
    let mut node_names: HashSet<String> = HashSet::new();
    for (source, destination) in groups.keys() {
        node_names.insert(source.clone());
        node_names.insert(destination.clone());
    }

    let mut node_names: Vec<String> = node_names.into_iter().collect();
    node_names.sort();

    let nodes: Vec<Node> = node_names
        .iter()
        .map(|name| Node::new(name.clone(), None, Some(options.resolve(name))))
        .collect::<CoreResult<Vec<_>>>()?;

    // 4. Construye las aristas.
    let mut keys: Vec<(String, String)> = groups.keys().cloned().collect();
    keys.sort();

    let edges: Vec<Edge> = keys
        .into_iter()
        .map(|key| {
            let recs = &groups[&key];
            let latencies: Vec<f64> = recs.iter().map(|r| r.latency_ms).collect();
            let request_count = recs.len() as u64;
            let error_count = recs.iter().filter(|r| r.is_error()).count() as u64;
            let avg_latency_ms = round_2(mean(&latencies));
            let p99_latency_ms = round_2(p99_nearest_rank(&latencies));

            Edge::new(
                key.0,
                key.1,
                request_count,
                error_count,
                avg_latency_ms,
                p99_latency_ms,
            )
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Snapshot::new(snapshot_id, start, end, nodes, edges)
}
