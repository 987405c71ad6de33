// [libs/domain/snapshot-builder/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SNAPSHOT BUILDER (C3)
 * CLASIFICACIÓN: PURE DOMAIN FUNCTION (ESTRATO L2)
 * RESPONSABILIDAD: FOLDING DE REGISTROS CRUDOS EN UN SNAPSHOT INMUTABLE
 * =================================================================
 */

pub mod builder;
pub mod percentile;

pub use builder::{build_snapshot, BuildOptions, RecordBatch};
pub use percentile::p99_nearest_rank;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use meshdrift_core_graph_model::NodeType;
    use meshdrift_core_integration_facade::RequestRecord;

    use super::*;

    fn ts(offset_secs: i64) -> DateTime<Utc> {
        "2026-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap() + chrono::Duration::seconds(offset_secs)
    }

    #[test]
    fn empty_batch_yields_empty_snapshot() {
        let batch = RecordBatch::from_unordered(Vec::new());
        let snap = build_snapshot("s1", &batch, ts(0), ts(3600), &BuildOptions::new()).unwrap();
        assert_eq!(snap.edge_count(), 0);
        assert!(snap.nodes().is_empty());
    }

    #[test]
    fn drops_records_outside_window() {
        let records = vec![
            RequestRecord::new(ts(-10), "a", "b", 200, 10.0), // before window
            RequestRecord::new(ts(10), "a", "b", 200, 20.0),
        ];
        let batch = RecordBatch::from_unordered(records);
        let snap = build_snapshot("s1", &batch, ts(0), ts(3600), &BuildOptions::new()).unwrap();
        let edge = snap.get_edge(&("a".into(), "b".into())).unwrap();
        assert_eq!(edge.request_count, 1);
    }

    #[test]
    fn groups_and_aggregates_by_edge() {
        let records = vec![
            RequestRecord::new(ts(1), "order-svc", "payments-db", 200, 10.0),
            RequestRecord::new(ts(2), "order-svc", "payments-db", 500, 20.0),
            RequestRecord::new(ts(3), "order-svc", "payments-db", 404, 30.0),
        ];
        let batch = RecordBatch::from_unordered(records);
        let snap = build_snapshot("s1", &batch, ts(0), ts(3600), &BuildOptions::new()).unwrap();
        let edge = snap
            .get_edge(&("order-svc".into(), "payments-db".into()))
            .unwrap();
        assert_eq!(edge.request_count, 3);
        // only 5xx counts as error — the 404 does not.
        assert_eq!(edge.error_count, 1);
        assert_eq!(edge.avg_latency_ms, 20.0);
    }

    #[test]
    fn infers_node_type_and_respects_override() {
        let records = vec![
            RequestRecord::new(ts(1), "order-svc", "payments-db", 200, 10.0),
            RequestRecord::new(ts(1), "api-gateway", "order-svc", 200, 5.0),
        ];
        let batch = RecordBatch::from_unordered(records);
        let options = BuildOptions::new().with_override("payments-db", NodeType::Service);
        let snap = build_snapshot("s1", &batch, ts(0), ts(3600), &options).unwrap();

        let gw = snap.nodes().iter().find(|n| n.name == "api-gateway").unwrap();
        assert_eq!(gw.node_type, NodeType::Gateway);

        let overridden = snap.nodes().iter().find(|n| n.name == "payments-db").unwrap();
        assert_eq!(overridden.node_type, NodeType::Service);
    }

    #[test]
    fn result_is_insensitive_to_input_order() {
        let forward = vec![
            RequestRecord::new(ts(1), "a", "b", 200, 10.0),
            RequestRecord::new(ts(2), "c", "d", 200, 20.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let options = BuildOptions::new();
        let snap_a = build_snapshot(
            "s1",
            &RecordBatch::from_unordered(forward),
            ts(0),
            ts(3600),
            &options,
        )
        .unwrap();
        let snap_b = build_snapshot(
            "s1",
            &RecordBatch::from_unordered(reversed),
            ts(0),
            ts(3600),
            &options,
        )
        .unwrap();

        let edges_a: Vec<_> = snap_a.edges().cloned().collect();
        let edges_b: Vec<_> = snap_b.edges().cloned().collect();
        assert_eq!(edges_a, edges_b);
    }
}
