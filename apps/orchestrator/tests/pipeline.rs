// [apps/orchestrator/tests/pipeline.rs]
//! Ejercita la cadena `detect_drift_task -> send_notifications_task`
//! de punta a punta contra bases `libsql` en memoria: dos snapshots
//! consecutivos con una arista nueva hacia un destino sensible deben
//! producir una card crítica, encolarla hacia notificaciones, y
//! entregarla a un sink de prueba.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meshdrift_core_graph_model::{Edge, ExplainCard, Node, Snapshot, TenantContext};
use meshdrift_core_integration_facade::{
    Ack, EmptyIngestor, FacadeResult, LoggingPublisher, NoPolicyRenderer, Notifier,
};
use meshdrift_domain_risk_engine::RiskEngineConfig;
use meshdrift_infra_memory_store::{LibsqlFeedbackStore, LibsqlProfileStore, MemoryStoreClient};
use meshdrift_infra_snapshot_store::{SnapshotRepository, SnapshotStoreClient};
use meshdrift_infra_task_queue::{TaskBroker, TaskEnvelope, TaskKind};
use meshdrift_orchestrator::config::TenantSource;
use meshdrift_orchestrator::state::CoreServices;
use meshdrift_orchestrator::tasks::detect_drift::detect_drift_task;
use meshdrift_orchestrator::tasks::send_notifications::send_notifications_task;

struct RecordingNotifier {
    name: String,
    received: Arc<Mutex<Vec<ExplainCard>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn sink_name(&self) -> &str {
        &self.name
    }

    async fn send(&self, card: &ExplainCard) -> FacadeResult<Ack> {
        self.received.lock().unwrap().push(card.clone());
        Ok(Ack {
            sink_name: self.name.clone(),
            delivered: true,
        })
    }
}

fn ts(hour: i64) -> DateTime<Utc> {
    "2026-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap() + chrono::Duration::hours(hour)
}

async fn test_services(received: Arc<Mutex<Vec<ExplainCard>>>) -> CoreServices {
    let snapshot_client = SnapshotStoreClient::connect(":memory:", None).await.unwrap();
    let memory_client = MemoryStoreClient::connect(":memory:", None).await.unwrap();

    let mut risk_engine = RiskEngineConfig::default();
    risk_engine
        .db_owners
        .insert("payments-db".to_string(), "payments-svc".to_string());

    CoreServices {
        snapshots: Arc::new(SnapshotRepository::new(snapshot_client)),
        profiles: Arc::new(LibsqlProfileStore::new(memory_client.clone())),
        feedback: Arc::new(LibsqlFeedbackStore::new(memory_client)),
        ingestor: Arc::new(EmptyIngestor),
        notifiers: Arc::new(vec![Arc::new(RecordingNotifier {
            name: "test-sink".to_string(),
            received,
        })]),
        policy_renderer: Arc::new(NoPolicyRenderer),
        publisher: Arc::new(LoggingPublisher),
        broker: Arc::new(TaskBroker::new()),
        risk_engine: Arc::new(risk_engine),
        tenants: Arc::new(vec![TenantSource {
            tenant_id: "acme".to_string(),
            source_ref: "k8s-prod".to_string(),
        }]),
        retention_days: 90,
    }
}

#[tokio::test]
async fn new_edge_to_sensitive_db_chains_into_a_delivered_notification() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let services = test_services(received.clone()).await;
    let tenant = TenantContext::for_tenant("acme");

    let baseline_nodes = vec![Node::new("order-svc", None, None).unwrap()];
    let baseline = Snapshot::new("baseline", ts(0), ts(1), baseline_nodes, Vec::new()).unwrap();
    services.snapshots.save(&tenant, &baseline).await.unwrap();

    let current_nodes = vec![
        Node::new("order-svc", None, None).unwrap(),
        Node::new("payments-db", None, None).unwrap(),
    ];
    let current_edges = vec![Edge::new("order-svc", "payments-db", 40, 0, 12.0, 30.0).unwrap()];
    let current = Snapshot::new("current", ts(1), ts(2), current_nodes, current_edges).unwrap();
    services.snapshots.save(&tenant, ¤t).await.unwrap();

    let mut receiver = services.broker.take_receiver(TaskKind::SendNotifications).await.unwrap();

    let detect_envelope = TaskEnvelope::new(TaskKind::DetectDrift, "acme", serde_json::json!({}));
    detect_drift_task(services.clone(), detect_envelope).await.unwrap();

    let notify_envelope = receiver
        .try_recv()
        .expect("detect_drift_task should have chained a send_notifications envelope");
    assert_eq!(notify_envelope.kind, TaskKind::SendNotifications);

    send_notifications_task(services, notify_envelope).await.unwrap();

    let delivered = received.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].source, "order-svc");
    assert_eq!(delivered[0].destination, "payments-db");
    assert!(delivered[0].severity.is_actionable());
}

#[tokio::test]
async fn identical_snapshots_produce_no_notification() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let services = test_services(received.clone()).await;
    let tenant = TenantContext::for_tenant("acme");

    let nodes = vec![Node::new("order-svc", None, None).unwrap()];
    let snap_a = Snapshot::new("a", ts(0), ts(1), nodes.clone(), Vec::new()).unwrap();
    let snap_b = Snapshot::new("b", ts(1), ts(2), nodes, Vec::new()).unwrap();
    services.snapshots.save(&tenant, &snap_a).await.unwrap();
    services.snapshots.save(&tenant, &snap_b).await.unwrap();

    let mut receiver = services.broker.take_receiver(TaskKind::SendNotifications).await.unwrap();

    let detect_envelope = TaskEnvelope::new(TaskKind::DetectDrift, "acme", serde_json::json!({}));
    detect_drift_task(services, detect_envelope).await.unwrap();

    assert!(receiver.try_recv().is_err());
}
