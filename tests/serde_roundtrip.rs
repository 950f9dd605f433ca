use egui::Pos2;
use workflow_canvas::{
    ChartKind, ChartPayload, Connection, ConnectionKind, InsightKind, InsightPayload, Node,
    NodePayload, Workflow,
};

fn insight_node(id: &str) -> Node {
    Node::new(
        id,
        Pos2::new(620., 120.),
        NodePayload::Insight(InsightPayload {
            title: "Strong Predictor Found".to_string(),
            description: "Credit Score correlates with approval.".to_string(),
            confidence: 0.94,
            related_features: vec!["feature-credit".to_string()],
            kind: InsightKind::Correlation,
        }),
    )
}

#[test]
fn test_serialize_deserialize_node() {
    let node = insight_node("insight-1");
    let json = serde_json::to_string(&node).expect("serialize node");

    let node2: Node = serde_json::from_str(&json).expect("deserialize node");

    assert_eq!(node2.id(), node.id());
    assert_eq!(node2.position(), node.position());
    assert_eq!(node2.payload(), node.payload());
    assert_eq!(node2.selected(), node.selected());
    assert_eq!(node2.dragged(), node.dragged());
}

#[test]
fn test_node_payload_tag_is_the_kind_string() {
    let node = Node::new(
        "chart-1",
        Pos2::ZERO,
        NodePayload::Chart(ChartPayload {
            title: "Age Distribution".to_string(),
            chart: ChartKind::Histogram,
            feature_ids: vec!["feature-age".to_string()],
            data: Vec::new(),
        }),
    );
    let json = serde_json::to_string(&node).expect("serialize node");
    assert!(json.contains(r#""type":"chart""#));
    assert!(json.contains(r#""chart":"histogram""#));
}

#[test]
fn test_serialize_deserialize_connection() {
    let connection = Connection::new(
        "conn-f2-i1",
        "feature-credit",
        "insight-1",
        ConnectionKind::StrongCorrelation,
    )
    .with_correlation_value(0.87);

    let json = serde_json::to_string(&connection).expect("serialize connection");
    let connection2: Connection = serde_json::from_str(&json).expect("deserialize connection");

    assert_eq!(connection2.id(), connection.id());
    assert_eq!(connection2.source_id(), connection.source_id());
    assert_eq!(connection2.target_id(), connection.target_id());
    assert_eq!(connection2.kind(), connection.kind());
    assert_eq!(connection2.correlation_value, connection.correlation_value);
}

#[test]
fn test_serialize_deserialize_workflow() {
    let mut workflow = Workflow::new();
    workflow.load_sample();
    let selected = workflow.nodes()[0].id().to_string();
    workflow.select_node(&selected);

    let json = serde_json::to_string(&workflow).expect("serialize workflow");
    let workflow2: Workflow = serde_json::from_str(&json).expect("deserialize workflow");

    assert_eq!(workflow2.nodes().len(), workflow.nodes().len());
    assert_eq!(workflow2.connections().len(), workflow.connections().len());
    assert_eq!(workflow2.selection(), workflow.selection());

    for (a, b) in workflow.nodes().iter().zip(workflow2.nodes()) {
        assert_eq!(a.payload(), b.payload());
        assert_eq!(a.position(), b.position());
    }
    for (a, b) in workflow.connections().iter().zip(workflow2.connections()) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.correlation_value, b.correlation_value);
    }
}
