//! Built-in sample workflow: a small loan-applications exploration with one
//! dataset, four features, three insights and two charts.

use egui::Pos2;

use crate::elements::{
    CategoryCount, CellValue, ChartKind, ChartPayload, Connection, ConnectionKind, DataType,
    DatasetPayload, DatasetStats, FeaturePayload, FeatureStats, InsightKind, InsightPayload, Node,
    NodePayload, Row,
};

fn row(cells: &[(&str, CellValue)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

fn sample_dataset_rows() -> Vec<Row> {
    let raw: [(f64, f64, f64, f64, f64, bool); 8] = [
        (34., 72_000., 16., 720., 25_000., true),
        (28., 45_000., 14., 680., 15_000., true),
        (45., 95_000., 18., 780., 50_000., true),
        (23., 32_000., 12., 620., 8_000., false),
        (52., 120_000., 20., 800., 75_000., true),
        (31., 58_000., 16., 700., 20_000., true),
        (41., 82_000., 14., 740., 35_000., true),
        (26., 38_000., 14., 650., 12_000., false),
    ];

    raw.iter()
        .map(|(age, income, education, credit, loan, approved)| {
            row(&[
                ("age", num(*age)),
                ("income", num(*income)),
                ("education_years", num(*education)),
                ("credit_score", num(*credit)),
                ("loan_amount", num(*loan)),
                ("approved", CellValue::Bool(*approved)),
            ])
        })
        .collect()
}

fn numeric_stats(
    unique_values: u32,
    missing_count: u32,
    missing_percent: f32,
    summary: [f32; 5],
) -> FeatureStats {
    let [mean, median, min, max, std_dev] = summary;
    FeatureStats {
        data_type: DataType::Numeric,
        unique_values,
        missing_count,
        missing_percent,
        mean: Some(mean),
        median: Some(median),
        min: Some(min),
        max: Some(max),
        std_dev: Some(std_dev),
        top_categories: Vec::new(),
    }
}

fn feature(
    id: &str,
    name: &str,
    position: Pos2,
    stats: FeatureStats,
    importance: f32,
    sample_values: Vec<CellValue>,
) -> Node {
    Node::new(
        id,
        position,
        NodePayload::Feature(FeaturePayload {
            name: name.to_string(),
            dataset_id: "dataset-1".to_string(),
            stats,
            importance: Some(importance),
            sample_values,
        }),
    )
}

fn insight(
    id: &str,
    title: &str,
    position: Pos2,
    description: &str,
    confidence: f32,
    related: &[&str],
    kind: InsightKind,
) -> Node {
    Node::new(
        id,
        position,
        NodePayload::Insight(InsightPayload {
            title: title.to_string(),
            description: description.to_string(),
            confidence,
            related_features: related.iter().map(|s| (*s).to_string()).collect(),
            kind,
        }),
    )
}

/// The sample node and connection set used by "load sample".
pub fn sample_workflow() -> (Vec<Node>, Vec<Connection>) {
    let dataset_rows = sample_dataset_rows();

    let dataset = Node::new(
        "dataset-1",
        Pos2::new(80., 200.),
        NodePayload::Dataset(DatasetPayload {
            name: "Loan Applications".to_string(),
            stats: DatasetStats {
                rows: 10_847,
                columns: 6,
                missing_values: 234,
                duplicates: 12,
            },
            sample_rows: dataset_rows.clone(),
            columns: [
                "age",
                "income",
                "education_years",
                "credit_score",
                "loan_amount",
                "approved",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
        }),
    );

    let features = vec![
        feature(
            "feature-income",
            "Income",
            Pos2::new(340., 80.),
            numeric_stats(8_234, 45, 0.4, [67_500., 62_000., 18_000., 450_000., 28_400.]),
            0.89,
            vec![num(72_000.), num(45_000.), num(95_000.), num(32_000.), num(120_000.)],
        ),
        feature(
            "feature-credit",
            "Credit Score",
            Pos2::new(340., 200.),
            numeric_stats(312, 89, 0.8, [698., 705., 300., 850., 78.]),
            0.94,
            vec![num(720.), num(680.), num(780.), num(620.), num(800.)],
        ),
        feature(
            "feature-age",
            "Age",
            Pos2::new(340., 320.),
            numeric_stats(58, 12, 0.1, [38., 36., 18., 75., 12.4]),
            0.42,
            vec![num(34.), num(28.), num(45.), num(23.), num(52.)],
        ),
        feature(
            "feature-approved",
            "Approved (Target)",
            Pos2::new(340., 440.),
            FeatureStats {
                data_type: DataType::Boolean,
                unique_values: 2,
                missing_count: 0,
                missing_percent: 0.,
                mean: None,
                median: None,
                min: None,
                max: None,
                std_dev: None,
                top_categories: vec![
                    CategoryCount {
                        name: "true".to_string(),
                        count: 7_823,
                    },
                    CategoryCount {
                        name: "false".to_string(),
                        count: 3_024,
                    },
                ],
            },
            1.,
            vec![
                CellValue::Bool(true),
                CellValue::Bool(true),
                CellValue::Bool(true),
                CellValue::Bool(false),
                CellValue::Bool(true),
            ],
        ),
    ];

    let insights = vec![
        insight(
            "insight-1",
            "Strong Predictor Found",
            Pos2::new(620., 120.),
            "Credit Score has a strong positive correlation (0.87) with loan \
             approval. Consider this as a primary feature for your model.",
            0.94,
            &["feature-credit", "feature-approved"],
            InsightKind::Correlation,
        ),
        insight(
            "insight-2",
            "Income-Age Pattern",
            Pos2::new(620., 280.),
            "Income tends to peak between ages 45-55, then slightly decreases. \
             This non-linear relationship might benefit from polynomial features.",
            0.78,
            &["feature-income", "feature-age"],
            InsightKind::Pattern,
        ),
        insight(
            "insight-3",
            "Missing Data Alert",
            Pos2::new(620., 420.),
            "Credit Score has 0.8% missing values. Consider imputation using \
             median or model-based methods before training.",
            1.,
            &["feature-credit"],
            InsightKind::Warning,
        ),
    ];

    let charts = vec![
        Node::new(
            "chart-scatter",
            Pos2::new(900., 100.),
            NodePayload::Chart(ChartPayload {
                title: "Income vs Credit Score".to_string(),
                chart: ChartKind::Scatter,
                feature_ids: vec!["feature-income".to_string(), "feature-credit".to_string()],
                data: dataset_rows
                    .iter()
                    .map(|r| {
                        row(&[
                            ("x", r["income"].clone()),
                            ("y", r["credit_score"].clone()),
                            ("approved", r["approved"].clone()),
                        ])
                    })
                    .collect(),
            }),
        ),
        Node::new(
            "chart-histogram",
            Pos2::new(900., 320.),
            NodePayload::Chart(ChartPayload {
                title: "Age Distribution".to_string(),
                chart: ChartKind::Histogram,
                feature_ids: vec!["feature-age".to_string()],
                data: [
                    ("18-25", 1_842.),
                    ("26-35", 3_421.),
                    ("36-45", 2_876.),
                    ("46-55", 1_923.),
                    ("56-65", 612.),
                    ("66+", 173.),
                ]
                .iter()
                .map(|(range, count)| {
                    row(&[
                        ("range", CellValue::Text((*range).to_string())),
                        ("count", num(*count)),
                    ])
                })
                .collect(),
            }),
        ),
    ];

    let mut nodes = vec![dataset];
    nodes.extend(features);
    nodes.extend(insights);
    nodes.extend(charts);

    let connections = vec![
        Connection::new("conn-d1-f1", "dataset-1", "feature-income", ConnectionKind::DataFlow),
        Connection::new("conn-d1-f2", "dataset-1", "feature-credit", ConnectionKind::DataFlow),
        Connection::new("conn-d1-f3", "dataset-1", "feature-age", ConnectionKind::DataFlow),
        Connection::new("conn-d1-f4", "dataset-1", "feature-approved", ConnectionKind::DataFlow),
        Connection::new(
            "conn-f2-i1",
            "feature-credit",
            "insight-1",
            ConnectionKind::StrongCorrelation,
        )
        .with_correlation_value(0.87),
        Connection::new(
            "conn-f1-f2",
            "feature-income",
            "feature-credit",
            ConnectionKind::ModerateCorrelation,
        )
        .with_correlation_value(0.62),
        Connection::new(
            "conn-f1-i2",
            "feature-income",
            "insight-2",
            ConnectionKind::ModerateCorrelation,
        ),
        Connection::new(
            "conn-f3-i2",
            "feature-age",
            "insight-2",
            ConnectionKind::ModerateCorrelation,
        ),
        Connection::new("conn-f2-i3", "feature-credit", "insight-3", ConnectionKind::DataFlow),
        Connection::new("conn-f1-c1", "feature-income", "chart-scatter", ConnectionKind::DataFlow),
        Connection::new("conn-f2-c1", "feature-credit", "chart-scatter", ConnectionKind::DataFlow),
        Connection::new("conn-f3-c2", "feature-age", "chart-histogram", ConnectionKind::DataFlow),
    ];

    (nodes, connections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::layout_connections;

    #[test]
    fn sample_has_the_expected_shape() {
        let (nodes, connections) = sample_workflow();
        assert_eq!(nodes.len(), 10);
        assert_eq!(connections.len(), 12);
    }

    #[test]
    fn every_sample_connection_resolves() {
        let (nodes, connections) = sample_workflow();
        let geometries = layout_connections(&connections, &nodes, None);
        assert_eq!(geometries.len(), connections.len());
    }

    #[test]
    fn correlation_values_are_carried() {
        let (_, connections) = sample_workflow();
        let strong = connections.iter().find(|c| c.id() == "conn-f2-i1").unwrap();
        assert_eq!(strong.correlation_value, Some(0.87));
        assert_eq!(strong.kind(), ConnectionKind::StrongCorrelation);
    }
}
