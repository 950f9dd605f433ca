use std::collections::BTreeMap;

use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A single cell of tabular data, as produced by the import coercion rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

/// One string-keyed record of a table or chart series.
pub type Row = BTreeMap<String, CellValue>;

/// Discriminant of the closed set of node variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Dataset,
    Feature,
    Insight,
    Chart,
    Transformation,
}

impl NodeKind {
    /// Fixed card dimensions per kind, used for anchor points, hit testing
    /// and the minimap. Not stored per instance.
    pub fn size(self) -> Vec2 {
        match self {
            NodeKind::Dataset => Vec2::new(224., 160.),
            NodeKind::Feature => Vec2::new(192., 160.),
            NodeKind::Insight => Vec2::new(240., 180.),
            NodeKind::Chart => Vec2::new(256., 200.),
            NodeKind::Transformation => Vec2::new(200., 120.),
        }
    }

    /// Accent color of the kind, shared by node headers and minimap rects.
    pub fn color(self) -> Color32 {
        match self {
            NodeKind::Dataset => Color32::from_rgb(0x3b, 0x82, 0xf6),
            NodeKind::Feature => Color32::from_rgb(0x6b, 0x72, 0x80),
            NodeKind::Insight => Color32::from_rgb(0xc0, 0x84, 0xfc),
            NodeKind::Chart => Color32::from_rgb(0x14, 0xb8, 0xa6),
            NodeKind::Transformation => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Dataset => "dataset",
            NodeKind::Feature => "feature",
            NodeKind::Insight => "insight",
            NodeKind::Chart => "chart",
            NodeKind::Transformation => "transformation",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub rows: u32,
    pub columns: u32,
    pub missing_values: u32,
    pub duplicates: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetPayload {
    pub name: String,
    pub stats: DatasetStats,
    /// At most the first [`crate::import::SAMPLE_ROW_LIMIT`] rows of the source.
    pub sample_rows: Vec<Row>,
    pub columns: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Numeric,
    Categorical,
    Datetime,
    Text,
    Boolean,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub data_type: DataType,
    pub unique_values: u32,
    pub missing_count: u32,
    pub missing_percent: f32,
    pub mean: Option<f32>,
    pub median: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub std_dev: Option<f32>,
    #[serde(default)]
    pub top_categories: Vec<CategoryCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeaturePayload {
    pub name: String,
    pub dataset_id: String,
    pub stats: FeatureStats,
    pub importance: Option<f32>,
    pub sample_values: Vec<CellValue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Correlation,
    Pattern,
    Anomaly,
    Suggestion,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsightPayload {
    pub title: String,
    pub description: String,
    /// Model confidence in 0..=1.
    pub confidence: f32,
    pub related_features: Vec<String>,
    pub kind: InsightKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Scatter,
    Histogram,
    Bar,
    Line,
    CorrelationMatrix,
    #[serde(rename = "box")]
    BoxPlot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub title: String,
    pub chart: ChartKind,
    pub feature_ids: Vec<String>,
    pub data: Vec<Row>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Normalize,
    Encode,
    Bin,
    Aggregate,
    Derive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformationPayload {
    pub name: String,
    pub transform: TransformKind,
    pub input_feature_id: String,
    pub output_feature_id: Option<String>,
    #[serde(default)]
    pub config: Row,
}

/// Kind-specific data of a node. Closed tagged union; new node kinds are added
/// by extending this enum and the match arms that dispatch on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodePayload {
    Dataset(DatasetPayload),
    Feature(FeaturePayload),
    Insight(InsightPayload),
    Chart(ChartPayload),
    Transformation(TransformationPayload),
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Dataset(_) => NodeKind::Dataset,
            NodePayload::Feature(_) => NodeKind::Feature,
            NodePayload::Insight(_) => NodeKind::Insight,
            NodePayload::Chart(_) => NodeKind::Chart,
            NodePayload::Transformation(_) => NodeKind::Transformation,
        }
    }
}

/// Stores properties of a node on the canvas.
///
/// The position is the top-left corner of the node card in canvas
/// (unscaled, unpanned) coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    position: Pos2,
    payload: NodePayload,

    #[serde(default)]
    selected: bool,
    #[serde(default)]
    dragged: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Pos2, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            position,
            payload,
            selected: false,
            dragged: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn size(&self) -> Vec2 {
        self.kind().size()
    }

    /// Bounding box of the node card in canvas coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size())
    }

    /// Right-mid edge of the card; outgoing connections start here.
    pub fn output_anchor(&self) -> Pos2 {
        let size = self.size();
        Pos2::new(self.position.x + size.x, self.position.y + size.y / 2.)
    }

    /// Left-mid edge of the card; incoming connections end here.
    pub fn input_anchor(&self) -> Pos2 {
        let size = self.size();
        Pos2::new(self.position.x, self.position.y + size.y / 2.)
    }

    /// Display name of the node, whichever payload field carries it.
    pub fn name(&self) -> &str {
        match &self.payload {
            NodePayload::Dataset(p) => &p.name,
            NodePayload::Feature(p) => &p.name,
            NodePayload::Insight(p) => &p.title,
            NodePayload::Chart(p) => &p.title,
            NodePayload::Transformation(p) => &p.name,
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut NodePayload {
        &mut self.payload
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn dragged(&self) -> bool {
        self.dragged
    }

    pub fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_at(pos: Pos2) -> Node {
        Node::new(
            "feature-test",
            pos,
            NodePayload::Feature(FeaturePayload {
                name: "Test".to_string(),
                dataset_id: "dataset-1".to_string(),
                stats: FeatureStats {
                    data_type: DataType::Numeric,
                    unique_values: 1,
                    missing_count: 0,
                    missing_percent: 0.,
                    mean: None,
                    median: None,
                    min: None,
                    max: None,
                    std_dev: None,
                    top_categories: Vec::new(),
                },
                importance: None,
                sample_values: Vec::new(),
            }),
        )
    }

    #[test]
    fn anchors_sit_on_mid_edges() {
        let node = feature_at(Pos2::new(0., 100.));
        assert_eq!(node.output_anchor(), Pos2::new(192., 180.));
        assert_eq!(node.input_anchor(), Pos2::new(0., 180.));
    }

    #[test]
    fn dimensions_follow_the_kind_table() {
        assert_eq!(NodeKind::Dataset.size(), Vec2::new(224., 160.));
        assert_eq!(NodeKind::Feature.size(), Vec2::new(192., 160.));
        assert_eq!(NodeKind::Insight.size(), Vec2::new(240., 180.));
        assert_eq!(NodeKind::Chart.size(), Vec2::new(256., 200.));
        assert_eq!(NodeKind::Transformation.size(), Vec2::new(200., 120.));
    }

    #[test]
    fn rect_spans_position_plus_size() {
        let node = feature_at(Pos2::new(10., 20.));
        let rect = node.rect();
        assert_eq!(rect.min, Pos2::new(10., 20.));
        assert_eq!(rect.max, Pos2::new(202., 180.));
    }
}
