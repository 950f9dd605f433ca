mod connection;
mod node;

pub use connection::{Connection, ConnectionKind, ConnectionStyle};
pub use node::{
    CategoryCount, CellValue, ChartKind, ChartPayload, DataType, DatasetPayload, DatasetStats,
    FeaturePayload, FeatureStats, InsightKind, InsightPayload, Node, NodeKind, NodePayload, Row,
    TransformKind, TransformationPayload,
};
