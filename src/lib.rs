mod canvas_view;
mod drag;
mod draw;
mod elements;
#[cfg(feature = "events")]
mod events;
mod import;
mod minimap;
mod panel;
mod sample;
mod sensors;
mod settings;
mod viewport;
mod workflow;

pub use self::canvas_view::CanvasView;
pub use self::drag::DragInteraction;
pub use self::draw::{
    bezier_points, layout_connection, layout_connections, ConnectionGeometry,
    ConnectionShapeBuilder, CorrelationLabel, MAX_CONTROL_OFFSET,
};
pub use self::elements::{
    CategoryCount, CellValue, ChartKind, ChartPayload, Connection, ConnectionKind,
    ConnectionStyle, DataType, DatasetPayload, DatasetStats, FeaturePayload, FeatureStats,
    InsightKind, InsightPayload, Node, NodeKind, NodePayload, Row, TransformKind,
    TransformationPayload,
};
#[cfg(feature = "events")]
pub use self::events::{
    Event, EventSink, PayloadConnectionDeselect, PayloadConnectionSelect, PayloadNodeDeselect,
    PayloadNodeDragEnd, PayloadNodeDragStart, PayloadNodeMove, PayloadNodeSelect, PayloadPan,
    PayloadZoom,
};
pub use self::import::{parse_csv, ImportError, ParsedTable, SAMPLE_ROW_LIMIT};
pub use self::minimap::{
    Minimap, MinimapProjection, MinimapRect, MAX_SCALE, MINIMAP_HEIGHT, MINIMAP_PADDING,
    MINIMAP_WIDTH,
};
pub use self::panel::{panel_items, FloatingPanelState, PanelItem};
pub use self::sample::sample_workflow;
pub use self::sensors::{DragSignal, KeyboardSensor, PointerSensor, TouchSensor};
pub use self::settings::{SettingsInteraction, SettingsNavigation, SettingsStyle};
pub use self::viewport::{reset_viewport, Viewport, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use self::workflow::{Selection, Workflow, DEFAULT_IMPORT_POS};
