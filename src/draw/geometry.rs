use egui::epaint::CubicBezierShape;
use egui::{Color32, Pos2, Stroke};

use crate::elements::{Connection, Node};
use crate::viewport::Viewport;

/// Horizontal control-point offset never exceeds this many canvas units, so
/// long connections flatten instead of bulging.
pub const MAX_CONTROL_OFFSET: f32 = 120.;

const STROKE_WIDTH: f32 = 2.;
const STROKE_WIDTH_SELECTED: f32 = 3.;

/// Correlation value rendered at the midpoint of a connection path.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationLabel {
    /// Canvas-space center of the label plate.
    pub pos: Pos2,
    /// The value formatted to two decimal places.
    pub text: String,
}

/// A fully resolved, drawable connection path in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionGeometry {
    pub connection_id: String,
    /// Cubic bezier: start, two control points, end.
    pub points: [Pos2; 4],
    pub color: Color32,
    pub dash: Option<[f32; 2]>,
    pub opacity: f32,
    pub width: f32,
    pub label: Option<CorrelationLabel>,
}

/// Control points sit horizontally off the anchors, at the anchors' y, giving
/// a horizontal S-curve that flattens as the endpoints move apart.
pub fn bezier_points(start: Pos2, end: Pos2) -> [Pos2; 4] {
    let dx = end.x - start.x;
    let offset = (dx.abs() * 0.5).min(MAX_CONTROL_OFFSET);

    [
        start,
        Pos2::new(start.x + offset, start.y),
        Pos2::new(end.x - offset, end.y),
        end,
    ]
}

/// Resolves one connection against the node list. Returns `None` when either
/// endpoint id is missing: dangling references are omitted, never an error.
pub fn layout_connection(
    connection: &Connection,
    nodes: &[Node],
    selected: bool,
) -> Option<ConnectionGeometry> {
    let source = nodes.iter().find(|n| n.id() == connection.source_id())?;
    let target = nodes.iter().find(|n| n.id() == connection.target_id())?;

    let start = source.output_anchor();
    let end = target.input_anchor();
    let style = connection.kind().style();

    let label = connection.correlation_value.map(|value| CorrelationLabel {
        pos: Pos2::new((start.x + end.x) / 2., (start.y + end.y) / 2.),
        text: format!("{value:.2}"),
    });

    Some(ConnectionGeometry {
        connection_id: connection.id().to_string(),
        points: bezier_points(start, end),
        color: style.color,
        dash: style.dash,
        opacity: if selected { 1. } else { style.opacity },
        width: if selected {
            STROKE_WIDTH_SELECTED
        } else {
            STROKE_WIDTH
        },
        label,
    })
}

/// Resolves every connection, skipping dangling ones. Pure: identical inputs
/// produce identical geometry.
pub fn layout_connections(
    connections: &[Connection],
    nodes: &[Node],
    selected_id: Option<&str>,
) -> Vec<ConnectionGeometry> {
    connections
        .iter()
        .filter_map(|c| layout_connection(c, nodes, selected_id == Some(c.id())))
        .collect()
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0., 1.);
    (p - (a + ab * t)).length()
}

impl ConnectionGeometry {
    /// Whether `screen_pos` lies within `tolerance` screen pixels of the path.
    pub fn hit_test(&self, viewport: &Viewport, screen_pos: Pos2, tolerance: f32) -> bool {
        let canvas_pos = viewport.screen_to_canvas_pos(screen_pos);
        let canvas_tolerance = tolerance / viewport.zoom;

        let shape = CubicBezierShape::from_points_stroke(
            self.points,
            false,
            Color32::TRANSPARENT,
            Stroke::NONE,
        );
        let flattened = shape.flatten(Some(1.));
        flattened
            .windows(2)
            .any(|w| distance_to_segment(canvas_pos, w[0], w[1]) <= canvas_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        ChartKind, ChartPayload, ConnectionKind, DataType, FeaturePayload, FeatureStats,
        NodePayload,
    };

    fn feature(id: &str, pos: Pos2) -> Node {
        Node::new(
            id,
            pos,
            NodePayload::Feature(FeaturePayload {
                name: id.to_string(),
                dataset_id: "dataset-1".to_string(),
                stats: FeatureStats {
                    data_type: DataType::Numeric,
                    unique_values: 0,
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

    fn chart(id: &str, pos: Pos2) -> Node {
        Node::new(
            id,
            pos,
            NodePayload::Chart(ChartPayload {
                title: id.to_string(),
                chart: ChartKind::Scatter,
                feature_ids: Vec::new(),
                data: Vec::new(),
            }),
        )
    }

    #[test]
    fn anchors_and_control_offset_match_the_dimension_table() {
        let nodes = vec![
            feature("a", Pos2::new(0., 100.)),
            chart("b", Pos2::new(400., 100.)),
        ];
        let connection = Connection::new("c1", "a", "b", ConnectionKind::DataFlow);

        let geom = layout_connection(&connection, &nodes, false).unwrap();
        assert_eq!(geom.points[0], Pos2::new(192., 180.));
        assert_eq!(geom.points[3], Pos2::new(400., 200.));
        // |dx| = 208, so the control offset is 104, under the cap.
        assert_eq!(geom.points[1], Pos2::new(296., 180.));
        assert_eq!(geom.points[2], Pos2::new(296., 200.));
    }

    #[test]
    fn control_offset_is_capped() {
        let [_, cp1, cp2, _] = bezier_points(Pos2::new(0., 0.), Pos2::new(1000., 50.));
        assert_eq!(cp1, Pos2::new(MAX_CONTROL_OFFSET, 0.));
        assert_eq!(cp2, Pos2::new(1000. - MAX_CONTROL_OFFSET, 50.));
    }

    #[test]
    fn dangling_connection_is_omitted() {
        let nodes = vec![feature("a", Pos2::ZERO)];
        let connection = Connection::new("c1", "a", "gone", ConnectionKind::DataFlow);
        assert!(layout_connection(&connection, &nodes, false).is_none());

        let geoms = layout_connections(&[connection], &nodes, None);
        assert!(geoms.is_empty());
    }

    #[test]
    fn layout_is_idempotent() {
        let nodes = vec![
            feature("a", Pos2::new(0., 100.)),
            chart("b", Pos2::new(400., 100.)),
        ];
        let connections = vec![
            Connection::new("c1", "a", "b", ConnectionKind::StrongCorrelation)
                .with_correlation_value(0.87),
        ];

        let first = layout_connections(&connections, &nodes, Some("c1"));
        let second = layout_connections(&connections, &nodes, Some("c1"));
        assert_eq!(first, second);
    }

    #[test]
    fn correlation_label_sits_at_the_midpoint_with_two_decimals() {
        let nodes = vec![
            feature("a", Pos2::new(0., 100.)),
            chart("b", Pos2::new(400., 100.)),
        ];
        let connection = Connection::new("c1", "a", "b", ConnectionKind::ModerateCorrelation)
            .with_correlation_value(0.625);

        let geom = layout_connection(&connection, &nodes, false).unwrap();
        let label = geom.label.unwrap();
        assert_eq!(label.pos, Pos2::new(296., 190.));
        assert_eq!(label.text, "0.62");
    }

    #[test]
    fn selection_changes_width_and_opacity_only() {
        let nodes = vec![
            feature("a", Pos2::new(0., 100.)),
            chart("b", Pos2::new(400., 100.)),
        ];
        let connection = Connection::new("c1", "a", "b", ConnectionKind::WeakCorrelation);

        let plain = layout_connection(&connection, &nodes, false).unwrap();
        let selected = layout_connection(&connection, &nodes, true).unwrap();

        assert_eq!(plain.points, selected.points);
        assert_eq!(plain.color, selected.color);
        assert_eq!(plain.width, 2.);
        assert_eq!(selected.width, 3.);
        assert_eq!(selected.opacity, 1.);
    }

    #[test]
    fn hit_test_respects_zoom() {
        let nodes = vec![
            feature("a", Pos2::new(0., 100.)),
            chart("b", Pos2::new(400., 100.)),
        ];
        let connection = Connection::new("c1", "a", "b", ConnectionKind::DataFlow);
        let geom = layout_connection(&connection, &nodes, false).unwrap();

        let viewport = Viewport::default();
        // The path starts at (192, 180); a nearby screen point should hit.
        assert!(geom.hit_test(&viewport, Pos2::new(195., 182.), 7.));
        assert!(!geom.hit_test(&viewport, Pos2::new(195., 400.), 7.));
    }
}
