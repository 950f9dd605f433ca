use egui::epaint::StrokeKind;
use egui::{
    Align2, Button, Color32, CornerRadius, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2,
    Widget,
};

use crate::elements::{Node, NodeKind};
use crate::viewport::Viewport;
use crate::workflow::Workflow;

pub const MINIMAP_WIDTH: f32 = 200.;
pub const MINIMAP_HEIGHT: f32 = 130.;
pub const MINIMAP_PADDING: f32 = 12.;
/// The overview never magnifies content beyond this scale.
pub const MAX_SCALE: f32 = 0.12;

/// One node, projected onto the overview surface.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapRect {
    pub node_id: String,
    pub rect: Rect,
    pub kind: NodeKind,
}

/// Scaled overview of the node layout, fitted into the minimap surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinimapProjection {
    pub scale: f32,
    /// Canvas-space top-left of the projected content (padding included).
    pub offset: Vec2,
    pub rects: Vec<MinimapRect>,
}

impl MinimapProjection {
    pub fn compute(nodes: &[Node]) -> Self {
        if nodes.is_empty() {
            return Self {
                scale: 1.,
                ..Self::default()
            };
        }

        let mut min = Pos2::new(f32::MAX, f32::MAX);
        let mut max = Pos2::new(f32::MIN, f32::MIN);
        for node in nodes {
            let rect = node.rect();
            min = min.min(rect.min);
            max = max.max(rect.max);
        }
        min -= Vec2::splat(MINIMAP_PADDING);
        max += Vec2::splat(MINIMAP_PADDING);

        let content = max - min;
        let scale_x = (MINIMAP_WIDTH - MINIMAP_PADDING * 2.) / content.x;
        let scale_y = (MINIMAP_HEIGHT - MINIMAP_PADDING * 2.) / content.y;
        let scale = scale_x.min(scale_y).min(MAX_SCALE);

        let rects = nodes
            .iter()
            .map(|node| MinimapRect {
                node_id: node.id().to_string(),
                rect: Rect::from_min_size(
                    ((node.position() - min) * scale).to_pos2()
                        + Vec2::splat(MINIMAP_PADDING),
                    node.size() * scale,
                ),
                kind: node.kind(),
            })
            .collect();

        Self {
            scale,
            offset: min.to_vec2(),
            rects,
        }
    }
}

/// Overview panel with zoom controls, meant to float in a corner of the
/// canvas. Reads the node list and drives the shared persisted [`Viewport`].
pub struct Minimap<'a> {
    workflow: &'a Workflow,
    custom_id: Option<String>,
}

impl<'a> Minimap<'a> {
    pub fn new(workflow: &'a Workflow) -> Self {
        Self {
            workflow,
            custom_id: None,
        }
    }

    /// Binds the minimap to the canvas widget with the same custom id.
    pub fn with_id(mut self, custom_id: Option<String>) -> Self {
        self.custom_id = custom_id;
        self
    }
}

impl Widget for Minimap<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            let (resp, painter) = ui.allocate_painter(
                Vec2::new(MINIMAP_WIDTH, MINIMAP_HEIGHT),
                Sense::hover(),
            );
            let corner = CornerRadius::same(8);
            painter.rect_filled(resp.rect, corner, Color32::from_rgb(0x16, 0x16, 0x16));
            painter.rect_stroke(
                resp.rect,
                corner,
                Stroke::new(1., Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 26)),
                StrokeKind::Inside,
            );

            let projection = MinimapProjection::compute(self.workflow.nodes());
            for item in &projection.rects {
                let size = Vec2::new(item.rect.width().max(3.), item.rect.height().max(2.));
                painter.rect_filled(
                    Rect::from_min_size(resp.rect.min + item.rect.min.to_vec2(), size),
                    CornerRadius::same(1),
                    item.kind.color(),
                );
            }

            let mut viewport = Viewport::load(ui, self.custom_id.as_deref());
            ui.horizontal(|ui| {
                if ui.add(Button::new("-").small()).clicked() {
                    viewport.zoom_out();
                }
                let (zoom_rect, _) =
                    ui.allocate_exact_size(Vec2::new(48., 18.), Sense::hover());
                ui.painter().text(
                    zoom_rect.center(),
                    Align2::CENTER_CENTER,
                    format!("{:.0}%", viewport.zoom * 100.),
                    FontId::proportional(11.),
                    Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 150),
                );
                if ui.add(Button::new("+").small()).clicked() {
                    viewport.zoom_in();
                }
                ui.separator();
                if ui.add(Button::new("reset").small()).clicked() {
                    viewport.reset();
                }
            });
            viewport.save(ui, self.custom_id.as_deref());
        })
        .response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ChartKind, ChartPayload, NodePayload};

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
    fn empty_canvas_projects_nothing() {
        let projection = MinimapProjection::compute(&[]);
        assert_eq!(projection.scale, 1.);
        assert!(projection.rects.is_empty());
    }

    #[test]
    fn scale_is_capped() {
        // Two charts close together: the fit scale would exceed the cap.
        let nodes = vec![chart("a", Pos2::ZERO), chart("b", Pos2::new(40., 20.))];
        let projection = MinimapProjection::compute(&nodes);
        assert_eq!(projection.scale, MAX_SCALE);
    }

    #[test]
    fn wide_layouts_fit_the_surface() {
        let nodes = vec![chart("a", Pos2::ZERO), chart("b", Pos2::new(4000., 0.))];
        let projection = MinimapProjection::compute(&nodes);

        assert!(projection.scale < MAX_SCALE);
        for item in &projection.rects {
            assert!(item.rect.max.x <= MINIMAP_WIDTH);
            assert!(item.rect.max.y <= MINIMAP_HEIGHT);
        }
    }

    #[test]
    fn rects_follow_the_projection_formula() {
        let nodes = vec![chart("a", Pos2::new(100., 100.))];
        let projection = MinimapProjection::compute(&nodes);

        // Content min is position - padding, so the node lands at
        // padding * scale + padding from the surface origin.
        let expected = MINIMAP_PADDING * projection.scale + MINIMAP_PADDING;
        assert!((projection.rects[0].rect.min.x - expected).abs() < 1e-3);
        assert!((projection.rects[0].rect.min.y - expected).abs() < 1e-3);
        assert_eq!(projection.scale, MAX_SCALE);
    }
}
