use egui::{Align2, Context, CornerRadius, Painter, Rect, Vec2};

use crate::drag::DragInteraction;
use crate::draw::connection_shape::ConnectionShapeBuilder;
use crate::draw::geometry::layout_connections;
use crate::draw::node_shapes::paint_node;
use crate::settings::SettingsStyle;
use crate::viewport::Viewport;
use crate::workflow::{Selection, Workflow};

/// Everything needed to paint one frame.
pub struct DrawContext<'a> {
    pub ctx: &'a Context,
    pub painter: &'a Painter,
    /// Viewport whose pan is already offset to the widget's screen position.
    pub viewport: &'a Viewport,
    pub style: &'a SettingsStyle,
}

/// Paints the whole canvas: background grid, connection layer, node cards.
/// The active drag target is painted at its live offset position; connection
/// anchors follow committed positions only.
pub struct Drawer<'a> {
    workflow: &'a Workflow,
    drag: &'a DragInteraction,
    ctx: &'a DrawContext<'a>,
}

impl<'a> Drawer<'a> {
    pub fn new(
        workflow: &'a Workflow,
        drag: &'a DragInteraction,
        ctx: &'a DrawContext<'a>,
    ) -> Self {
        Self {
            workflow,
            drag,
            ctx,
        }
    }

    pub fn draw(self, clip: Rect) {
        self.ctx
            .painter
            .rect_filled(clip, CornerRadius::ZERO, self.ctx.style.background);
        self.draw_grid(clip);
        self.draw_connections();
        self.draw_nodes();
    }

    fn draw_grid(&self, clip: Rect) {
        let viewport = self.ctx.viewport;
        let spacing = viewport.canvas_to_screen_size(self.ctx.style.grid_spacing);
        // Too dense to be anything but noise below this.
        if spacing < 4. {
            return;
        }

        let dot_radius = (viewport.zoom * 1.).max(0.5);
        let x0 = clip.left() + (viewport.pan.x - clip.left()).rem_euclid(spacing);
        let y0 = clip.top() + (viewport.pan.y - clip.top()).rem_euclid(spacing);

        let mut y = y0;
        while y <= clip.bottom() {
            let mut x = x0;
            while x <= clip.right() {
                self.ctx.painter.circle_filled(
                    egui::Pos2::new(x, y),
                    dot_radius,
                    self.ctx.style.grid_dot_color,
                );
                x += spacing;
            }
            y += spacing;
        }
    }

    fn draw_connections(&self) {
        let selected_id = match self.workflow.selection() {
            Selection::Connection(id) => Some(id.as_str()),
            _ => None,
        };
        let geometries = layout_connections(
            self.workflow.connections(),
            self.workflow.nodes(),
            selected_id,
        );

        let builder = ConnectionShapeBuilder::new().with_scaler(self.ctx.viewport);
        for geometry in &geometries {
            self.ctx.painter.extend(builder.build(geometry));

            if let Some(label) = &geometry.label {
                let center = self.ctx.viewport.canvas_to_screen_pos(label.pos);
                let size = Vec2::new(36., 20.) * self.ctx.viewport.zoom;
                let corner =
                    CornerRadius::same((4. * self.ctx.viewport.zoom).round() as u8);
                self.ctx.painter.rect_filled(
                    Rect::from_center_size(center, size),
                    corner,
                    self.ctx.style.label_plate_fill,
                );
                self.ctx.painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    &label.text,
                    egui::FontId::proportional(self.ctx.viewport.canvas_to_screen_size(11.)),
                    self.ctx.style.muted_text_color,
                );
            }
        }
    }

    fn draw_nodes(&self) {
        for node in self.workflow.nodes() {
            let pos = self.drag.visual_position(node.id(), node.position());
            paint_node(self.ctx, node, pos);
        }
    }
}
