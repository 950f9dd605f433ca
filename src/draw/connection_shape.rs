use egui::epaint::CubicBezierShape;
use egui::{Color32, Shape, Stroke};

use crate::draw::geometry::ConnectionGeometry;
use crate::viewport::Viewport;

/// Tolerance used when flattening beziers for dashed strokes, in screen px.
const FLATTEN_TOLERANCE: f32 = 0.5;

/// Turns a [`ConnectionGeometry`] into screen-space shapes.
///
/// Without a scaler the geometry is emitted in canvas coordinates as-is;
/// with one, points and stroke width go through the viewport transform.
#[derive(Default)]
pub struct ConnectionShapeBuilder<'a> {
    scaler: Option<&'a Viewport>,
}

impl<'a> ConnectionShapeBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scaler(mut self, scaler: &'a Viewport) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn build(&self, geometry: &ConnectionGeometry) -> Vec<Shape> {
        let mut points = geometry.points;
        let mut width = geometry.width;
        let mut dash = geometry.dash;

        if let Some(scaler) = self.scaler {
            points = points.map(|p| scaler.canvas_to_screen_pos(p));
            width = scaler.canvas_to_screen_size(width);
            dash = dash.map(|d| d.map(|len| scaler.canvas_to_screen_size(len)));
        }

        let color = geometry.color.gamma_multiply(geometry.opacity);
        let stroke = Stroke::new(width, color);

        match dash {
            None => {
                vec![CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                )
                .into()]
            }
            Some([dash_length, gap_length]) => {
                let flattened = CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    Stroke::NONE,
                )
                .flatten(Some(FLATTEN_TOLERANCE));
                Shape::dashed_line(&flattened, stroke, dash_length, gap_length)
            }
        }
    }
}
