use egui::epaint::StrokeKind;
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, Vec2};

use crate::draw::drawer::DrawContext;
use crate::elements::{CellValue, ChartKind, Node, NodePayload, Row};

const HEADER_HEIGHT: f32 = 28.;
const PADDING: f32 = 10.;
const LINE_HEIGHT: f32 = 16.;

fn font(ctx: &DrawContext, size: f32) -> FontId {
    FontId::proportional(ctx.viewport.canvas_to_screen_size(size))
}

fn number(row: &Row, key: &str) -> Option<f64> {
    match row.get(key) {
        Some(CellValue::Number(n)) => Some(*n),
        _ => None,
    }
}

/// Paints one node card at `canvas_pos` (the drag-aware visual position).
/// One arm per payload variant; new kinds extend the match.
pub fn paint_node(ctx: &DrawContext, node: &Node, canvas_pos: Pos2) {
    let zoom = ctx.viewport.zoom;
    let rect = Rect::from_min_size(
        ctx.viewport.canvas_to_screen_pos(canvas_pos),
        node.size() * zoom,
    );

    let corner = CornerRadius::same((8. * zoom).round() as u8);
    ctx.painter.rect_filled(rect, corner, ctx.style.node_fill);

    let stroke = if node.selected() {
        Stroke::new(2. * zoom, ctx.style.selection_stroke)
    } else {
        Stroke::new(zoom, ctx.style.node_stroke)
    };
    ctx.painter
        .rect_stroke(rect, corner, stroke, StrokeKind::Inside);

    // Header strip with the kind accent and the display name.
    let accent = node.kind().color();
    let header = Rect::from_min_size(rect.min, Vec2::new(rect.width(), HEADER_HEIGHT * zoom));
    ctx.painter
        .rect_filled(header, corner, accent.gamma_multiply(0.18));
    ctx.painter.circle_filled(
        header.left_center() + Vec2::new(PADDING * zoom, 0.),
        3. * zoom,
        accent,
    );
    ctx.painter.text(
        header.left_center() + Vec2::new((PADDING + 10.) * zoom, 0.),
        Align2::LEFT_CENTER,
        node.name(),
        font(ctx, 12.),
        ctx.style.text_color,
    );

    let body = Rect::from_min_max(
        rect.min + Vec2::new(PADDING * zoom, (HEADER_HEIGHT + 8.) * zoom),
        rect.max - Vec2::splat(PADDING * zoom),
    );

    match node.payload() {
        NodePayload::Dataset(p) => {
            let lines = [
                format!("{} rows x {} columns", p.stats.rows, p.stats.columns),
                format!("{} missing values", p.stats.missing_values),
                format!("{} duplicates", p.stats.duplicates),
                p.columns.join(", "),
            ];
            paint_lines(ctx, body, &lines);
        }
        NodePayload::Feature(p) => {
            let mut lines = vec![format!("{:?}", p.stats.data_type).to_lowercase()];
            if let (Some(mean), Some(std_dev)) = (p.stats.mean, p.stats.std_dev) {
                lines.push(format!("mean {mean:.1} / sd {std_dev:.1}"));
            }
            lines.push(format!("{:.1}% missing", p.stats.missing_percent));
            paint_lines(ctx, body, &lines);

            if let Some(importance) = p.importance {
                paint_meter(ctx, body, importance, accent);
            }
        }
        NodePayload::Insight(p) => {
            let galley = ctx.painter.layout(
                p.description.clone(),
                font(ctx, 10.),
                ctx.style.muted_text_color,
                body.width(),
            );
            ctx.painter.galley(body.min, galley, ctx.style.muted_text_color);
            ctx.painter.text(
                body.left_bottom(),
                Align2::LEFT_BOTTOM,
                format!("confidence {:.0}%", p.confidence * 100.),
                font(ctx, 10.),
                ctx.style.text_color,
            );
        }
        NodePayload::Chart(p) => {
            paint_series(ctx, body, p.chart, &p.data, accent);
        }
        NodePayload::Transformation(p) => {
            let lines = [
                format!("{:?}", p.transform).to_lowercase(),
                format!("in: {}", p.input_feature_id),
            ];
            paint_lines(ctx, body, &lines);
        }
    }
}

fn paint_lines(ctx: &DrawContext, body: Rect, lines: &[String]) {
    let zoom = ctx.viewport.zoom;
    for (i, line) in lines.iter().enumerate() {
        let pos = body.min + Vec2::new(0., i as f32 * LINE_HEIGHT * zoom);
        if pos.y > body.max.y {
            break;
        }
        ctx.painter.text(
            pos,
            Align2::LEFT_TOP,
            line,
            font(ctx, 10.),
            ctx.style.muted_text_color,
        );
    }
}

fn paint_meter(ctx: &DrawContext, body: Rect, fraction: f32, accent: Color32) {
    let zoom = ctx.viewport.zoom;
    let track = Rect::from_min_size(
        Pos2::new(body.min.x, body.max.y - 6. * zoom),
        Vec2::new(body.width(), 4. * zoom),
    );
    let corner = CornerRadius::same((2. * zoom).round() as u8);
    ctx.painter
        .rect_filled(track, corner, ctx.style.node_stroke);

    let fill = Rect::from_min_size(
        track.min,
        Vec2::new(track.width() * fraction.clamp(0., 1.), track.height()),
    );
    ctx.painter.rect_filled(fill, corner, accent);
}

fn paint_series(ctx: &DrawContext, body: Rect, chart: ChartKind, data: &[Row], accent: Color32) {
    if data.is_empty() {
        return;
    }

    match chart {
        ChartKind::Histogram | ChartKind::Bar => {
            let counts: Vec<f64> = data.iter().filter_map(|r| number(r, "count")).collect();
            let max = counts.iter().copied().fold(f64::EPSILON, f64::max);
            if counts.is_empty() {
                return;
            }

            let slot = body.width() / counts.len() as f32;
            for (i, count) in counts.iter().enumerate() {
                let h = body.height() * (count / max) as f32;
                let bar = Rect::from_min_max(
                    Pos2::new(body.min.x + i as f32 * slot, body.max.y - h),
                    Pos2::new(body.min.x + (i as f32 + 0.8) * slot, body.max.y),
                );
                ctx.painter
                    .rect_filled(bar, CornerRadius::ZERO, accent.gamma_multiply(0.7));
            }
        }
        ChartKind::Scatter | ChartKind::Line => {
            let points: Vec<(f64, f64)> = data
                .iter()
                .filter_map(|r| Some((number(r, "x")?, number(r, "y")?)))
                .collect();
            if points.is_empty() {
                return;
            }

            let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
            let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
            for (x, y) in &points {
                min_x = min_x.min(*x);
                max_x = max_x.max(*x);
                min_y = min_y.min(*y);
                max_y = max_y.max(*y);
            }
            let span_x = (max_x - min_x).max(f64::EPSILON);
            let span_y = (max_y - min_y).max(f64::EPSILON);

            for (x, y) in &points {
                let px = body.min.x + body.width() * ((x - min_x) / span_x) as f32;
                let py = body.max.y - body.height() * ((y - min_y) / span_y) as f32;
                ctx.painter.circle_filled(
                    Pos2::new(px, py),
                    ctx.viewport.canvas_to_screen_size(2.),
                    accent,
                );
            }
        }
        ChartKind::CorrelationMatrix | ChartKind::BoxPlot => {}
    }
}
