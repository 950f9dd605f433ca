use egui::{Id, Pos2, Ui, Vec2};
use serde::{Deserialize, Serialize};

const KEY_PREFIX: &str = "workflow_canvas_viewport";

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 2.;
pub const ZOOM_STEP: f32 = 0.1;

/// Pan and zoom state of the canvas surface.
///
/// Node positions live in canvas space; the viewport maps them to screen
/// space with `screen = canvas * zoom + pan`. Zoom is always kept within
/// [`MIN_ZOOM`], [`MAX_ZOOM`] and out-of-range requests clamp silently.
/// Panning is unbounded, the canvas is an infinite plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current pan offset in screen pixels
    pub pan: Vec2,
    /// Current zoom factor
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::default(),
            zoom: 1.,
        }
    }
}

impl Viewport {
    /// Loads the persisted viewport for the given custom id, or the identity
    /// viewport if none was saved yet.
    pub fn load(ui: &Ui, custom_id: Option<&str>) -> Self {
        ui.data_mut(|data| {
            data.get_persisted::<Viewport>(Id::new(key(custom_id)))
                .unwrap_or_default()
        })
    }

    pub fn save(self, ui: &mut Ui, custom_id: Option<&str>) {
        ui.data_mut(|data| {
            data.insert_persisted(Id::new(key(custom_id)), self);
        });
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.zoom
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Shifts the pan offset. No bounds are applied.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Increases zoom by one step. The pan offset is untouched.
    pub fn zoom_in(&mut self) {
        self.zoom = clamp_zoom(self.zoom + ZOOM_STEP);
    }

    /// Decreases zoom by one step. The pan offset is untouched.
    pub fn zoom_out(&mut self) {
        self.zoom = clamp_zoom(self.zoom - ZOOM_STEP);
    }

    /// Adjusts zoom by `delta` while keeping the canvas point under
    /// `screen_point` visually fixed.
    pub fn zoom_at(&mut self, screen_point: Pos2, delta: f32) {
        let new_zoom = clamp_zoom(self.zoom + delta);
        let p = screen_point.to_vec2();
        self.pan = p - (p - self.pan) * (new_zoom / self.zoom);
        self.zoom = new_zoom;
    }

    /// Back to the identity viewport: no pan, 100% zoom.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn key(custom_id: Option<&str>) -> String {
    format!("{KEY_PREFIX}_{}", custom_id.unwrap_or_default())
}

/// Resets the persisted [`Viewport`] state for the given custom id.
pub fn reset_viewport(ui: &mut Ui, custom_id: Option<&str>) {
    Viewport::default().save(ui, custom_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_are_inverse() {
        let viewport = Viewport {
            pan: Vec2::new(40., -10.),
            zoom: 0.8,
        };
        let canvas = Pos2::new(123., -456.);
        let screen = viewport.canvas_to_screen_pos(canvas);
        let back = viewport.screen_to_canvas_pos(screen);

        assert!((back.x - canvas.x).abs() < 1e-3);
        assert!((back.y - canvas.y).abs() < 1e-3);
    }

    #[test]
    fn zoom_steps_clamp_at_bounds() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom, MAX_ZOOM);

        for _ in 0..100 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_steps_leave_pan_untouched() {
        let mut viewport = Viewport {
            pan: Vec2::new(7., 9.),
            zoom: 1.,
        };
        viewport.zoom_in();
        viewport.zoom_out();
        assert_eq!(viewport.pan, Vec2::new(7., 9.));
    }

    #[test]
    fn zoom_at_keeps_the_anchor_fixed() {
        let mut viewport = Viewport {
            pan: Vec2::new(40., -10.),
            zoom: 0.8,
        };
        let anchor = Pos2::new(300., 200.);
        let canvas = viewport.screen_to_canvas_pos(anchor);

        viewport.zoom_at(anchor, ZOOM_STEP);

        let screen = viewport.canvas_to_screen_pos(canvas);
        assert!((screen.x - anchor.x).abs() < 1e-3);
        assert!((screen.y - anchor.y).abs() < 1e-3);
    }

    #[test]
    fn wheel_zoom_from_identity() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(Pos2::new(300., 200.), 0.1);

        assert!((viewport.zoom - 1.1).abs() < 1e-6);
        assert!((viewport.pan.x - -30.).abs() < 1e-3);
        assert!((viewport.pan.y - -20.).abs() < 1e-3);
    }

    #[test]
    fn zoom_at_upper_bound_is_a_no_op() {
        let mut viewport = Viewport {
            pan: Vec2::new(-30., -20.),
            zoom: MAX_ZOOM,
        };
        viewport.zoom_at(Pos2::new(300., 200.), 0.1);

        assert_eq!(viewport.zoom, MAX_ZOOM);
        assert_eq!(viewport.pan, Vec2::new(-30., -20.));
    }

    #[test]
    fn pan_is_unbounded() {
        let mut viewport = Viewport::default();
        viewport.pan_by(Vec2::new(-1e6, 1e6));
        viewport.pan_by(Vec2::new(-1e6, 1e6));
        assert_eq!(viewport.pan, Vec2::new(-2e6, 2e6));
    }

    #[test]
    fn reset_restores_identity() {
        let mut viewport = Viewport {
            pan: Vec2::new(5., 5.),
            zoom: 1.7,
        };
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }
}
