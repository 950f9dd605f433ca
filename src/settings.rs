use egui::Color32;

use crate::viewport::ZOOM_STEP;

#[derive(Debug, Clone)]
pub struct SettingsInteraction {
    /// Node dragging (pointer, touch and keyboard)
    pub dragging_enabled: bool,

    /// Selects clicked nodes
    pub node_selection_enabled: bool,

    /// Selects clicked connections
    pub connection_selection_enabled: bool,

    /// Opens the add-item panel on secondary click
    pub context_menu_enabled: bool,
}

impl Default for SettingsInteraction {
    fn default() -> Self {
        Self {
            dragging_enabled: true,
            node_selection_enabled: true,
            connection_selection_enabled: true,
            context_menu_enabled: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsNavigation {
    /// Zoom and pan
    pub zoom_and_pan_enabled: bool,

    /// Zoom step applied per wheel/pinch notch
    pub zoom_step: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            zoom_and_pan_enabled: true,
            zoom_step: ZOOM_STEP,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStyle {
    pub background: Color32,
    pub grid_dot_color: Color32,
    /// Grid dot spacing in canvas units
    pub grid_spacing: f32,

    pub node_fill: Color32,
    pub node_stroke: Color32,
    pub selection_stroke: Color32,
    pub text_color: Color32,
    pub muted_text_color: Color32,

    pub label_plate_fill: Color32,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x16, 0x16, 0x16),
            grid_dot_color: Color32::from_rgb(0x37, 0x41, 0x51),
            grid_spacing: 16.,
            node_fill: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            node_stroke: Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 26),
            selection_stroke: Color32::from_rgb(0x60, 0xa5, 0xfa),
            text_color: Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 230),
            muted_text_color: Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 150),
            label_plate_fill: Color32::from_rgb(0x25, 0x25, 0x25),
        }
    }
}
