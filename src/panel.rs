use egui::Pos2;
use serde::{Deserialize, Serialize};

/// One entry of the add-item catalog shown by the contextual floating panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelItem {
    pub id: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

/// The default catalog. Only the "dataset" entry maps to a real action
/// (opening the import flow); the rest are placeholders for tools that are
/// not wired up yet.
pub fn panel_items() -> Vec<PanelItem> {
    vec![
        PanelItem {
            id: "dataset",
            label: "Import Dataset",
            category: "Data",
            description: "Upload CSV or connect to data source",
        },
        PanelItem {
            id: "feature",
            label: "Extract Feature",
            category: "Data",
            description: "Select a column from your dataset",
        },
        PanelItem {
            id: "scatter",
            label: "Scatter Plot",
            category: "Visualize",
            description: "Compare two numeric features",
        },
        PanelItem {
            id: "histogram",
            label: "Histogram",
            category: "Visualize",
            description: "Show distribution of a feature",
        },
        PanelItem {
            id: "correlation",
            label: "Correlation Matrix",
            category: "Visualize",
            description: "See all feature correlations",
        },
        PanelItem {
            id: "box",
            label: "Box Plot",
            category: "Visualize",
            description: "Show quartiles and outliers",
        },
        PanelItem {
            id: "ai-explore",
            label: "AI Explore",
            category: "AI Analysis",
            description: "Get AI-powered insights",
        },
        PanelItem {
            id: "find-correlations",
            label: "Find Correlations",
            category: "AI Analysis",
            description: "Discover feature relationships",
        },
        PanelItem {
            id: "suggest-features",
            label: "Suggest Features",
            category: "AI Analysis",
            description: "Get feature engineering ideas",
        },
        PanelItem {
            id: "normalize",
            label: "Normalize",
            category: "Transform",
            description: "Scale numeric values to 0-1",
        },
        PanelItem {
            id: "encode",
            label: "One-Hot Encode",
            category: "Transform",
            description: "Convert categories to numbers",
        },
        PanelItem {
            id: "bin",
            label: "Bin Values",
            category: "Transform",
            description: "Group numeric values into bins",
        },
    ]
}

/// Whether the contextual panel is open and the screen position of the
/// right-click that requested it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatingPanelState {
    pub open: bool,
    pub screen_pos: Pos2,
}

impl Default for FloatingPanelState {
    fn default() -> Self {
        Self {
            open: false,
            screen_pos: Pos2::ZERO,
        }
    }
}

impl FloatingPanelState {
    pub fn open_at(&mut self, screen_pos: Pos2) {
        self.open = true;
        self.screen_pos = screen_pos;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
