use egui::Color32;
use serde::{Deserialize, Serialize};

/// Semantic kind of a connection. Drives stroke color, dash pattern and
/// opacity via [`ConnectionKind::style`].
///
/// Serialized as the kebab-case kind string; anything unrecognized
/// deserializes to [`ConnectionKind::DataFlow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionKind {
    #[default]
    DataFlow,
    StrongCorrelation,
    ModerateCorrelation,
    WeakCorrelation,
    InverseCorrelation,
    DerivesFrom,
}

impl ConnectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionKind::DataFlow => "data-flow",
            ConnectionKind::StrongCorrelation => "strong-correlation",
            ConnectionKind::ModerateCorrelation => "moderate-correlation",
            ConnectionKind::WeakCorrelation => "weak-correlation",
            ConnectionKind::InverseCorrelation => "inverse-correlation",
            ConnectionKind::DerivesFrom => "derives-from",
        }
    }

    /// Static visual encoding per kind.
    pub fn style(self) -> ConnectionStyle {
        match self {
            ConnectionKind::DataFlow => ConnectionStyle {
                color: Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 51),
                dash: None,
                opacity: 0.8,
            },
            ConnectionKind::StrongCorrelation => ConnectionStyle {
                color: Color32::from_rgb(0x4a, 0xde, 0x80),
                dash: None,
                opacity: 1.,
            },
            ConnectionKind::ModerateCorrelation => ConnectionStyle {
                color: Color32::from_rgb(0x60, 0xa5, 0xfa),
                dash: Some([8., 4.]),
                opacity: 0.9,
            },
            ConnectionKind::WeakCorrelation => ConnectionStyle {
                color: Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 64),
                dash: Some([4., 4.]),
                opacity: 0.6,
            },
            ConnectionKind::InverseCorrelation => ConnectionStyle {
                color: Color32::from_rgb(0xf8, 0x71, 0x71),
                dash: Some([8., 4.]),
                opacity: 0.9,
            },
            ConnectionKind::DerivesFrom => ConnectionStyle {
                color: Color32::from_rgb(0xc0, 0x84, 0xfc),
                dash: Some([4., 2.]),
                opacity: 0.8,
            },
        }
    }
}

impl From<String> for ConnectionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "strong-correlation" => ConnectionKind::StrongCorrelation,
            "moderate-correlation" => ConnectionKind::ModerateCorrelation,
            "weak-correlation" => ConnectionKind::WeakCorrelation,
            "inverse-correlation" => ConnectionKind::InverseCorrelation,
            "derives-from" => ConnectionKind::DerivesFrom,
            _ => ConnectionKind::DataFlow,
        }
    }
}

impl From<ConnectionKind> for String {
    fn from(kind: ConnectionKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Stroke color, dash pattern (dash length, gap length) and base opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionStyle {
    pub color: Color32,
    pub dash: Option<[f32; 2]>,
    pub opacity: f32,
}

/// A directed link between two nodes, referenced by id.
///
/// Endpoints are not validated: a connection whose source or target id is
/// absent from the node list simply renders nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    id: String,
    source_id: String,
    target_id: String,
    kind: ConnectionKind,

    pub label: Option<String>,
    pub correlation_value: Option<f32>,

    #[serde(default)]
    selected: bool,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        kind: ConnectionKind,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
            label: None,
            correlation_value: None,
            selected: false,
        }
    }

    pub fn with_correlation_value(mut self, value: f32) -> Self {
        self.correlation_value = Some(value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    /// True when the connection references `node_id` on either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_falls_back_to_data_flow() {
        let kind: ConnectionKind = serde_json::from_str("\"galactic-correlation\"").unwrap();
        assert_eq!(kind, ConnectionKind::DataFlow);
    }

    #[test]
    fn kind_roundtrips_as_kebab_case() {
        let json = serde_json::to_string(&ConnectionKind::DerivesFrom).unwrap();
        assert_eq!(json, "\"derives-from\"");
        let back: ConnectionKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConnectionKind::DerivesFrom);
    }

    #[test]
    fn style_table_matches_kinds() {
        assert!(ConnectionKind::DataFlow.style().dash.is_none());
        assert!(ConnectionKind::StrongCorrelation.style().dash.is_none());
        assert_eq!(
            ConnectionKind::ModerateCorrelation.style().dash,
            Some([8., 4.])
        );
        assert_eq!(ConnectionKind::WeakCorrelation.style().dash, Some([4., 4.]));
        assert_eq!(
            ConnectionKind::InverseCorrelation.style().dash,
            Some([8., 4.])
        );
        assert_eq!(ConnectionKind::DerivesFrom.style().dash, Some([4., 2.]));
        assert_eq!(ConnectionKind::StrongCorrelation.style().opacity, 1.);
    }

    #[test]
    fn touches_checks_both_endpoints() {
        let c = Connection::new("c1", "a", "b", ConnectionKind::DataFlow);
        assert!(c.touches("a"));
        assert!(c.touches("b"));
        assert!(!c.touches("c"));
    }
}
