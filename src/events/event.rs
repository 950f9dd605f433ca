use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPan {
    pub diff: [f32; 2],
    pub new_pan: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadZoom {
    pub diff: f32,
    pub new_zoom: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeSelect {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeDeselect {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadConnectionSelect {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadConnectionDeselect {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeDragStart {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeMove {
    pub id: String,
    /// Zoom-adjusted offset since the drag started, in canvas units.
    pub offset: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeDragEnd {
    pub id: String,
    pub new_pos: [f32; 2],
}

/// Interaction that occurred on the canvas. Navigation events do not change
/// any node or connection properties; they only describe the viewport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    Pan(PayloadPan),
    Zoom(PayloadZoom),
    NodeSelect(PayloadNodeSelect),
    NodeDeselect(PayloadNodeDeselect),
    ConnectionSelect(PayloadConnectionSelect),
    ConnectionDeselect(PayloadConnectionDeselect),
    NodeDragStart(PayloadNodeDragStart),
    NodeMove(PayloadNodeMove),
    NodeDragEnd(PayloadNodeDragEnd),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contract_pan() {
        let event = Event::Pan(PayloadPan {
            diff: [1.0, 2.0],
            new_pan: [1.0, 2.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Pan":{"diff":[1.0,2.0],"new_pan":[1.0,2.0]}}"#);

        let event: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(
            event,
            Event::Pan(PayloadPan {
                diff: [1.0, 2.0],
                new_pan: [1.0, 2.0],
            })
        );
    }

    #[test]
    fn test_contract_zoom() {
        let event = Event::Zoom(PayloadZoom {
            diff: 0.1,
            new_zoom: 1.1,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Zoom":{"diff":0.1,"new_zoom":1.1}}"#);

        let event: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(
            event,
            Event::Zoom(PayloadZoom {
                diff: 0.1,
                new_zoom: 1.1,
            })
        );
    }

    #[test]
    fn test_contract_drag_end() {
        let event = Event::NodeDragEnd(PayloadNodeDragEnd {
            id: "feature-income".to_string(),
            new_pos: [200.0, 240.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"NodeDragEnd":{"id":"feature-income","new_pos":[200.0,240.0]}}"#
        );
    }
}
