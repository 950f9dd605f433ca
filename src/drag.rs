use egui::{Pos2, Vec2};

use crate::workflow::Workflow;

#[derive(Clone, Debug)]
struct ActiveDrag {
    node_id: String,
    /// Canvas-space position of the node when the drag started.
    origin: Pos2,
    /// Zoom-adjusted offset since the drag started, for visual feedback only.
    offset: Vec2,
}

/// Tracks the node currently being repositioned.
///
/// Screen-space pointer deltas are divided by the current zoom to obtain the
/// equivalent canvas-space movement: zoomed out, the same screen delta covers
/// more canvas. The offset accumulated through [`DragInteraction::update`] is
/// never committed; only [`DragInteraction::finish`] writes a position, from
/// the final raw delta alone.
#[derive(Clone, Debug, Default)]
pub struct DragInteraction {
    active: Option<ActiveDrag>,
}

impl DragInteraction {
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_node(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.node_id.as_str())
    }

    /// Starts dragging a node, recording its current canvas-space position.
    /// Unknown ids are a silent no-op.
    pub fn begin(&mut self, workflow: &mut Workflow, node_id: &str) {
        let Some(node) = workflow.node_mut(node_id) else {
            return;
        };
        node.set_dragged(true);
        self.active = Some(ActiveDrag {
            node_id: node_id.to_string(),
            origin: node.position(),
            offset: Vec2::ZERO,
        });
    }

    /// Updates the live offset from the cumulative screen-space delta since
    /// the drag started.
    pub fn update(&mut self, raw_delta: Vec2, zoom: f32) {
        if let Some(active) = &mut self.active {
            active.offset = raw_delta / zoom;
        }
    }

    /// Where the given node should be painted this frame: its drag-offset
    /// position while it is the active drag target, its committed position
    /// otherwise.
    pub fn visual_position(&self, node_id: &str, committed: Pos2) -> Pos2 {
        match &self.active {
            Some(active) if active.node_id == node_id => active.origin + active.offset,
            _ => committed,
        }
    }

    /// Ends the drag, committing `origin + raw_delta / zoom` as the node's
    /// new absolute position. If the node vanished mid-drag the commit is
    /// skipped; drag state is cleared either way.
    pub fn finish(&mut self, workflow: &mut Workflow, raw_delta: Vec2, zoom: f32) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(node) = workflow.node_mut(&active.node_id) {
            node.set_dragged(false);
        }
        let target = active.origin + raw_delta / zoom;
        workflow.move_node(&active.node_id, target);
    }

    /// Abandons the drag without committing; the node stays exactly where it
    /// was before the drag began.
    pub fn abort(&mut self, workflow: &mut Workflow) {
        if let Some(active) = self.active.take() {
            if let Some(node) = workflow.node_mut(&active.node_id) {
                node.set_dragged(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{InsightKind, InsightPayload, NodePayload};

    fn workflow_with_node(pos: Pos2) -> (Workflow, String) {
        let mut wf = Workflow::new();
        let id = wf.add_node(
            NodePayload::Insight(InsightPayload {
                title: "t".to_string(),
                description: String::new(),
                confidence: 1.,
                related_features: Vec::new(),
                kind: InsightKind::Pattern,
            }),
            Some(pos),
        );
        (wf, id)
    }

    #[test]
    fn commit_is_zoom_adjusted_and_ignores_intermediate_moves() {
        let (mut wf, id) = workflow_with_node(Pos2::new(100., 200.));
        let mut drag = DragInteraction::default();

        drag.begin(&mut wf, &id);
        drag.update(Vec2::new(400., 400.), 0.5);
        drag.update(Vec2::new(-80., 3.), 0.5);
        drag.finish(&mut wf, Vec2::new(50., 20.), 0.5);

        assert_eq!(wf.node(&id).unwrap().position(), Pos2::new(200., 240.));
        assert!(!drag.is_dragging());
        assert!(!wf.node(&id).unwrap().dragged());
    }

    #[test]
    fn abort_leaves_position_untouched() {
        let (mut wf, id) = workflow_with_node(Pos2::new(40., 60.));
        let mut drag = DragInteraction::default();

        drag.begin(&mut wf, &id);
        drag.update(Vec2::new(500., 500.), 1.);
        drag.abort(&mut wf);

        assert_eq!(wf.node(&id).unwrap().position(), Pos2::new(40., 60.));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn finish_for_vanished_node_is_a_silent_noop() {
        let (mut wf, id) = workflow_with_node(Pos2::new(0., 0.));
        let mut drag = DragInteraction::default();

        drag.begin(&mut wf, &id);
        wf.remove_node(&id);
        drag.finish(&mut wf, Vec2::new(10., 10.), 1.);

        assert!(wf.node(&id).is_none());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn begin_on_unknown_node_does_nothing() {
        let (mut wf, _) = workflow_with_node(Pos2::new(0., 0.));
        let mut drag = DragInteraction::default();
        drag.begin(&mut wf, "nope");
        assert!(!drag.is_dragging());
    }

    #[test]
    fn visual_position_tracks_the_live_offset() {
        let (mut wf, id) = workflow_with_node(Pos2::new(10., 10.));
        let mut drag = DragInteraction::default();

        drag.begin(&mut wf, &id);
        drag.update(Vec2::new(30., 0.), 2.);

        assert_eq!(
            drag.visual_position(&id, Pos2::new(10., 10.)),
            Pos2::new(25., 10.)
        );
        assert_eq!(
            drag.visual_position("other", Pos2::new(7., 7.)),
            Pos2::new(7., 7.)
        );
        // Nothing committed yet.
        assert_eq!(wf.node(&id).unwrap().position(), Pos2::new(10., 10.));
    }
}
