use egui::{Pos2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::elements::{
    Connection, ConnectionKind, DatasetPayload, DatasetStats, Node, NodePayload,
};
use crate::import::ParsedTable;
use crate::panel::FloatingPanelState;
use crate::sample;

/// Canvas position used for imported datasets when the caller does not pick one.
pub const DEFAULT_IMPORT_POS: Pos2 = Pos2::new(100., 200.);

/// What is currently selected on the canvas.
///
/// At most one node OR one connection, never both; selecting one side clears
/// the other.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Idle,
    Node(String),
    Connection(String),
}

/// The whole per-session canvas state: ordered node and connection lists,
/// selection, contextual panel and the unsaved-changes flag.
///
/// All mutation goes through the methods below; nothing here performs I/O and
/// nothing fails. Memory only, discarded with the session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Workflow {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    selection: Selection,
    panel: FloatingPanelState,

    #[serde(default)]
    dirty: bool,
    #[serde(default)]
    next_id: u64,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn panel(&self) -> &FloatingPanelState {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut FloatingPanelState {
        &mut self.panel
    }

    /// True when there are changes since the last [`Workflow::mark_saved`].
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id() == id)
    }

    pub fn has_dataset(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| matches!(n.payload(), NodePayload::Dataset(_)))
    }

    fn next_id_for(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Picks a spot for a node added without an explicit position: in the
    /// vicinity of the most recent node, or the default import spot on an
    /// empty canvas.
    fn vicinity_position(&self) -> Pos2 {
        match self.nodes.last() {
            Some(last) => {
                let mut rng = rand::rng();
                last.position()
                    + Vec2::new(
                        rng.random_range(-150.0..=150.0),
                        rng.random_range(-150.0..=150.0),
                    )
            }
            None => DEFAULT_IMPORT_POS,
        }
    }

    /// Adds a node and returns its generated id.
    pub fn add_node(&mut self, payload: NodePayload, position: Option<Pos2>) -> String {
        let id = self.next_id_for(payload.kind().as_str());
        let position = position.unwrap_or_else(|| self.vicinity_position());
        self.nodes.push(Node::new(id.clone(), position, payload));
        self.dirty = true;
        id
    }

    /// Removes a node and every connection referencing it, and no others.
    /// Unknown ids are a silent no-op.
    pub fn remove_node(&mut self, id: &str) {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id() != id);
        if self.nodes.len() == before {
            return;
        }

        self.connections.retain(|c| !c.touches(id));

        let selection_gone = match &self.selection {
            Selection::Idle => false,
            Selection::Node(selected) => selected == id,
            Selection::Connection(selected) => self.connection(selected).is_none(),
        };
        if selection_gone {
            self.selection = Selection::Idle;
        }
        self.dirty = true;
    }

    /// Adds a connection and returns its generated id. Endpoints are not
    /// validated; a dangling connection simply never renders.
    pub fn add_connection(
        &mut self,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        kind: ConnectionKind,
    ) -> String {
        let id = self.next_id_for("conn");
        self.connections
            .push(Connection::new(id.clone(), source_id, target_id, kind));
        self.dirty = true;
        id
    }

    pub fn remove_connection(&mut self, id: &str) {
        let before = self.connections.len();
        self.connections.retain(|c| c.id() != id);
        if self.connections.len() == before {
            return;
        }
        if self.selection == Selection::Connection(id.to_string()) {
            self.selection = Selection::Idle;
        }
        self.dirty = true;
    }

    /// Selects a node, clearing any connection selection. Unknown ids are
    /// ignored.
    pub fn select_node(&mut self, id: &str) {
        if self.node(id).is_none() {
            return;
        }
        self.apply_selection(Selection::Node(id.to_string()));
    }

    /// Selects a connection, clearing any node selection. Unknown ids are
    /// ignored.
    pub fn select_connection(&mut self, id: &str) {
        if self.connection(id).is_none() {
            return;
        }
        self.apply_selection(Selection::Connection(id.to_string()));
    }

    pub fn clear_selection(&mut self) {
        self.apply_selection(Selection::Idle);
    }

    /// A click on empty canvas: back to idle, contextual panel closed.
    pub fn click_background(&mut self) {
        self.clear_selection();
        self.panel.close();
    }

    fn apply_selection(&mut self, selection: Selection) {
        for node in &mut self.nodes {
            let selected = matches!(&selection, Selection::Node(id) if id == node.id());
            node.set_selected(selected);
        }
        for connection in &mut self.connections {
            let selected =
                matches!(&selection, Selection::Connection(id) if id == connection.id());
            connection.set_selected(selected);
        }
        self.selection = selection;
    }

    /// Commits a new absolute position for a node. Unknown ids are a silent
    /// no-op.
    pub fn move_node(&mut self, id: &str, position: Pos2) {
        if let Some(node) = self.node_mut(id) {
            node.set_position(position);
            self.dirty = true;
        }
    }

    /// Wraps a parsed table into a new dataset node at the given position,
    /// or [`DEFAULT_IMPORT_POS`] when none is given. Returns the node id.
    pub fn import_table(
        &mut self,
        table: &ParsedTable,
        name: &str,
        position: Option<Pos2>,
    ) -> String {
        let payload = NodePayload::Dataset(DatasetPayload {
            name: name.to_string(),
            stats: DatasetStats {
                rows: table.row_count as u32,
                columns: table.columns.len() as u32,
                missing_values: 0,
                duplicates: 0,
            },
            sample_rows: table.rows.clone(),
            columns: table.columns.clone(),
        });
        self.add_node(payload, Some(position.unwrap_or(DEFAULT_IMPORT_POS)))
    }

    /// Replaces the canvas content with the built-in sample workflow.
    pub fn load_sample(&mut self) {
        let (nodes, connections) = sample::sample_workflow();
        self.nodes = nodes;
        self.connections = connections;
        self.apply_selection(Selection::Idle);
        self.dirty = true;
    }
}
