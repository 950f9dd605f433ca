use egui::{CursorIcon, Key, PointerButton, Pos2, Response, Sense, Ui, Vec2, Widget};

use crate::drag::DragInteraction;
use crate::draw::{layout_connections, DrawContext, Drawer};
use crate::sensors::{DragSignal, KeyboardSensor, PointerSensor, TouchSensor};
use crate::settings::{SettingsInteraction, SettingsNavigation, SettingsStyle};
use crate::viewport::Viewport;
use crate::workflow::{Selection, Workflow};

#[cfg(feature = "events")]
use crate::events::{
    Event, EventSink, PayloadConnectionDeselect, PayloadConnectionSelect, PayloadNodeDeselect,
    PayloadNodeDragEnd, PayloadNodeDragStart, PayloadNodeMove, PayloadNodeSelect, PayloadPan,
    PayloadZoom,
};

/// Half-width of the clickable band around a connection path, in screen px.
const CONNECTION_HIT_TOLERANCE: f32 = 7.;

/// Per-widget interaction state kept in egui temp memory between frames.
#[derive(Clone, Default)]
struct InteractionState {
    drag: DragInteraction,
    pointer: PointerSensor,
    touch: TouchSensor,
    /// A pointer or touch drag just ended; the click egui may still report
    /// for that release must not change the selection.
    suppress_click: bool,
}

/// Widget for a data-analysis workflow canvas.
///
/// It implements [`egui::Widget`] and can be used like any other widget.
///
/// The widget takes a mutable reference to a [`Workflow`] and renders its
/// nodes and connections on an infinite pannable/zoomable surface. Nodes are
/// repositioned by pointer, touch or keyboard through one shared drag
/// contract; clicks drive the mutually exclusive node/connection selection;
/// a secondary click records the screen position for the contextual add-item
/// panel. Customize behavior with [`SettingsInteraction`],
/// [`SettingsNavigation`] and [`SettingsStyle`].
///
/// Viewport state persists in egui memory under the widget's custom id, so a
/// [`crate::Minimap`] created with the same id observes and drives the same
/// pan and zoom.
pub struct CanvasView<'a> {
    workflow: &'a mut Workflow,

    settings_interaction: SettingsInteraction,
    settings_navigation: SettingsNavigation,
    settings_style: SettingsStyle,

    custom_id: Option<String>,

    #[cfg(feature = "events")]
    events_sink: Option<&'a dyn EventSink>,
}

impl<'a> CanvasView<'a> {
    /// Creates a new `CanvasView` with default interaction, navigation and
    /// style settings.
    pub fn new(workflow: &'a mut Workflow) -> Self {
        Self {
            workflow,

            settings_interaction: SettingsInteraction::default(),
            settings_navigation: SettingsNavigation::default(),
            settings_style: SettingsStyle::default(),

            custom_id: None,

            #[cfg(feature = "events")]
            events_sink: None,
        }
    }

    pub fn with_interactions(mut self, settings: &SettingsInteraction) -> Self {
        self.settings_interaction = settings.clone();
        self
    }

    pub fn with_navigations(mut self, settings: &SettingsNavigation) -> Self {
        self.settings_navigation = settings.clone();
        self
    }

    pub fn with_styles(mut self, settings: &SettingsStyle) -> Self {
        self.settings_style = settings.clone();
        self
    }

    /// Sets a custom unique ID for this widget instance. Useful when several
    /// canvases live in the same UI and must keep their viewports separate.
    pub fn with_id(mut self, custom_id: Option<String>) -> Self {
        self.custom_id = custom_id;
        self
    }

    #[cfg(feature = "events")]
    /// Supply a sink that will receive interaction events. Works with
    /// `crossbeam::channel::Sender<Event>` and closures `Fn(Event)`.
    pub fn with_event_sink(mut self, sink: &'a dyn EventSink) -> Self {
        self.events_sink = Some(sink);
        self
    }
}

impl Widget for &mut CanvasView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (resp, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

        let mut viewport = Viewport::load(ui, self.custom_id.as_deref());
        let state_id = resp.id.with("interaction");
        let mut interaction = ui
            .data_mut(|data| data.get_temp::<InteractionState>(state_id))
            .unwrap_or_default();

        // Node drag first so panning doesn't kick in on the first frame of a
        // drag that starts over a node.
        self.handle_drag(ui, &resp, &mut interaction, &viewport);
        self.handle_keyboard(ui, &mut interaction, &viewport);
        self.handle_navigation(ui, &resp, &mut viewport, &interaction);
        self.handle_click(ui, &resp, &viewport, &mut interaction);
        self.update_cursor(ui, &resp, &interaction, &viewport);

        // Draw with the pan offset to the widget's screen position.
        let mut draw_viewport = viewport;
        draw_viewport.pan += resp.rect.left_top().to_vec2();
        let draw_ctx = DrawContext {
            ctx: ui.ctx(),
            painter: &painter,
            viewport: &draw_viewport,
            style: &self.settings_style,
        };
        Drawer::new(self.workflow, &interaction.drag, &draw_ctx).draw(resp.rect);

        viewport.save(ui, self.custom_id.as_deref());
        ui.data_mut(|data| data.insert_temp(state_id, interaction));

        resp
    }
}

impl CanvasView<'_> {
    /// Convert a screen-space position to widget-local position.
    fn local_pos(resp: &Response, p: Pos2) -> Pos2 {
        (p - resp.rect.left_top()).to_pos2()
    }

    /// Topmost node under a widget-local position, if any.
    fn node_at(&self, viewport: &Viewport, local_pos: Pos2) -> Option<String> {
        let canvas_pos = viewport.screen_to_canvas_pos(local_pos);
        self.workflow
            .nodes()
            .iter()
            .rev()
            .find(|n| n.rect().contains(canvas_pos))
            .map(|n| n.id().to_string())
    }

    fn connection_at(&self, viewport: &Viewport, local_pos: Pos2) -> Option<String> {
        layout_connections(self.workflow.connections(), self.workflow.nodes(), None)
            .iter()
            .find(|g| g.hit_test(viewport, local_pos, CONNECTION_HIT_TOLERANCE))
            .map(|g| g.connection_id.clone())
    }

    fn handle_drag(
        &mut self,
        ui: &Ui,
        resp: &Response,
        state: &mut InteractionState,
        viewport: &Viewport,
    ) {
        if !self.settings_interaction.dragging_enabled {
            return;
        }

        let (pressed, down, released, touching, time, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.any_touches(),
                i.time,
                i.pointer.latest_pos(),
            )
        });

        let mut signals: Vec<DragSignal> = Vec::new();

        if let Some(pos) = pointer_pos {
            let local = Self::local_pos(resp, pos);

            if pressed && resp.rect.contains(pos) {
                let node_id = self.node_at(viewport, local);
                if touching {
                    state.touch.on_press(local, node_id.as_deref(), time);
                } else {
                    state.pointer.on_press(local, node_id.as_deref());
                }
            } else if down {
                signals.extend(state.pointer.on_move(local));
                signals.extend(state.touch.on_move(local, time));
            }

            if released {
                signals.extend(state.pointer.on_release(local));
                signals.extend(state.touch.on_release(local));
            }
        }

        if ui.input(|i| i.key_pressed(Key::Escape)) {
            signals.extend(state.pointer.cancel());
            signals.extend(state.touch.cancel());
        }

        for signal in signals {
            // The release ending a pointer or touch drag may still register
            // as a click; keyboard moves have no release to suppress.
            if matches!(signal, DragSignal::Commit { .. } | DragSignal::Abort) {
                state.suppress_click = true;
            }
            self.apply_signal(state, signal, viewport);
        }
    }

    /// Arrow keys move the selected node by a discrete step, through the same
    /// drag contract as the pointer and touch sensors.
    fn handle_keyboard(&mut self, ui: &Ui, state: &mut InteractionState, viewport: &Viewport) {
        if !self.settings_interaction.dragging_enabled || state.drag.is_dragging() {
            return;
        }
        let Selection::Node(node_id) = self.workflow.selection().clone() else {
            return;
        };

        let direction = ui.input(|i| {
            let mut dir = Vec2::ZERO;
            if i.key_pressed(Key::ArrowLeft) {
                dir.x -= 1.;
            }
            if i.key_pressed(Key::ArrowRight) {
                dir.x += 1.;
            }
            if i.key_pressed(Key::ArrowUp) {
                dir.y -= 1.;
            }
            if i.key_pressed(Key::ArrowDown) {
                dir.y += 1.;
            }
            dir
        });
        if direction == Vec2::ZERO {
            return;
        }

        for signal in KeyboardSensor::default().on_key(&node_id, direction) {
            self.apply_signal(state, signal, viewport);
        }
    }

    fn apply_signal(&mut self, state: &mut InteractionState, signal: DragSignal, viewport: &Viewport) {
        match signal {
            DragSignal::Begin { node_id } => {
                state.drag.begin(self.workflow, &node_id);

                #[cfg(feature = "events")]
                if state.drag.is_dragging() {
                    self.publish_event(Event::NodeDragStart(PayloadNodeDragStart { id: node_id }));
                }
            }
            DragSignal::Update { raw_delta } => {
                state.drag.update(raw_delta, viewport.zoom);

                #[cfg(feature = "events")]
                if let Some(id) = state.drag.active_node() {
                    self.publish_event(Event::NodeMove(PayloadNodeMove {
                        id: id.to_string(),
                        offset: (raw_delta / viewport.zoom).into(),
                    }));
                }
            }
            DragSignal::Commit { raw_delta } => {
                #[cfg(feature = "events")]
                let active_id = state.drag.active_node().map(str::to_string);

                state.drag.finish(self.workflow, raw_delta, viewport.zoom);

                #[cfg(feature = "events")]
                if let Some(id) = active_id {
                    if let Some(node) = self.workflow.node(&id) {
                        self.publish_event(Event::NodeDragEnd(PayloadNodeDragEnd {
                            id,
                            new_pos: node.position().into(),
                        }));
                    }
                }
            }
            DragSignal::Abort => {
                state.drag.abort(self.workflow);
            }
        }
    }

    fn handle_navigation(
        &mut self,
        ui: &Ui,
        resp: &Response,
        viewport: &mut Viewport,
        state: &InteractionState,
    ) {
        if !self.settings_navigation.zoom_and_pan_enabled {
            return;
        }

        // Pinch or ctrl+wheel zooms about the cursor.
        if resp.hovered() {
            let zoom_delta = ui.input(|i| i.zoom_delta());
            if zoom_delta != 1. {
                let step = self.settings_navigation.zoom_step * (zoom_delta - 1.).signum();
                let center = ui
                    .input(|i| i.pointer.hover_pos())
                    .map_or_else(|| (resp.rect.size() / 2.).to_pos2(), |p| Self::local_pos(resp, p));
                self.zoom_at(center, step, viewport);
            }

            // Plain wheel scroll pans.
            let scroll = ui.input(|i| i.smooth_scroll_delta);
            if scroll != Vec2::ZERO {
                self.set_pan(viewport.pan + scroll, viewport);
            }
        }

        // Dragging empty canvas pans; an armed node drag never does.
        let node_drag = state.drag.is_dragging()
            || state.pointer.is_armed()
            || state.touch.is_armed();
        if (resp.dragged_by(PointerButton::Primary) || resp.dragged_by(PointerButton::Middle))
            && !node_drag
            && resp.drag_delta() != Vec2::ZERO
        {
            self.set_pan(viewport.pan + resp.drag_delta(), viewport);
        }
    }

    fn handle_click(
        &mut self,
        ui: &Ui,
        resp: &Response,
        viewport: &Viewport,
        state: &mut InteractionState,
    ) {
        if resp.secondary_clicked() && self.settings_interaction.context_menu_enabled {
            if let Some(pos) = resp.hover_pos() {
                if !self.workflow.is_empty() {
                    self.workflow.panel_mut().open_at(pos);
                }
            }
            return;
        }

        if !resp.clicked() {
            // A release without a click ends whatever drag set the flag; it
            // must not survive to swallow the next real click.
            if state.suppress_click && ui.input(|i| i.pointer.any_released()) {
                state.suppress_click = false;
            }
            return;
        }
        if state.suppress_click {
            state.suppress_click = false;
            return;
        }
        let Some(pos) = resp.hover_pos() else {
            return;
        };
        let local = Self::local_pos(resp, pos);

        #[cfg(feature = "events")]
        let before = self.workflow.selection().clone();

        if let Some(node_id) = self.node_at(viewport, local) {
            if self.settings_interaction.node_selection_enabled {
                self.workflow.select_node(&node_id);
            }
        } else if let Some(connection_id) = self.connection_at(viewport, local) {
            if self.settings_interaction.connection_selection_enabled {
                self.workflow.select_connection(&connection_id);
            }
        } else {
            // Click on empty canvas: back to idle, contextual panel closed.
            self.workflow.click_background();
        }

        #[cfg(feature = "events")]
        self.publish_selection_change(&before, &self.workflow.selection().clone());
    }

    fn update_cursor(
        &self,
        ui: &Ui,
        resp: &Response,
        state: &InteractionState,
        viewport: &Viewport,
    ) {
        if state.drag.is_dragging() {
            ui.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
            return;
        }
        if let Some(pos) = resp.hover_pos() {
            if self.node_at(viewport, Self::local_pos(resp, pos)).is_some() {
                ui.output_mut(|o| o.cursor_icon = CursorIcon::PointingHand);
            }
        }
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn set_pan(&self, new_pan: Vec2, viewport: &mut Viewport) {
        let diff = new_pan - viewport.pan;
        if diff == Vec2::ZERO {
            return;
        }

        viewport.pan_by(diff);

        #[cfg(feature = "events")]
        self.publish_event(Event::Pan(PayloadPan {
            diff: diff.into(),
            new_pan: new_pan.into(),
        }));
    }

    #[allow(unused_variables, clippy::unused_self)]
    fn zoom_at(&self, local_center: Pos2, step: f32, viewport: &mut Viewport) {
        let before = viewport.zoom;
        viewport.zoom_at(local_center, step);
        let diff = viewport.zoom - before;
        if diff == 0. {
            return;
        }

        #[cfg(feature = "events")]
        self.publish_event(Event::Zoom(PayloadZoom {
            diff,
            new_zoom: viewport.zoom,
        }));
    }

    #[cfg(feature = "events")]
    fn publish_selection_change(&self, before: &Selection, after: &Selection) {
        if before == after {
            return;
        }
        match before {
            Selection::Node(id) => {
                self.publish_event(Event::NodeDeselect(PayloadNodeDeselect { id: id.clone() }));
            }
            Selection::Connection(id) => {
                self.publish_event(Event::ConnectionDeselect(PayloadConnectionDeselect {
                    id: id.clone(),
                }));
            }
            Selection::Idle => {}
        }
        match after {
            Selection::Node(id) => {
                self.publish_event(Event::NodeSelect(PayloadNodeSelect { id: id.clone() }));
            }
            Selection::Connection(id) => {
                self.publish_event(Event::ConnectionSelect(PayloadConnectionSelect {
                    id: id.clone(),
                }));
            }
            Selection::Idle => {}
        }
    }

    #[cfg(feature = "events")]
    fn publish_event(&self, event: Event) {
        if let Some(sink) = self.events_sink {
            sink.send(event);
        }
    }
}
