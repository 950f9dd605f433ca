use egui::{Pos2, Vec2};

/// What a sensor asks the drag controller to do. All deltas are cumulative
/// screen-space movement since the drag was recognized; zoom adjustment
/// happens in the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum DragSignal {
    Begin { node_id: String },
    Update { raw_delta: Vec2 },
    Commit { raw_delta: Vec2 },
    Abort,
}

#[derive(Clone, Debug)]
struct PointerPress {
    node_id: String,
    press_pos: Pos2,
}

/// Mouse activation: a press over a node arms the sensor, but a drag is only
/// recognized once the pointer has travelled a minimum distance, so plain
/// clicks never move nodes.
#[derive(Clone, Debug)]
pub struct PointerSensor {
    threshold: f32,
    pending: Option<PointerPress>,
    engaged: bool,
}

impl Default for PointerSensor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl PointerSensor {
    pub const DEFAULT_THRESHOLD: f32 = 3.;

    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            pending: None,
            engaged: false,
        }
    }

    /// True between a press over a node and the matching release.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn on_press(&mut self, pos: Pos2, node_id: Option<&str>) {
        self.pending = node_id.map(|id| PointerPress {
            node_id: id.to_string(),
            press_pos: pos,
        });
        self.engaged = false;
    }

    pub fn on_move(&mut self, pos: Pos2) -> Vec<DragSignal> {
        let Some(press) = &self.pending else {
            return Vec::new();
        };
        let raw_delta = pos - press.press_pos;

        if self.engaged {
            return vec![DragSignal::Update { raw_delta }];
        }
        if raw_delta.length() < self.threshold {
            return Vec::new();
        }

        self.engaged = true;
        vec![
            DragSignal::Begin {
                node_id: press.node_id.clone(),
            },
            DragSignal::Update { raw_delta },
        ]
    }

    pub fn on_release(&mut self, pos: Pos2) -> Option<DragSignal> {
        let press = self.pending.take()?;
        let engaged = self.engaged;
        self.engaged = false;

        engaged.then(|| DragSignal::Commit {
            raw_delta: pos - press.press_pos,
        })
    }

    pub fn cancel(&mut self) -> Option<DragSignal> {
        let engaged = self.engaged;
        self.pending = None;
        self.engaged = false;
        engaged.then_some(DragSignal::Abort)
    }
}

#[derive(Clone, Debug)]
struct TouchPress {
    node_id: String,
    press_pos: Pos2,
    press_time: f64,
}

/// Touch activation: a short hold is required before the drag engages, and
/// movement beyond a small tolerance during the hold disarms the sensor so
/// the gesture stays a scroll.
#[derive(Clone, Debug)]
pub struct TouchSensor {
    delay: f64,
    tolerance: f32,
    pending: Option<TouchPress>,
    engaged: bool,
}

impl Default for TouchSensor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, Self::DEFAULT_TOLERANCE)
    }
}

impl TouchSensor {
    /// Hold duration in seconds before a touch becomes a drag.
    pub const DEFAULT_DELAY: f64 = 0.1;
    /// Movement allowed during the hold, in screen pixels.
    pub const DEFAULT_TOLERANCE: f32 = 5.;

    pub fn new(delay: f64, tolerance: f32) -> Self {
        Self {
            delay,
            tolerance,
            pending: None,
            engaged: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn on_press(&mut self, pos: Pos2, node_id: Option<&str>, time: f64) {
        self.pending = node_id.map(|id| TouchPress {
            node_id: id.to_string(),
            press_pos: pos,
            press_time: time,
        });
        self.engaged = false;
    }

    pub fn on_move(&mut self, pos: Pos2, time: f64) -> Vec<DragSignal> {
        let Some(press) = &self.pending else {
            return Vec::new();
        };
        let raw_delta = pos - press.press_pos;

        if self.engaged {
            return vec![DragSignal::Update { raw_delta }];
        }

        if time - press.press_time < self.delay {
            if raw_delta.length() > self.tolerance {
                // Moved too early: this is a scroll, not a drag.
                self.pending = None;
            }
            return Vec::new();
        }

        self.engaged = true;
        vec![
            DragSignal::Begin {
                node_id: press.node_id.clone(),
            },
            DragSignal::Update { raw_delta },
        ]
    }

    pub fn on_release(&mut self, pos: Pos2) -> Option<DragSignal> {
        let press = self.pending.take()?;
        let engaged = self.engaged;
        self.engaged = false;

        engaged.then(|| DragSignal::Commit {
            raw_delta: pos - press.press_pos,
        })
    }

    pub fn cancel(&mut self) -> Option<DragSignal> {
        let engaged = self.engaged;
        self.pending = None;
        self.engaged = false;
        engaged.then_some(DragSignal::Abort)
    }
}

/// Keyboard activation: each arrow key press moves the selected node by one
/// discrete screen-space step, funneled through the same begin/update/commit
/// contract as the other sensors.
#[derive(Clone, Debug)]
pub struct KeyboardSensor {
    step: f32,
}

impl Default for KeyboardSensor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

impl KeyboardSensor {
    /// Screen pixels per key press.
    pub const DEFAULT_STEP: f32 = 25.;

    pub fn new(step: f32) -> Self {
        Self { step }
    }

    pub fn on_key(&self, node_id: &str, direction: Vec2) -> Vec<DragSignal> {
        let raw_delta = direction * self.step;
        vec![
            DragSignal::Begin {
                node_id: node_id.to_string(),
            },
            DragSignal::Update { raw_delta },
            DragSignal::Commit { raw_delta },
        ]
    }
}
