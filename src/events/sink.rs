use super::Event;

/// Receives interaction events from the canvas widget.
///
/// Implemented for `crossbeam` senders and plain closures, so callers can
/// pick between channel fan-out and inline handling.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        let _ = crossbeam::channel::Sender::send(self, event);
    }
}

impl<F: Fn(Event)> EventSink for F {
    fn send(&self, event: Event) {
        self(event);
    }
}
