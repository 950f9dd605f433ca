mod event;
mod sink;

pub use event::{
    Event, PayloadConnectionDeselect, PayloadConnectionSelect, PayloadNodeDeselect,
    PayloadNodeDragEnd, PayloadNodeDragStart, PayloadNodeMove, PayloadNodeSelect, PayloadPan,
    PayloadZoom,
};

pub use sink::EventSink;
