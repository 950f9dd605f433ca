mod connection_shape;
mod drawer;
mod geometry;
mod node_shapes;

pub use connection_shape::ConnectionShapeBuilder;
pub use drawer::{DrawContext, Drawer};
pub use geometry::{
    bezier_points, layout_connection, layout_connections, ConnectionGeometry, CorrelationLabel,
    MAX_CONTROL_OFFSET,
};
