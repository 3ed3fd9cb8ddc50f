pub mod markup;
pub mod model;
pub mod view;

pub use markup::render;
pub use model::{
    ArcSpec, Breakdown, ChartState, ClickOutcome, ClickTarget, InteractionMode, Segment, ZoomLevel,
};
pub use view::draw;

pub const VIEW_BOX_SIZE: f64 = 100.0;
pub const CENTER_X: f64 = 50.0;
pub const CENTER_Y: f64 = 50.0;
pub const RADIUS: f64 = 40.0;
pub const ARC_STROKE_WIDTH: f64 = 10.0; // view-box units
pub const ACTIVE_STROKE_WIDTH: f64 = 12.0;
pub const END_PADDING: f64 = 0.5; // degrees, hides hairline gaps between arcs
