mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    AxisOrientation, AxisPrimitive, AxisTickPrimitive, Color, LinePrimitive, PathPrimitive,
    TextHAlign, TextPrimitive,
};
pub use svg_renderer::{SVG_ELEMENT_ID, SvgRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so output code stays
/// isolated from data shaping and settings resolution.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
