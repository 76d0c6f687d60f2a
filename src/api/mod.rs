mod layout;
mod object_enumeration;
mod palette;
mod render_frame_builder;
mod settings;
mod tick_format;
mod update_options;
mod visual;

pub use layout::RenderLayout;
pub use object_enumeration::VisualObjectInstance;
pub use palette::{DEFAULT_THEME_COLORS, PaletteProvider, StaticPalette};
pub use render_frame_builder::{
    FrameRequest, build_render_frame, effective_axis_width, effective_line_width,
    effective_value_tick_count, resolve_value_domain,
};
pub use settings::{
    CHART_SETTINGS_OBJECT, ChartSettings, DATA_POINT_OBJECT, DataPointSettings,
    PartialChartSettings, PartialDataPointSettings, VisualSettings,
};
pub use tick_format::{TickFormat, format_value_tick};
pub use update_options::{DataView, DataViewMetadata, VisualUpdateOptions};
pub use visual::{LineChartVisual, RenderSummary, VisualConfig};
