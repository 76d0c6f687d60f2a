pub mod data_view;
pub mod scale;
pub mod slicer;
pub mod time_scale;
pub mod types;
pub mod view_model;

pub use data_view::{CategoricalDataView, CategoryColumn, ColumnSource, ValueColumn};
pub use scale::{LinearScale, nice_ticks};
pub use slicer::{NoHighlightPolicy, SliceOutcome, slice, slice_outcome, slice_series};
pub use time_scale::{TimeScale, TimeTickInterval, format_time_tick};
pub use types::{Viewport, datetime_to_unix_millis, unix_millis_to_datetime};
pub use view_model::{
    DataSeries, DataSeriesDataPoint, ExtremaPolicy, LineChartViewModel, transform,
    transform_with_policy,
};
