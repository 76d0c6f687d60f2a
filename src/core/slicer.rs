use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::view_model::{DataSeries, DataSeriesDataPoint, LineChartViewModel};

/// What to keep of a series that has no highlighted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoHighlightPolicy {
    /// Drop every point; the series renders as nothing.
    #[default]
    EmptyResult,
    /// Keep the series untouched.
    FullSeries,
}

/// Where a series gets cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Keep points `0..=index`.
    ThroughIndex(usize),
    NoHighlight,
}

#[must_use]
pub fn slice_outcome(points: &[DataSeriesDataPoint]) -> SliceOutcome {
    points
        .iter()
        .rposition(|point| point.highlighted)
        .map_or(SliceOutcome::NoHighlight, SliceOutcome::ThroughIndex)
}

/// Truncates one series to the prefix ending at its last highlighted point.
#[must_use]
pub fn slice_series(mut series: DataSeries, policy: NoHighlightPolicy) -> DataSeries {
    let before = series.data_points.len();
    match (slice_outcome(&series.data_points), policy) {
        (SliceOutcome::ThroughIndex(index), _) => series.data_points.truncate(index + 1),
        (SliceOutcome::NoHighlight, NoHighlightPolicy::EmptyResult) => series.data_points.clear(),
        (SliceOutcome::NoHighlight, NoHighlightPolicy::FullSeries) => {}
    }
    trace!(
        name = %series.name,
        before,
        after = series.data_points.len(),
        "sliced series to selection"
    );
    series
}

/// Slices every series independently; the series count never changes.
#[must_use]
pub fn slice(series: Vec<DataSeries>, policy: NoHighlightPolicy) -> Vec<DataSeries> {
    series
        .into_iter()
        .map(|series| slice_series(series, policy))
        .collect()
}

impl LineChartViewModel {
    /// Applies `slice` to every series, keeping the computed extrema.
    #[must_use]
    pub fn sliced(mut self, policy: NoHighlightPolicy) -> Self {
        self.data_series = slice(self.data_series, policy);
        self
    }
}
