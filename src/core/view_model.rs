use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::data_view::{CategoricalDataView, ValueColumn};

/// How the global value extrema are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtremaPolicy {
    /// Extrema start at 0, so the value domain always contains zero.
    #[default]
    IncludeZero,
    /// Extrema are the true min/max of the emitted values (0/0 when empty).
    DataOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataSeriesDataPoint {
    pub value: f64,
    pub category: DateTime<Utc>,
    pub highlighted: bool,
}

impl DataSeriesDataPoint {
    #[must_use]
    pub fn new(category: DateTime<Utc>, value: f64, highlighted: bool) -> Self {
        Self {
            value,
            category,
            highlighted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSeries {
    pub name: String,
    pub data_points: Vec<DataSeriesDataPoint>,
}

impl DataSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, data_points: Vec<DataSeriesDataPoint>) -> Self {
        Self {
            name: name.into(),
            data_points,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }

    /// Earliest and latest category of this series.
    #[must_use]
    pub fn category_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.data_points.first()?.category;
        Some(self.data_points.iter().fold((first, first), |(min, max), point| {
            (min.min(point.category), max.max(point.category))
        }))
    }
}

/// Renderer-ready data for one update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineChartViewModel {
    pub data_series: Vec<DataSeries>,
    pub data_max: f64,
    pub data_min: f64,
}

impl LineChartViewModel {
    /// The no-data state: no series and a `[0, 0]` value range.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.data_series.iter().map(|series| series.data_points.len()).sum()
    }

    /// Union of every series' category range.
    #[must_use]
    pub fn time_domain(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.data_series
            .iter()
            .filter_map(DataSeries::category_range)
            .reduce(|(min, max), (start, end)| (min.min(start), max.max(end)))
    }
}

/// Builds the view model with the default (zero-seeded) extrema.
#[must_use]
pub fn transform(data: &CategoricalDataView) -> LineChartViewModel {
    transform_with_policy(data, ExtremaPolicy::default())
}

/// Reshapes host columns into one series per measure column.
///
/// Rows whose category or value is missing are skipped with a warning; they
/// never abort the transform. Missing category or measure columns yield
/// `LineChartViewModel::empty()`.
#[must_use]
pub fn transform_with_policy(data: &CategoricalDataView, policy: ExtremaPolicy) -> LineChartViewModel {
    let (Some(category), Some(measures)) = (data.category(), data.measures()) else {
        debug!("categorical data has no category or measure columns; using empty view model");
        return LineChartViewModel::empty();
    };

    let longest_measure = measures
        .iter()
        .map(|column| column.values.len())
        .max()
        .unwrap_or(0);
    let len = category.values.len().max(longest_measure);

    let data_series: Vec<DataSeries> = measures
        .iter()
        .enumerate()
        .map(|(series_index, column)| build_series(series_index, column, &category.values, len))
        .collect();

    let (data_min, data_max) = value_extrema(&data_series, policy);
    debug!(
        series = data_series.len(),
        rows = len,
        data_min,
        data_max,
        "built line chart view model"
    );

    LineChartViewModel {
        data_series,
        data_max,
        data_min,
    }
}

fn build_series(
    series_index: usize,
    column: &ValueColumn,
    categories: &[Option<DateTime<Utc>>],
    len: usize,
) -> DataSeries {
    let mut data_points = Vec::with_capacity(len);

    for index in 0..len {
        let Some(category) = categories.get(index).copied().flatten() else {
            warn!(series_index, index, "date axis is missing for row; row skipped");
            continue;
        };
        let Some(value) = column.values.get(index).copied().flatten() else {
            warn!(series_index, index, "measure is missing for row; row skipped");
            continue;
        };
        if !value.is_finite() {
            warn!(series_index, index, value, "measure is not finite; row skipped");
            continue;
        }

        data_points.push(DataSeriesDataPoint::new(
            category,
            value,
            column.is_highlighted(index),
        ));
    }

    trace!(
        series_index,
        name = %column.source.display_name,
        points = data_points.len(),
        "built data series"
    );
    DataSeries::new(column.source.display_name.clone(), data_points)
}

fn value_extrema(series: &[DataSeries], policy: ExtremaPolicy) -> (f64, f64) {
    let mut values = series
        .iter()
        .flat_map(|series| series.data_points.iter().map(|point| point.value));

    let seed = match policy {
        ExtremaPolicy::IncludeZero => Some((0.0, 0.0)),
        ExtremaPolicy::DataOnly => values.next().map(|first| (first, first)),
    };

    seed.map(|seed| values.fold(seed, |(min, max), value| (min.min(value), max.max(value))))
        .unwrap_or((0.0, 0.0))
}
