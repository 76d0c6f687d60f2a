use chrono::{TimeZone, Utc};
use line_visual::core::{
    DataSeries, DataSeriesDataPoint, LineChartViewModel, NoHighlightPolicy, SliceOutcome, slice,
    slice_outcome, slice_series,
};

fn series(flags: &[bool]) -> DataSeries {
    let points = flags
        .iter()
        .enumerate()
        .map(|(index, highlighted)| {
            let category = Utc
                .with_ymd_and_hms(2024, 3, index as u32 + 1, 0, 0, 0)
                .unwrap();
            DataSeriesDataPoint::new(category, index as f64, *highlighted)
        })
        .collect();
    DataSeries::new("Sales", points)
}

#[test]
fn slice_keeps_prefix_through_last_highlight() {
    let sliced = slice_series(
        series(&[true, false, true, false]),
        NoHighlightPolicy::EmptyResult,
    );
    let values: Vec<f64> = sliced.data_points.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![0.0, 1.0, 2.0]);
}

#[test]
fn slice_without_highlight_is_empty_by_default() {
    let sliced = slice_series(series(&[false, false, false]), NoHighlightPolicy::default());
    assert!(sliced.data_points.is_empty());
    assert_eq!(sliced.name, "Sales");
}

#[test]
fn full_series_policy_keeps_unhighlighted_series() {
    let sliced = slice_series(series(&[false, false]), NoHighlightPolicy::FullSeries);
    assert_eq!(sliced.data_points.len(), 2);
}

#[test]
fn fully_highlighted_series_is_untouched() {
    let original = series(&[true, true, true]);
    let sliced = slice_series(original.clone(), NoHighlightPolicy::EmptyResult);
    assert_eq!(sliced, original);
}

#[test]
fn slice_preserves_series_count() {
    let input = vec![
        series(&[true, false]),
        series(&[false, false]),
        DataSeries::new("Empty", Vec::new()),
    ];
    let sliced = slice(input, NoHighlightPolicy::EmptyResult);
    let lengths: Vec<usize> = sliced.iter().map(|series| series.data_points.len()).collect();
    assert_eq!(lengths, vec![1, 0, 0]);
}

#[test]
fn outcome_reports_cut_index() {
    assert_eq!(
        slice_outcome(&series(&[false, true, false]).data_points),
        SliceOutcome::ThroughIndex(1)
    );
    assert_eq!(slice_outcome(&[]), SliceOutcome::NoHighlight);
}

#[test]
fn sliced_view_model_keeps_extrema() {
    let view_model = LineChartViewModel {
        data_series: vec![series(&[true, false, false])],
        data_max: 2.0,
        data_min: 0.0,
    };
    let sliced = view_model.sliced(NoHighlightPolicy::EmptyResult);
    assert_eq!(sliced.data_series[0].data_points.len(), 1);
    assert_eq!(sliced.data_max, 2.0);
}
