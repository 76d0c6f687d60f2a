use tracing::{debug, trace, warn};

use crate::core::{
    LineChartViewModel, LinearScale, NoHighlightPolicy, TimeScale, Viewport, format_time_tick,
};
use crate::error::ChartResult;
use crate::render::{
    AxisOrientation, AxisPrimitive, AxisTickPrimitive, LinePrimitive, PathPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

use super::layout::RenderLayout;
use super::palette::PaletteProvider;
use super::settings::ChartSettings;
use super::tick_format::TickFormat;

// Baseline shifts matching the usual SVG axis conventions.
const BOTTOM_LABEL_DY_EM: f64 = 0.71;
const LEFT_LABEL_DY_EM: f64 = 0.32;

/// Everything one render pass needs besides the view model.
pub struct FrameRequest<'a> {
    pub viewport: Viewport,
    pub settings: &'a ChartSettings,
    pub layout: &'a RenderLayout,
    pub palette: &'a dyn PaletteProvider,
    pub slice_policy: NoHighlightPolicy,
}

/// Builds the full scene from an unsliced view model.
///
/// Domains are computed before slicing so a truncated line keeps its place on
/// the full time axis. A view model without points yields an empty frame.
pub fn build_render_frame(
    view_model: LineChartViewModel,
    request: &FrameRequest<'_>,
) -> ChartResult<RenderFrame> {
    let viewport = request.viewport.validate()?;
    let layout = request.layout;
    let mut frame = RenderFrame::new(viewport);

    let Some((time_start, time_end)) = view_model.time_domain() else {
        debug!(
            series = view_model.data_series.len(),
            "view model has no points; rendering empty chart"
        );
        return Ok(frame);
    };

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let time_scale = TimeScale::new(time_start, time_end)?
        .with_range(layout.plot_inset_x_px, width - layout.plot_inset_x_px)?;
    let (value_min, value_max) =
        resolve_value_domain(request.settings, &view_model, layout.value_domain_padding);
    let value_scale = LinearScale::new(value_min, value_max)?
        .with_range(height - layout.plot_inset_y_px, layout.plot_inset_y_px)?;

    let line_width = effective_line_width(request.settings, layout);
    let sliced = view_model.sliced(request.slice_policy);
    for (index, series) in sliced.data_series.iter().enumerate() {
        if series.is_empty() {
            trace!(index, name = %series.name, "series has no visible points; path skipped");
            continue;
        }
        let points = series
            .data_points
            .iter()
            .map(|point| -> ChartResult<(f64, f64)> {
                Ok((time_scale.map(point.category)?, value_scale.map(point.value)?))
            })
            .collect::<ChartResult<Vec<_>>>()?;
        frame.series_paths.push(PathPrimitive::new(
            points,
            line_width,
            request.palette.color_for_series(index),
        ));
    }

    let axis_width = effective_axis_width(request.settings, layout);
    frame
        .axes
        .push(time_axis(time_scale, height, axis_width, layout)?);
    frame.axes.push(value_axis(
        value_scale,
        request.settings,
        axis_width,
        layout,
    )?);

    debug!(
        paths = frame.series_paths.len(),
        value_min,
        value_max,
        "built render frame"
    );
    Ok(frame)
}

/// Vertical domain: forced bounds when usable, else the view-model extrema,
/// with the upper bound padded.
///
/// An inverted or empty forced domain falls back to the computed one.
#[must_use]
pub fn resolve_value_domain(
    settings: &ChartSettings,
    view_model: &LineChartViewModel,
    padding: f64,
) -> (f64, f64) {
    let computed = non_degenerate(view_model.data_min, view_model.data_max + padding);

    let forced_min = settings.y_min.filter(|value| value.is_finite());
    let forced_max = settings.y_max.filter(|value| value.is_finite());
    if forced_min.is_none() && forced_max.is_none() {
        return computed;
    }
    if let (Some(min), Some(max)) = (forced_min, forced_max) {
        if min >= max {
            warn!(y_min = min, y_max = max, "forced value domain is inverted; using data extrema");
            return computed;
        }
    }

    let candidate = (
        forced_min.unwrap_or(view_model.data_min),
        forced_max.unwrap_or(view_model.data_max) + padding,
    );
    if candidate.0 < candidate.1 {
        candidate
    } else {
        warn!(
            min = candidate.0,
            max = candidate.1,
            "forced value bound leaves an empty domain; using data extrema"
        );
        computed
    }
}

/// Widens an empty domain by a step large enough to survive rounding at `min`'s magnitude.
fn non_degenerate(min: f64, max: f64) -> (f64, f64) {
    if min < max {
        return (min, max);
    }
    let step = (min.abs() * f64::EPSILON * 4.0).max(1.0);
    if (min + step).is_finite() {
        (min, min + step)
    } else {
        (min - step, min)
    }
}

#[must_use]
pub fn effective_line_width(settings: &ChartSettings, layout: &RenderLayout) -> f64 {
    positive_or(settings.line_width, layout.default_line_width_px)
}

#[must_use]
pub fn effective_axis_width(settings: &ChartSettings, layout: &RenderLayout) -> f64 {
    positive_or(settings.axis_width, layout.default_axis_width_px)
}

/// `yTicks` clamped into `1..=layout.max_value_ticks`.
#[must_use]
pub fn effective_value_tick_count(settings: &ChartSettings, layout: &RenderLayout) -> usize {
    let max = i64::try_from(layout.max_value_ticks).unwrap_or(i64::MAX).max(1);
    let clamped = settings.y_ticks.clamp(1, max);
    if clamped != settings.y_ticks {
        warn!(y_ticks = settings.y_ticks, clamped, "y tick count out of range; clamped");
    }
    usize::try_from(clamped).unwrap_or(1)
}

fn positive_or(value: Option<f64>, fallback: f64) -> f64 {
    value
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(fallback)
}

fn time_axis(
    scale: TimeScale,
    height: f64,
    stroke_width: f64,
    layout: &RenderLayout,
) -> ChartResult<AxisPrimitive> {
    let label_y = layout.tick_size_px + layout.tick_padding_px;
    let ticks = scale
        .ticks(layout.time_tick_count)?
        .into_iter()
        .map(|tick| -> ChartResult<AxisTickPrimitive> {
            Ok(AxisTickPrimitive {
                position: scale.map(tick)?,
                mark: LinePrimitive::new(0.0, 0.0, 0.0, layout.tick_size_px),
                label: TextPrimitive::new(
                    format_time_tick(tick),
                    0.0,
                    label_y,
                    layout.label_font_size_em,
                    layout.label_color,
                    TextHAlign::Middle,
                )
                .with_dy_em(BOTTOM_LABEL_DY_EM),
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    let (range_start, range_end) = scale.range();
    Ok(AxisPrimitive {
        orientation: AxisOrientation::Bottom,
        offset_x: 0.0,
        offset_y: height - layout.plot_inset_y_px,
        domain_line: LinePrimitive::new(range_start, 0.0, range_end, 0.0),
        ticks,
        stroke_width,
        stroke_color: layout.axis_color,
    })
}

fn value_axis(
    scale: LinearScale,
    settings: &ChartSettings,
    stroke_width: f64,
    layout: &RenderLayout,
) -> ChartResult<AxisPrimitive> {
    let format = TickFormat::resolve(&settings.y_tick_format);
    let label_x = -(layout.tick_size_px + layout.tick_padding_px);
    let ticks = scale
        .ticks(effective_value_tick_count(settings, layout))
        .into_iter()
        .map(|tick| -> ChartResult<AxisTickPrimitive> {
            Ok(AxisTickPrimitive {
                position: scale.map(tick)?,
                mark: LinePrimitive::new(0.0, 0.0, -layout.tick_size_px, 0.0),
                label: TextPrimitive::new(
                    format.format(tick),
                    label_x,
                    0.0,
                    layout.label_font_size_em,
                    layout.label_color,
                    TextHAlign::End,
                )
                .with_dy_em(LEFT_LABEL_DY_EM),
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    let (range_start, range_end) = scale.range();
    Ok(AxisPrimitive {
        orientation: AxisOrientation::Left,
        offset_x: layout.plot_inset_x_px,
        offset_y: 0.0,
        domain_line: LinePrimitive::new(0.0, range_start, 0.0, range_end),
        ticks,
        stroke_width,
        stroke_color: layout.axis_color,
    })
}

#[cfg(test)]
mod tests {
    use super::{effective_line_width, effective_value_tick_count, resolve_value_domain};
    use crate::api::{ChartSettings, RenderLayout};
    use crate::core::LineChartViewModel;

    fn view_model(data_min: f64, data_max: f64) -> LineChartViewModel {
        LineChartViewModel {
            data_series: Vec::new(),
            data_max,
            data_min,
        }
    }

    #[test]
    fn computed_domain_is_padded_on_top() {
        let settings = ChartSettings::default();
        assert_eq!(resolve_value_domain(&settings, &view_model(0.0, 30.0), 10.0), (0.0, 40.0));
    }

    #[test]
    fn flat_large_domain_is_widened_past_rounding() {
        let settings = ChartSettings::default();
        let (min, max) = resolve_value_domain(&settings, &view_model(1e20, 1e20), 10.0);
        assert_eq!(min, 1e20);
        assert!(max > min && max.is_finite());

        let (min, max) = resolve_value_domain(&settings, &view_model(f64::MAX, f64::MAX), 10.0);
        assert!(min < max);
        assert_eq!(max, f64::MAX);
    }

    #[test]
    fn forced_bounds_override_extrema() {
        let settings = ChartSettings {
            y_min: Some(-5.0),
            y_max: Some(100.0),
            ..ChartSettings::default()
        };
        assert_eq!(resolve_value_domain(&settings, &view_model(0.0, 30.0), 10.0), (-5.0, 110.0));
    }

    #[test]
    fn inverted_forced_domain_falls_back() {
        let settings = ChartSettings {
            y_min: Some(50.0),
            y_max: Some(10.0),
            ..ChartSettings::default()
        };
        assert_eq!(resolve_value_domain(&settings, &view_model(0.0, 30.0), 10.0), (0.0, 40.0));
    }

    #[test]
    fn forced_min_above_data_falls_back() {
        let settings = ChartSettings {
            y_min: Some(500.0),
            ..ChartSettings::default()
        };
        assert_eq!(resolve_value_domain(&settings, &view_model(0.0, 30.0), 10.0), (0.0, 40.0));
    }

    #[test]
    fn zero_and_negative_widths_use_defaults() {
        let layout = RenderLayout::default();
        let zero = ChartSettings {
            line_width: Some(0.0),
            ..ChartSettings::default()
        };
        let custom = ChartSettings {
            line_width: Some(1.5),
            ..ChartSettings::default()
        };
        assert_eq!(effective_line_width(&zero, &layout), 4.0);
        assert_eq!(effective_line_width(&custom, &layout), 1.5);
    }

    #[test]
    fn tick_count_is_clamped() {
        let layout = RenderLayout::default();
        let zero = ChartSettings {
            y_ticks: 0,
            ..ChartSettings::default()
        };
        let huge = ChartSettings {
            y_ticks: 10_000,
            ..ChartSettings::default()
        };
        assert_eq!(effective_value_tick_count(&zero, &layout), 1);
        assert_eq!(effective_value_tick_count(&huge, &layout), 100);
    }
}
