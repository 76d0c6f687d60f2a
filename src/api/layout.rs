use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Fixed geometry and styling of the rendered chart.
///
/// Hosts rarely change these; they are serializable so a tuned layout can be
/// persisted next to the visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderLayout {
    /// Space left and right of the plot (the value axis sits in the left one).
    pub plot_inset_x_px: f64,
    /// Space above and below the plot (the time axis sits in the bottom one).
    pub plot_inset_y_px: f64,
    /// Added to the upper bound of the value domain, in data units.
    pub value_domain_padding: f64,
    pub default_line_width_px: f64,
    pub default_axis_width_px: f64,
    pub label_font_size_em: f64,
    pub time_tick_count: usize,
    /// Upper clamp for the `yTicks` setting.
    pub max_value_ticks: usize,
    pub tick_size_px: f64,
    pub tick_padding_px: f64,
    pub axis_color: Color,
    pub label_color: Color,
}

impl Default for RenderLayout {
    fn default() -> Self {
        Self {
            plot_inset_x_px: 60.0,
            plot_inset_y_px: 30.0,
            value_domain_padding: 10.0,
            default_line_width_px: 4.0,
            default_axis_width_px: 2.0,
            label_font_size_em: 0.6,
            time_tick_count: 10,
            max_value_ticks: 100,
            tick_size_px: 6.0,
            tick_padding_px: 3.0,
            axis_color: Color::BLACK,
            label_color: Color::BLACK,
        }
    }
}

impl RenderLayout {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("plot_inset_x_px", self.plot_inset_x_px),
            ("plot_inset_y_px", self.plot_inset_y_px),
            ("value_domain_padding", self.value_domain_padding),
            ("tick_size_px", self.tick_size_px),
            ("tick_padding_px", self.tick_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidSettings(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("default_line_width_px", self.default_line_width_px),
            ("default_axis_width_px", self.default_axis_width_px),
            ("label_font_size_em", self.label_font_size_em),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidSettings(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        if self.time_tick_count == 0 || self.max_value_ticks == 0 {
            return Err(ChartError::InvalidSettings(
                "layout tick counts must be >= 1".to_owned(),
            ));
        }
        self.axis_color.validate()?;
        self.label_color.validate()?;
        Ok(self)
    }
}
