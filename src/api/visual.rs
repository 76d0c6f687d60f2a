use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ExtremaPolicy, LineChartViewModel, NoHighlightPolicy, transform_with_policy};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::layout::RenderLayout;
use super::object_enumeration::VisualObjectInstance;
use super::palette::PaletteProvider;
use super::render_frame_builder::{FrameRequest, build_render_frame};
use super::settings::VisualSettings;
use super::update_options::VisualUpdateOptions;

/// Construction-time behaviour of the visual.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualConfig {
    #[serde(default)]
    pub layout: RenderLayout,
    #[serde(default)]
    pub slice_policy: NoHighlightPolicy,
    #[serde(default)]
    pub extrema_policy: ExtremaPolicy,
}

/// What one `update` drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderSummary {
    pub series_count: usize,
    pub rendered_paths: usize,
    pub rendered_points: usize,
    pub tick_labels: usize,
}

/// Line chart visual driven by host `update` calls.
///
/// Settings are replaced wholesale on every update; the view model lives only
/// for the duration of one call.
pub struct LineChartVisual<R: Renderer, P: PaletteProvider> {
    renderer: R,
    palette: P,
    config: VisualConfig,
    settings: Option<VisualSettings>,
}

impl<R: Renderer, P: PaletteProvider> LineChartVisual<R, P> {
    #[must_use]
    pub fn new(renderer: R, palette: P) -> Self {
        Self {
            renderer,
            palette,
            config: VisualConfig::default(),
            settings: None,
        }
    }

    pub fn with_config(renderer: R, palette: P, config: VisualConfig) -> ChartResult<Self> {
        config.layout.validate()?;
        Ok(Self {
            renderer,
            palette,
            config,
            settings: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> VisualConfig {
        self.config
    }

    /// Settings parsed by the last update, if any.
    #[must_use]
    pub fn settings(&self) -> Option<&VisualSettings> {
        self.settings.as_ref()
    }

    /// Parses settings, rebuilds the view model and renders one frame.
    ///
    /// Missing or malformed data renders an empty chart; only an unusable
    /// viewport or a renderer failure is reported as an error.
    pub fn update(&mut self, options: &VisualUpdateOptions) -> ChartResult<RenderSummary> {
        let data_view = options.primary_data_view();
        let settings =
            VisualSettings::parse(data_view.and_then(|view| view.metadata.objects.as_ref()));

        let view_model = data_view
            .and_then(|view| view.categorical.as_ref())
            .map_or_else(LineChartViewModel::empty, |categorical| {
                transform_with_policy(categorical, self.config.extrema_policy)
            });
        let series_count = view_model.data_series.len();

        let frame = {
            let request = FrameRequest {
                viewport: options.viewport,
                settings: &settings.chart_settings,
                layout: &self.config.layout,
                palette: &self.palette,
                slice_policy: self.config.slice_policy,
            };
            build_render_frame(view_model, &request)
        };
        self.settings = Some(settings);
        let frame = frame?;
        self.renderer.render(&frame)?;

        let summary = RenderSummary {
            series_count,
            rendered_paths: frame.series_paths.len(),
            rendered_points: frame.series_paths.iter().map(|path| path.points.len()).sum(),
            tick_labels: frame.tick_label_count(),
        };
        debug!(
            width = options.viewport.width,
            height = options.viewport.height,
            series = summary.series_count,
            paths = summary.rendered_paths,
            points = summary.rendered_points,
            "visual updated"
        );
        Ok(summary)
    }

    /// Property-pane schema for `object_name`, using defaults before the first update.
    #[must_use]
    pub fn enumerate_object_instances(&self, object_name: &str) -> Vec<VisualObjectInstance> {
        match &self.settings {
            Some(settings) => settings.enumerate_object_instances(object_name),
            None => VisualSettings::default().enumerate_object_instances(object_name),
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
