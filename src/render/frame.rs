use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{AxisPrimitive, PathPrimitive};

/// Backend-agnostic scene for one update.
///
/// Paths are drawn first, then axes, so axis labels sit on top of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub series_paths: Vec<PathPrimitive>,
    pub axes: Vec<AxisPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            series_paths: Vec::new(),
            axes: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;

        for path in &self.series_paths {
            path.validate()?;
        }
        for axis in &self.axes {
            axis.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn tick_label_count(&self) -> usize {
        self.axes.iter().map(|axis| axis.ticks.len()).sum()
    }
}
