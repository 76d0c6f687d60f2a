use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{CategoricalDataView, Viewport};
use crate::error::ChartResult;

/// Payload of one host `update` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualUpdateOptions {
    pub viewport: Viewport,
    #[serde(default)]
    pub data_views: Vec<DataView>,
}

impl VisualUpdateOptions {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            data_views: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_data_view(mut self, data_view: DataView) -> Self {
        self.data_views.push(data_view);
        self
    }

    /// Decodes the host's JSON update payload.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Only the first data view drives the chart.
    #[must_use]
    pub fn primary_data_view(&self) -> Option<&DataView> {
        self.data_views.first()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataView {
    #[serde(default)]
    pub metadata: DataViewMetadata,
    #[serde(default)]
    pub categorical: Option<CategoricalDataView>,
}

impl DataView {
    #[must_use]
    pub fn new(categorical: CategoricalDataView) -> Self {
        Self {
            metadata: DataViewMetadata::default(),
            categorical: Some(categorical),
        }
    }

    /// Attaches the serialized settings bag (`{ "dataPoint": {..}, "chartSettings": {..} }`).
    #[must_use]
    pub fn with_objects(mut self, objects: Value) -> Self {
        self.metadata.objects = Some(objects);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataViewMetadata {
    #[serde(default)]
    pub objects: Option<Value>,
}
