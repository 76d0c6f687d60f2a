use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::settings::{CHART_SETTINGS_OBJECT, DATA_POINT_OBJECT, VisualSettings};

/// One editable object shown in the host's property pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualObjectInstance {
    pub object_name: String,
    #[serde(default)]
    pub selector: Option<Value>,
    /// Property name to current value, in pane display order.
    pub properties: IndexMap<String, Value>,
}

impl VisualSettings {
    /// Describes the editable properties of `object_name`.
    ///
    /// Property names match the keys read by `VisualSettings::parse`; unknown
    /// objects yield no instances.
    #[must_use]
    pub fn enumerate_object_instances(&self, object_name: &str) -> Vec<VisualObjectInstance> {
        let properties = match object_name {
            DATA_POINT_OBJECT => self.data_point_properties(),
            CHART_SETTINGS_OBJECT => self.chart_settings_properties(),
            _ => return Vec::new(),
        };

        vec![VisualObjectInstance {
            object_name: object_name.to_owned(),
            selector: None,
            properties,
        }]
    }

    fn data_point_properties(&self) -> IndexMap<String, Value> {
        let settings = &self.data_point;
        IndexMap::from([
            ("defaultColor".to_owned(), json!(settings.default_color)),
            ("showAllDataPoints".to_owned(), json!(settings.show_all_data_points)),
            ("fill".to_owned(), json!(settings.fill)),
            ("fillRule".to_owned(), json!(settings.fill_rule)),
            ("fontSize".to_owned(), json!(settings.font_size)),
        ])
    }

    fn chart_settings_properties(&self) -> IndexMap<String, Value> {
        let settings = &self.chart_settings;
        IndexMap::from([
            ("yMin".to_owned(), json!(settings.y_min)),
            ("yMax".to_owned(), json!(settings.y_max)),
            ("lineWidth".to_owned(), json!(settings.line_width)),
            ("axisWidth".to_owned(), json!(settings.axis_width)),
            ("yTickFormat".to_owned(), json!(settings.y_tick_format)),
            ("yTicks".to_owned(), json!(settings.y_ticks)),
        ])
    }
}
