use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const DATA_POINT_OBJECT: &str = "dataPoint";
pub const CHART_SETTINGS_OBJECT: &str = "chartSettings";

/// Data-point appearance group (`dataPoint` object in the host bag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointSettings {
    pub default_color: String,
    pub show_all_data_points: bool,
    pub fill: String,
    pub fill_rule: String,
    pub font_size: f64,
}

impl Default for DataPointSettings {
    fn default() -> Self {
        Self {
            default_color: String::new(),
            show_all_data_points: true,
            fill: String::new(),
            fill_rule: String::new(),
            font_size: 12.0,
        }
    }
}

/// Chart appearance group (`chartSettings` object in the host bag).
///
/// Values are stored as the host sent them; clamping happens at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    /// Forced lower bound of the value axis.
    pub y_min: Option<f64>,
    /// Forced upper bound of the value axis (before padding).
    pub y_max: Option<f64>,
    pub line_width: Option<f64>,
    pub axis_width: Option<f64>,
    /// `""`, `"K"` or `"M"`.
    pub y_tick_format: String,
    pub y_ticks: i64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            y_min: None,
            y_max: None,
            line_width: None,
            axis_width: None,
            y_tick_format: String::new(),
            y_ticks: 5,
        }
    }
}

/// Fields the host explicitly set on `dataPoint`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialDataPointSettings {
    pub default_color: Option<String>,
    pub show_all_data_points: Option<bool>,
    pub fill: Option<String>,
    pub fill_rule: Option<String>,
    pub font_size: Option<f64>,
}

/// Fields the host explicitly set on `chartSettings`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialChartSettings {
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub line_width: Option<f64>,
    pub axis_width: Option<f64>,
    pub y_tick_format: Option<String>,
    pub y_ticks: Option<i64>,
}

impl DataPointSettings {
    #[must_use]
    pub fn resolve(partial: PartialDataPointSettings, defaults: &Self) -> Self {
        Self {
            default_color: partial
                .default_color
                .unwrap_or_else(|| defaults.default_color.clone()),
            show_all_data_points: partial
                .show_all_data_points
                .unwrap_or(defaults.show_all_data_points),
            fill: partial.fill.unwrap_or_else(|| defaults.fill.clone()),
            fill_rule: partial
                .fill_rule
                .unwrap_or_else(|| defaults.fill_rule.clone()),
            font_size: partial.font_size.unwrap_or(defaults.font_size),
        }
    }
}

impl ChartSettings {
    #[must_use]
    pub fn resolve(partial: PartialChartSettings, defaults: &Self) -> Self {
        Self {
            y_min: partial.y_min.or(defaults.y_min),
            y_max: partial.y_max.or(defaults.y_max),
            line_width: partial.line_width.or(defaults.line_width),
            axis_width: partial.axis_width.or(defaults.axis_width),
            y_tick_format: partial
                .y_tick_format
                .unwrap_or_else(|| defaults.y_tick_format.clone()),
            y_ticks: partial.y_ticks.unwrap_or(defaults.y_ticks),
        }
    }
}

impl PartialDataPointSettings {
    fn read(object: &Map<String, Value>) -> Self {
        Self {
            default_color: read_color(object, DATA_POINT_OBJECT, "defaultColor"),
            show_all_data_points: read_bool(object, DATA_POINT_OBJECT, "showAllDataPoints"),
            fill: read_color(object, DATA_POINT_OBJECT, "fill"),
            fill_rule: read_string(object, DATA_POINT_OBJECT, "fillRule"),
            font_size: read_number(object, DATA_POINT_OBJECT, "fontSize"),
        }
    }
}

impl PartialChartSettings {
    fn read(object: &Map<String, Value>) -> Self {
        Self {
            y_min: read_number(object, CHART_SETTINGS_OBJECT, "yMin"),
            y_max: read_number(object, CHART_SETTINGS_OBJECT, "yMax"),
            line_width: read_number(object, CHART_SETTINGS_OBJECT, "lineWidth"),
            axis_width: read_number(object, CHART_SETTINGS_OBJECT, "axisWidth"),
            y_tick_format: read_string(object, CHART_SETTINGS_OBJECT, "yTickFormat"),
            y_ticks: read_number(object, CHART_SETTINGS_OBJECT, "yTicks")
                .map(|value| value.round() as i64),
        }
    }
}

/// Complete settings for one render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualSettings {
    pub data_point: DataPointSettings,
    pub chart_settings: ChartSettings,
}

impl VisualSettings {
    /// Maps the host's object bag onto defaults.
    ///
    /// Missing objects, missing properties and wrongly typed properties all
    /// leave the default in place; nothing here fails.
    #[must_use]
    pub fn parse(objects: Option<&Value>) -> Self {
        Self::parse_with_defaults(objects, &Self::default())
    }

    #[must_use]
    pub fn parse_with_defaults(objects: Option<&Value>, defaults: &Self) -> Self {
        let data_point = host_object(objects, DATA_POINT_OBJECT)
            .map(PartialDataPointSettings::read)
            .unwrap_or_default();
        let chart_settings = host_object(objects, CHART_SETTINGS_OBJECT)
            .map(PartialChartSettings::read)
            .unwrap_or_default();

        Self {
            data_point: DataPointSettings::resolve(data_point, &defaults.data_point),
            chart_settings: ChartSettings::resolve(chart_settings, &defaults.chart_settings),
        }
    }
}

fn host_object<'a>(objects: Option<&'a Value>, name: &str) -> Option<&'a Map<String, Value>> {
    match objects?.get(name)? {
        Value::Object(object) => Some(object),
        Value::Null => None,
        other => {
            warn!(object = name, value = %other, "settings object is not a map; using defaults");
            None
        }
    }
}

fn read_number(object: &Map<String, Value>, object_name: &str, key: &str) -> Option<f64> {
    match object.get(key)? {
        Value::Null => None,
        Value::Number(number) => number.as_f64(),
        other => {
            warn!(object = object_name, property = key, value = %other, "expected a number; using default");
            None
        }
    }
}

fn read_bool(object: &Map<String, Value>, object_name: &str, key: &str) -> Option<bool> {
    match object.get(key)? {
        Value::Null => None,
        Value::Bool(flag) => Some(*flag),
        other => {
            warn!(object = object_name, property = key, value = %other, "expected a boolean; using default");
            None
        }
    }
}

fn read_string(object: &Map<String, Value>, object_name: &str, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => {
            warn!(object = object_name, property = key, value = %other, "expected a string; using default");
            None
        }
    }
}

/// Plain strings, or the host fill shape `{ "solid": { "color": "#rrggbb" } }`.
fn read_color(object: &Map<String, Value>, object_name: &str, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Object(fill) => match fill.get("solid").and_then(|solid| solid.get("color")) {
            Some(Value::String(color)) => Some(color.clone()),
            _ => {
                warn!(object = object_name, property = key, "fill has no solid color; using default");
                None
            }
        },
        _ => read_string(object, object_name, key),
    }
}
