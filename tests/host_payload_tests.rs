use line_visual::ChartError;
use line_visual::api::{LineChartVisual, StaticPalette, VisualUpdateOptions};
use line_visual::render::SvgRenderer;

const PAYLOAD: &str = r##"{
    "viewport": { "width": 640, "height": 320 },
    "dataViews": [{
        "metadata": {
            "objects": {
                "chartSettings": { "yTickFormat": "K", "lineWidth": 2 },
                "dataPoint": { "defaultColor": { "solid": { "color": "#336699" } } }
            }
        },
        "categorical": {
            "categories": [{
                "source": { "displayName": "Date" },
                "values": ["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z", null]
            }],
            "values": [{
                "source": { "displayName": "Sales" },
                "values": [1000, null, 3000],
                "highlights": null
            }, {
                "source": { "displayName": "Returns" },
                "values": [200, 400, 600],
                "highlights": [1, null, null]
            }]
        }
    }]
}"##;

#[test]
fn host_json_payload_decodes() {
    let options = VisualUpdateOptions::from_json_str(PAYLOAD).expect("decode payload");

    assert_eq!(options.viewport.width, 640);
    let data_view = options.primary_data_view().expect("data view");
    let categorical = data_view.categorical.as_ref().expect("categorical");
    let category = categorical.category().expect("category column");
    assert_eq!(category.values.len(), 3);
    assert!(category.values[2].is_none());

    let measures = categorical.measures().expect("measures");
    assert_eq!(measures[0].source.display_name, "Sales");
    assert!(measures[0].highlights.is_none());
    assert_eq!(measures[1].highlights.as_ref().map(Vec::len), Some(3));
}

#[test]
fn host_json_payload_renders_end_to_end() {
    let options = VisualUpdateOptions::from_json_str(PAYLOAD).expect("decode payload");
    let mut visual = LineChartVisual::new(SvgRenderer::new(), StaticPalette::default());

    let summary = visual.update(&options).expect("update");
    assert_eq!(summary.series_count, 2);
    // Sales keeps Jan 1 only (Jan 2 is null, row 3 has no date); Returns is cut at Jan 1.
    assert_eq!(summary.rendered_paths, 2);
    assert_eq!(summary.rendered_points, 2);

    let settings = visual.settings().expect("settings");
    assert_eq!(settings.data_point.default_color, "#336699");
    assert_eq!(settings.chart_settings.line_width, Some(2.0));

    let document = visual.renderer().document();
    assert!(document.contains(">1K</text>"));
    assert!(document.contains(r##"stroke="#01b8aa""##));
    assert!(document.contains(r##"stroke="#374649""##));
}

#[test]
fn payload_without_data_views_is_accepted() {
    let options =
        VisualUpdateOptions::from_json_str(r#"{ "viewport": { "width": 10, "height": 10 } }"#)
            .expect("decode payload");
    assert!(options.primary_data_view().is_none());
}

#[test]
fn malformed_payload_is_a_serialization_error() {
    let result = VisualUpdateOptions::from_json_str(r#"{ "viewport": "wide" }"#);
    assert!(matches!(result, Err(ChartError::Serialization(_))));
}
