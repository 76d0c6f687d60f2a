use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use line_visual::api::{
    ChartSettings, FrameRequest, RenderLayout, StaticPalette, build_render_frame,
};
use line_visual::core::{
    CategoricalDataView, CategoryColumn, NoHighlightPolicy, ValueColumn, Viewport, transform,
};
use line_visual::render::{Renderer, SvgRenderer};
use std::hint::black_box;

fn dataset(rows: usize, measures: usize) -> CategoricalDataView {
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let category = CategoryColumn::new(
        "Date",
        (0..rows)
            .map(|i| Some(base + Duration::hours(i as i64)))
            .collect(),
    );
    let values = (0..measures)
        .map(|m| {
            let values = (0..rows)
                .map(|i| {
                    if i % 97 == 0 {
                        None
                    } else {
                        Some((i as f64 * 0.01 + m as f64).sin() * 1_000.0)
                    }
                })
                .collect();
            let highlights = (0..rows)
                .map(|i| (i < rows * 3 / 4).then_some(1.0))
                .collect();
            ValueColumn::new(format!("m{m}"), values).with_highlights(highlights)
        })
        .collect();
    CategoricalDataView::new(category, values)
}

fn bench_transform_10k(c: &mut Criterion) {
    let data = dataset(10_000, 4);
    c.bench_function("transform_10k_x4", |b| {
        b.iter(|| black_box(transform(black_box(&data))))
    });
}

fn bench_render_svg_10k(c: &mut Criterion) {
    let data = dataset(10_000, 4);
    let settings = ChartSettings::default();
    let layout = RenderLayout::default();
    let palette = StaticPalette::default();
    let mut renderer = SvgRenderer::new();

    c.bench_function("render_svg_10k_x4", |b| {
        b.iter(|| {
            let request = FrameRequest {
                viewport: Viewport::new(1920, 1080),
                settings: &settings,
                layout: &layout,
                palette: &palette,
                slice_policy: NoHighlightPolicy::EmptyResult,
            };
            let frame = build_render_frame(transform(&data), &request).expect("frame");
            renderer.render(&frame).expect("render");
            black_box(renderer.document().len());
        })
    });
}

criterion_group!(benches, bench_transform_10k, bench_render_svg_10k);
criterion_main!(benches);
