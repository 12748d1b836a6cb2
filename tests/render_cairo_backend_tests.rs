#![cfg(feature = "cairo-backend")]

use std::fs::File;

use cairo::{Context, Format, ImageSurface};
use chrono::NaiveDate;
use conversion_chart::api::{ChartConfig, ChartLayout, ThemeMode, build_frame, export_png};
use conversion_chart::core::{CountMap, DailyRecord, TestData, Variation, Viewport};
use conversion_chart::render::{
    CairoContextRenderer, CairoRenderer, Color, LinePrimitive, LineStrokeStyle, RenderFrame,
    Renderer,
};
use conversion_chart::{ChartController, ChartError};

fn controller() -> ChartController {
    let data = TestData {
        variations: vec![
            Variation::new(Some(0), "Original"),
            Variation::new(Some(1), "Variation A"),
        ],
        data: (1..=9)
            .map(|day| {
                DailyRecord::new(
                    format!("2024-05-0{day}"),
                    CountMap::new().with("0", 500.0).with("1", 480.0),
                    CountMap::new()
                        .with("0", 20.0 + f64::from(day))
                        .with("1", 30.0 - f64::from(day)),
                )
            })
            .collect(),
    };
    ChartController::new(data)
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = CairoRenderer::with_pixel_ratio(100, 100, 0.0).expect_err("invalid ratio");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_chart_frame() {
    let frame =
        build_frame(&controller(), Viewport::new(900, 500), ChartLayout::default()).expect("frame");
    let mut renderer = CairoRenderer::new(900, 500).expect("renderer");
    renderer.render(&frame).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, frame.lines.len());
    assert_eq!(stats.polylines_drawn, 2);
    assert_eq!(stats.texts_drawn, frame.texts.len());
    assert_eq!(renderer.backend_name(), "cairo+pango+pangocairo");
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let frame = RenderFrame::new(Viewport::new(600, 320)).with_line(
        LinePrimitive::new(0.0, 10.0, 600.0, 10.0, 1.0, Color::rgb(0.2, 0.2, 0.2))
            .with_stroke_style(LineStrokeStyle::Dashed),
    );

    let mut renderer = CairoRenderer::new(1, 1).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("external render");
    assert_eq!(renderer.last_stats().lines_drawn, 1);
}

#[test]
fn cairo_renderer_rejects_invalid_frame() {
    let frame = RenderFrame::new(Viewport::new(200, 100)).with_line(LinePrimitive::new(
        f64::NAN,
        0.0,
        10.0,
        10.0,
        1.0,
        Color::rgb(0.0, 0.0, 0.0),
    ));
    let mut renderer = CairoRenderer::new(200, 100).expect("renderer");

    assert!(renderer.render(&frame).is_err());
}

#[test]
fn png_export_writes_dated_file_at_double_resolution() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = ChartConfig::default()
        .with_viewport(Viewport::new(640, 400))
        .with_theme(ThemeMode::Dark);
    config.export_dir = dir.path().to_path_buf();
    let mut controller = controller();
    controller.set_theme(ThemeMode::Dark);
    let date = NaiveDate::from_ymd_opt(2025, 2, 14).expect("date");

    let path = export_png(&controller, &config, config.viewport, date).expect("export");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("conversion-rates-2025-02-14.png")
    );

    let mut file = File::open(&path).expect("exported file");
    let image = ImageSurface::create_from_png(&mut file).expect("decode png");
    assert_eq!(image.width(), 1280);
    assert_eq!(image.height(), 800);
}

#[test]
fn png_export_follows_displayed_size_not_configured_size() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = ChartConfig::default().with_viewport(Viewport::new(640, 400));
    config.export_dir = dir.path().to_path_buf();
    let date = NaiveDate::from_ymd_opt(2025, 2, 14).expect("date");

    let resized = Viewport::new(900, 500);
    let path = export_png(&controller(), &config, resized, date).expect("export");

    let mut file = File::open(&path).expect("exported file");
    let image = ImageSurface::create_from_png(&mut file).expect("decode png");
    assert_eq!(image.width(), 1800);
    assert_eq!(image.height(), 1000);
}

#[test]
fn png_export_reports_unwritable_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = ChartConfig::default();
    config.export_dir = dir.path().join("missing").join("nested");
    let date = NaiveDate::from_ymd_opt(2025, 2, 14).expect("date");

    let err = export_png(&controller(), &config, config.viewport, date)
        .expect_err("missing dir must fail");
    assert!(matches!(err, ChartError::Export(_)));
}
