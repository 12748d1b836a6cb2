use conversion_chart::api::{
    ChartGeometry, ChartLayout, RenderStyle, SERIES_PALETTE, ThemeMode, build_frame, category_at,
};
use conversion_chart::core::{CountMap, CurveType, DailyRecord, TestData, Variation, Viewport};
use conversion_chart::render::{NullRenderer, RenderFrame, Renderer};
use conversion_chart::{ChartController, ChartError, ChartResult};

fn controller() -> ChartController {
    let data = TestData {
        variations: vec![
            Variation::new(Some(1), "Variation A"),
            Variation::new(Some(2), "Variation B"),
        ],
        data: [10.0, 20.0, 30.0]
            .into_iter()
            .enumerate()
            .map(|(i, conversions)| {
                DailyRecord::new(
                    format!("2024-03-0{}", i + 1),
                    CountMap::new().with("1", 100.0).with("2", 100.0),
                    CountMap::new().with("1", conversions).with("2", 5.0),
                )
            })
            .collect(),
    };
    ChartController::new(data)
}

fn viewport() -> Viewport {
    Viewport::new(960, 560)
}

fn frame_for(controller: &ChartController) -> RenderFrame {
    build_frame(controller, viewport(), ChartLayout::default()).expect("frame")
}

fn texts(frame: &RenderFrame) -> Vec<&str> {
    frame.texts.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn base_frame_draws_grid_series_and_legend() -> ChartResult<()> {
    let controller = controller();
    let frame = frame_for(&controller);
    frame.validate()?;

    assert_eq!(frame.lines.len(), 7);
    assert_eq!(frame.polylines.len(), 2);
    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.texts.len(), 10);

    let labels = texts(&frame);
    for expected in ["2.5%", "17.5%", "32.5%", "01", "02", "03", "Variation A", "Variation B"] {
        assert!(labels.contains(&expected), "missing `{expected}`");
    }
    Ok(())
}

#[test]
fn series_points_sit_on_category_centers() -> ChartResult<()> {
    let controller = controller();
    let frame = frame_for(&controller);
    let geometry = ChartGeometry::new(&controller, viewport(), ChartLayout::default())?;

    let first = &frame.polylines[0];
    assert_eq!(first.color, SERIES_PALETTE[0]);
    assert_eq!(first.points.len(), 3);
    for (index, value) in [10.0, 20.0, 30.0].into_iter().enumerate() {
        let (x, y) = first.points[index];
        let expected_x = geometry.categories.position(index).expect("category");
        assert!((x - expected_x).abs() <= 1e-9);
        assert!((y - geometry.y_to_pixel(value)?).abs() <= 1e-9);
    }
    assert!(first.points[2].1 < first.points[0].1);
    Ok(())
}

#[test]
fn colors_follow_visible_order() {
    let mut controller = controller();
    controller.set_selected(["2"]).expect("selection");
    let frame = frame_for(&controller);

    assert_eq!(frame.polylines.len(), 1);
    assert_eq!(frame.polylines[0].color, SERIES_PALETTE[0]);
    assert!(!texts(&frame).contains(&"Variation A"));
}

#[test]
fn smooth_styles_add_intermediate_points() {
    let mut controller = controller();
    controller.set_line_style(CurveType::Monotone);
    let frame = frame_for(&controller);

    assert!(frame.polylines[0].points.len() > 3);
}

#[test]
fn dark_theme_changes_background() {
    let mut controller = controller();
    assert_eq!(frame_for(&controller).background, RenderStyle::light().background);

    controller.set_theme(ThemeMode::Dark);
    assert_eq!(frame_for(&controller).background, RenderStyle::dark().background);
}

#[test]
fn hovering_adds_guide_markers_and_tooltip() {
    let mut controller = controller();
    controller.pointer_move(Some("02"));
    let frame = frame_for(&controller);

    assert_eq!(frame.lines.len(), 8);
    assert_eq!(frame.rects.len(), 7);
    let labels = texts(&frame);
    assert!(labels.contains(&"Variation A: 20,00%"));
    assert!(labels.contains(&"Variation B: 5,00%"));
}

#[test]
fn armed_zoom_shows_badge_and_drag_overlay() {
    let mut controller = controller();
    controller.arm_zoom();
    let armed = frame_for(&controller);
    assert!(texts(&armed).contains(&"Zoom Mode Active"));
    assert_eq!(armed.rects.len(), 3);

    controller.pointer_down(Some("01"));
    controller.pointer_move(Some("03"));
    let dragging = frame_for(&controller);
    assert!(texts(&dragging).contains(&"Drag from 01 to select area"));

    let layout = ChartLayout::default();
    let plot = layout.plot_rect(viewport()).expect("plot");
    let overlay = dragging
        .rects
        .iter()
        .find(|rect| (rect.height - plot.height()).abs() <= 1e-9)
        .expect("overlay");
    assert!((overlay.x - plot.left).abs() <= 1e-9);
    assert!((overlay.width - plot.width()).abs() <= 1e-9);
}

#[test]
fn pointer_position_resolves_to_category() -> ChartResult<()> {
    let controller = controller();
    let layout = ChartLayout::default();
    let geometry = ChartGeometry::new(&controller, viewport(), layout)?;
    let x = geometry.categories.position(1).expect("category");
    let y = (geometry.plot.top + geometry.plot.bottom) / 2.0;

    assert_eq!(
        category_at(&controller, viewport(), layout, x, y)?.as_deref(),
        Some("02")
    );
    assert_eq!(category_at(&controller, viewport(), layout, 5.0, y)?, None);
    Ok(())
}

#[test]
fn flat_series_still_projects() {
    let data = TestData {
        variations: vec![Variation::new(Some(1), "Flat")],
        data: (1..=3)
            .map(|day| {
                DailyRecord::new(
                    format!("2024-03-0{day}"),
                    CountMap::new().with("1", 100.0),
                    CountMap::new().with("1", 4.0),
                )
            })
            .collect(),
    };
    let controller = ChartController::new(data);
    let frame = frame_for(&controller);

    frame.validate().expect("valid frame");
    assert_eq!(frame.polylines.len(), 1);
}

#[test]
fn empty_dataset_renders_axes_only() {
    let controller = ChartController::new(TestData::default());
    let frame = frame_for(&controller);

    assert!(frame.polylines.is_empty());
    assert_eq!(frame.lines.len(), 7);
}

#[test]
fn null_renderer_accepts_built_frames() {
    let mut renderer = NullRenderer::default();
    renderer.render(&frame_for(&controller())).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_frame.is_some());
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = build_frame(&controller(), Viewport::new(0, 0), ChartLayout::default())
        .expect_err("zero viewport must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}
