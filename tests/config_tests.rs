use std::path::PathBuf;

use conversion_chart::api::{ChartConfig, ChartLayout, DataSource, ThemeMode};
use conversion_chart::core::{CurveType, TimeRange, Viewport};
use conversion_chart::{ChartError, ChartResult};

#[test]
fn default_config_is_valid_and_round_trips() -> ChartResult<()> {
    let config = ChartConfig::default();
    config.validate()?;

    let json = config.to_json_pretty()?;
    let restored = ChartConfig::from_json_str(&json)?;
    assert_eq!(restored, config);
    assert_eq!(
        restored.data_source,
        DataSource::Path(PathBuf::from("data.json"))
    );
    Ok(())
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let config = ChartConfig::from_json_str(
        r#"{
            "theme": "dark",
            "time_range": "week",
            "line_style": "bumpX",
            "data_source": { "url": "https://example.test/data.json" }
        }"#,
    )
    .expect("partial config");

    assert_eq!(config.theme, ThemeMode::Dark);
    assert_eq!(config.time_range, TimeRange::Week);
    assert_eq!(config.line_style, CurveType::BumpX);
    assert_eq!(
        config.data_source,
        DataSource::Url("https://example.test/data.json".to_owned())
    );
    assert_eq!(config.viewport, Viewport::new(960, 560));
    assert_eq!(config.export_pixel_ratio, 2.0);
    assert_eq!(config.layout, ChartLayout::default());
}

#[test]
fn unknown_line_style_is_rejected() {
    let err = ChartConfig::from_json_str(r#"{"line_style":"zigzag"}"#)
        .expect_err("unknown style must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn non_positive_export_ratio_is_rejected() {
    let config = ChartConfig {
        export_pixel_ratio: 0.0,
        ..ChartConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn viewport_too_small_for_plot_is_rejected() {
    let zero = ChartConfig::default().with_viewport(Viewport::new(0, 400));
    assert!(matches!(
        zero.validate(),
        Err(ChartError::InvalidViewport { width: 0, .. })
    ));

    let cramped = ChartConfig::default().with_viewport(Viewport::new(80, 80));
    assert!(matches!(cramped.validate(), Err(ChartError::InvalidData(_))));
}

#[test]
fn layout_carves_plot_area_out_of_viewport() -> ChartResult<()> {
    let plot = ChartLayout::default().plot_rect(Viewport::new(960, 560))?;

    assert_eq!(plot.left, 76.0);
    assert_eq!(plot.top, 20.0);
    assert_eq!(plot.right, 930.0);
    assert_eq!(plot.bottom, 476.0);
    assert!(plot.contains(500.0, 300.0));
    assert!(!plot.contains(10.0, 300.0));
    Ok(())
}

#[test]
fn layout_rejects_negative_margins_and_single_tick() {
    let negative = ChartLayout {
        margin_left: -1.0,
        ..ChartLayout::default()
    };
    assert!(negative.validate().is_err());

    let single_tick = ChartLayout {
        y_tick_count: 1,
        ..ChartLayout::default()
    };
    assert!(single_tick.validate().is_err());
}

#[test]
fn theme_toggle_flips_mode() {
    assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    assert!(ThemeMode::Light.toggled().is_dark());
    assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
}
