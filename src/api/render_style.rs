use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Series colors, assigned by position in the visible selection.
pub const SERIES_PALETTE: [Color; 8] = [
    Color::from_hex(0x8884d8),
    Color::from_hex(0x82ca9d),
    Color::from_hex(0xffc658),
    Color::from_hex(0xff7300),
    Color::from_hex(0x0088fe),
    Color::from_hex(0x00c49f),
    Color::from_hex(0xff8042),
    Color::from_hex(0xa4de6c),
];

/// Color of the `index`-th visible series; wraps around the palette.
#[must_use]
pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    #[must_use]
    pub fn render_style(self) -> RenderStyle {
        match self {
            ThemeMode::Light => RenderStyle::light(),
            ThemeMode::Dark => RenderStyle::dark(),
        }
    }
}

/// Colors and sizes for one chart frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    pub grid_line_color: Color,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub legend_text_color: Color,
    pub zoom_overlay_color: Color,
    pub zoom_overlay_border_color: Color,
    pub tooltip_background: Color,
    pub tooltip_border_color: Color,
    pub tooltip_text_color: Color,
    pub badge_background: Color,
    pub badge_text_color: Color,
    pub axis_font_size_px: f64,
    pub legend_font_size_px: f64,
    pub tooltip_font_size_px: f64,
    pub series_line_width: f64,
    pub hover_marker_radius: f64,
}

impl RenderStyle {
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: Color::from_hex(0xffffff),
            grid_line_color: Color::from_hex(0xe0e0e0),
            axis_line_color: Color::from_hex(0x666666),
            axis_label_color: Color::from_hex(0x333333),
            legend_text_color: Color::from_hex(0x333333),
            zoom_overlay_color: Color::from_hex(0x8884d8).with_alpha(0.15),
            zoom_overlay_border_color: Color::from_hex(0x8884d8).with_alpha(0.3),
            tooltip_background: Color::from_hex(0xffffff),
            tooltip_border_color: Color::from_hex(0xcccccc),
            tooltip_text_color: Color::from_hex(0x222222),
            badge_background: Color::from_hex(0x007aff),
            badge_text_color: Color::from_hex(0xffffff),
            axis_font_size_px: 12.0,
            legend_font_size_px: 12.0,
            tooltip_font_size_px: 12.0,
            series_line_width: 2.0,
            hover_marker_radius: 6.0,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Color::from_hex(0x2d2d2d),
            grid_line_color: Color::from_hex(0x444444),
            axis_line_color: Color::from_hex(0xaaaaaa),
            axis_label_color: Color::from_hex(0xdddddd),
            legend_text_color: Color::from_hex(0xeeeeee),
            zoom_overlay_color: Color::from_hex(0xffffff).with_alpha(0.12),
            zoom_overlay_border_color: Color::from_hex(0xffffff).with_alpha(0.3),
            tooltip_background: Color::from_hex(0x3a3a3a),
            tooltip_border_color: Color::from_hex(0x555555),
            tooltip_text_color: Color::from_hex(0xf0f0f0),
            badge_background: Color::from_hex(0x007aff),
            badge_text_color: Color::from_hex(0xffffff),
            ..Self::light()
        }
    }
}
