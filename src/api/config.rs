use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{CurveType, TimeRange, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{DataSource, ThemeMode};

/// Pixel geometry of the chart around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Width reserved left of the plot for percentage tick labels.
    pub y_axis_width: f64,
    /// Height reserved below the plot for category labels.
    pub x_axis_height: f64,
    /// Height reserved below the axis for the legend row.
    pub legend_height: f64,
    pub y_tick_count: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            margin_top: 20.0,
            margin_right: 30.0,
            margin_bottom: 20.0,
            margin_left: 20.0,
            y_axis_width: 56.0,
            x_axis_height: 36.0,
            legend_height: 28.0,
            y_tick_count: 5,
        }
    }
}

/// Plot area in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

impl ChartLayout {
    /// Plot area left after margins, axes and legend are carved out.
    pub fn plot_rect(self, viewport: Viewport) -> ChartResult<PlotRect> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let rect = PlotRect {
            left: self.margin_left + self.y_axis_width,
            top: self.margin_top,
            right: f64::from(viewport.width) - self.margin_right,
            bottom: f64::from(viewport.height)
                - self.margin_bottom
                - self.legend_height
                - self.x_axis_height,
        };
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "viewport {}x{} leaves no room for the plot area",
                viewport.width, viewport.height
            )));
        }
        Ok(rect)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("margin_top", self.margin_top),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("y_axis_width", self.y_axis_width),
            ("x_axis_height", self.x_axis_height),
            ("legend_height", self.legend_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.y_tick_count < 2 {
            return Err(ChartError::InvalidData(
                "layout `y_tick_count` must be >= 2".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Application bootstrap configuration.
///
/// Every field has a default so partial JSON files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub viewport: Viewport,
    pub data_source: DataSource,
    pub time_range: TimeRange,
    pub line_style: CurveType,
    pub theme: ThemeMode,
    pub export_dir: PathBuf,
    pub export_pixel_ratio: f64,
    pub layout: ChartLayout,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(960, 560),
            data_source: DataSource::default(),
            time_range: TimeRange::Day,
            line_style: CurveType::Linear,
            theme: ThemeMode::Light,
            export_dir: PathBuf::from("."),
            export_pixel_ratio: 2.0,
            layout: ChartLayout::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = data_source;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.export_pixel_ratio.is_finite() || self.export_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "export pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        self.layout.validate()?;
        self.layout.plot_rect(self.viewport).map(|_| ())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
