mod config;
mod controller;
mod export;
mod frame_builder;
mod loader;
mod render_style;
mod tooltip;

pub use config::{ChartConfig, ChartLayout, PlotRect};
pub use controller::ChartController;
pub use export::export_file_name;
#[cfg(feature = "cairo-backend")]
pub use export::{export_png, export_png_logged};
pub use frame_builder::{ChartGeometry, build_frame, category_at, estimate_text_width};
pub use loader::{DataSource, load_test_data, parse_test_data};
pub use render_style::{RenderStyle, SERIES_PALETTE, ThemeMode, series_color};
pub use tooltip::{format_axis_percent, format_tooltip_date, format_tooltip_value};
