use chrono::NaiveDate;

/// File name for a PNG export made on `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("conversion-rates-{}.png", date.format("%Y-%m-%d"))
}

#[cfg(feature = "cairo-backend")]
mod png {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use tracing::{error, info};

    use super::export_file_name;
    use crate::api::{ChartConfig, ChartController, build_frame};
    use crate::core::Viewport;
    use crate::error::{ChartError, ChartResult};
    use crate::render::{CairoRenderer, Renderer};

    /// Renders the current chart offscreen and writes it to the export directory.
    ///
    /// The surface is `export_pixel_ratio` times `viewport`, with the theme
    /// background painted underneath. Pass the on-screen size so the file
    /// matches what is displayed.
    pub fn export_png(
        controller: &ChartController,
        config: &ChartConfig,
        viewport: Viewport,
        date: NaiveDate,
    ) -> ChartResult<PathBuf> {
        let frame = build_frame(controller, viewport, config.layout)?;
        let width = i32::try_from(viewport.width)
            .map_err(|_| ChartError::Export("viewport width out of range".to_owned()))?;
        let height = i32::try_from(viewport.height)
            .map_err(|_| ChartError::Export("viewport height out of range".to_owned()))?;

        let mut renderer =
            CairoRenderer::with_pixel_ratio(width, height, config.export_pixel_ratio)?;
        renderer.render(&frame)?;

        let path = config.export_dir.join(export_file_name(date));
        renderer.write_png(&path)?;
        info!(path = %path.display(), "chart exported");
        Ok(path)
    }

    /// Export entry point for UI callbacks: failures are logged, not raised.
    pub fn export_png_logged(
        controller: &ChartController,
        config: &ChartConfig,
        viewport: Viewport,
        date: NaiveDate,
    ) -> Option<PathBuf> {
        match export_png(controller, config, viewport, date) {
            Ok(path) => Some(path),
            Err(err) => {
                error!(error = %err, "chart export failed");
                None
            }
        }
    }
}

#[cfg(feature = "cairo-backend")]
pub use png::{export_png, export_png_logged};
