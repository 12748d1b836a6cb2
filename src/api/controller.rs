use indexmap::IndexSet;
use tracing::{debug, info};

use crate::core::{
    CurveType, EnhancedVariation, ProcessedPoint, TestData, TimeRange, aggregate,
    available_variation_ids, enhance_variations, y_axis_domain,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ZoomCommit, ZoomSelector};

use super::{ChartConfig, ThemeMode};

/// Owner of every piece of chart state between two frames.
///
/// The controller holds the loaded dataset, the derived variations and
/// series, the user's picks (selection, granularity, line style, theme)
/// and the zoom selector. All transitions are plain method calls, so the
/// whole interaction model runs without a rendering surface.
#[derive(Debug, Clone)]
pub struct ChartController {
    data: TestData,
    variations: Vec<EnhancedVariation>,
    selected: Vec<String>,
    time_range: TimeRange,
    line_style: CurveType,
    theme: ThemeMode,
    zoom: ZoomSelector,
    hovered: Option<String>,
}

impl ChartController {
    /// Derives variations and the daily series; every variation starts selected.
    #[must_use]
    pub fn new(data: TestData) -> Self {
        let variations = enhance_variations(&data.variations);
        let selected = available_variation_ids(&variations);
        let mut controller = Self {
            data,
            variations,
            selected,
            time_range: TimeRange::Day,
            line_style: CurveType::Linear,
            theme: ThemeMode::Light,
            zoom: ZoomSelector::default(),
            hovered: None,
        };
        controller.recompute();
        controller
    }

    /// Same as [`ChartController::new`] with the initial picks taken from `config`.
    #[must_use]
    pub fn from_config(data: TestData, config: &ChartConfig) -> Self {
        let mut controller = Self::new(data);
        controller.line_style = config.line_style;
        controller.theme = config.theme;
        if config.time_range != controller.time_range {
            controller.set_time_range(config.time_range);
        }
        controller
    }

    #[must_use]
    pub fn data(&self) -> &TestData {
        &self.data
    }

    #[must_use]
    pub fn variations(&self) -> &[EnhancedVariation] {
        &self.variations
    }

    #[must_use]
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, stable_id: &str) -> bool {
        self.selected.iter().any(|id| id == stable_id)
    }

    /// Selected variations in dataset order; this order drives palette colors.
    #[must_use]
    pub fn visible_variations(&self) -> Vec<&EnhancedVariation> {
        self.variations
            .iter()
            .filter(|variation| self.is_selected(&variation.stable_id))
            .collect()
    }

    /// Replaces the selection.
    ///
    /// Unknown ids are dropped and duplicates collapsed. A selection that
    /// ends up empty is rejected and the previous one is kept.
    pub fn set_selected<I, S>(&mut self, ids: I) -> ChartResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: Vec<String> = ids
            .into_iter()
            .map(Into::<String>::into)
            .filter(|id| self.variations.iter().any(|v| &v.stable_id == id))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        if next.is_empty() {
            return Err(ChartError::InvalidData(
                "at least one variation must stay selected".to_owned(),
            ));
        }
        debug!(selected = ?next, "variation selection changed");
        self.selected = next;
        Ok(())
    }

    /// Adds or removes one variation; removing the last one is rejected.
    pub fn toggle_variation(&mut self, stable_id: &str) -> ChartResult<()> {
        let mut next = self.selected.clone();
        if let Some(position) = next.iter().position(|id| id == stable_id) {
            next.remove(position);
        } else {
            next.push(stable_id.to_owned());
        }
        self.set_selected(next)
    }

    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Switches granularity; the zoom always restarts from the new full series.
    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.time_range = time_range;
        self.recompute();
    }

    pub fn set_time_range_name(&mut self, name: &str) -> ChartResult<()> {
        self.set_time_range(TimeRange::parse(name)?);
        Ok(())
    }

    #[must_use]
    pub fn line_style(&self) -> CurveType {
        self.line_style
    }

    pub fn set_line_style(&mut self, line_style: CurveType) {
        self.line_style = line_style;
    }

    pub fn set_line_style_name(&mut self, name: &str) -> ChartResult<()> {
        self.line_style = CurveType::parse(name)?;
        Ok(())
    }

    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Full series for the current granularity, ignoring zoom.
    #[must_use]
    pub fn full_series(&self) -> &[ProcessedPoint] {
        self.zoom.base()
    }

    /// Points currently displayed.
    #[must_use]
    pub fn window(&self) -> &[ProcessedPoint] {
        self.zoom.window()
    }

    /// Y bounds for the displayed window and current selection.
    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        y_axis_domain(self.window(), &self.selected)
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomSelector {
        &self.zoom
    }

    pub fn arm_zoom(&mut self) {
        self.zoom.arm();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
        self.hovered = None;
    }

    #[must_use]
    pub fn can_reset_zoom(&self) -> bool {
        self.zoom.can_reset()
    }

    pub fn pointer_down(&mut self, label: Option<&str>) {
        self.zoom.pointer_down(label);
    }

    pub fn pointer_move(&mut self, label: Option<&str>) {
        self.hovered = label.map(str::to_owned);
        self.zoom.pointer_move(label);
    }

    pub fn pointer_up(&mut self) -> ZoomCommit {
        let commit = self.zoom.pointer_up();
        if matches!(commit, ZoomCommit::Applied { .. }) {
            info!(points = self.window().len(), "zoomed into sub-range");
        }
        commit
    }

    /// Pointer left the chart: hide the tooltip and drop any drag.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        self.zoom.pointer_cancel();
    }

    /// Hovered point of the displayed window, if any.
    #[must_use]
    pub fn hovered_point(&self) -> Option<(usize, &ProcessedPoint)> {
        let label = self.hovered.as_deref()?;
        self.window()
            .iter()
            .enumerate()
            .find(|(_, point)| point.label == label)
    }

    fn recompute(&mut self) {
        let series = aggregate(&self.data.data, &self.variations, self.time_range);
        debug!(
            time_range = self.time_range.as_str(),
            points = series.len(),
            "series recomputed"
        );
        self.zoom.replace_base(series);
        self.hovered = None;
    }
}
