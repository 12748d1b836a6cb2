use crate::core::{CategoryScale, LinearScale, Viewport};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PolylinePrimitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive,
};

use super::tooltip::{format_axis_percent, format_tooltip_date, format_tooltip_value};
use super::{ChartController, ChartLayout, PlotRect, RenderStyle, series_color};

const AXIS_LABEL_GAP_PX: f64 = 6.0;
const LEGEND_SWATCH_PX: f64 = 10.0;
const LEGEND_ITEM_GAP_PX: f64 = 18.0;
const TOOLTIP_PADDING_PX: f64 = 8.0;
const TOOLTIP_OFFSET_PX: f64 = 12.0;
const TOOLTIP_LINE_SPACING: f64 = 1.5;
const BADGE_MARGIN_PX: f64 = 10.0;
const BADGE_PADDING_PX: f64 = 8.0;

/// Rough glyph advance used to size boxes before a backend measures text.
#[must_use]
pub fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * 0.6
}

/// Pixel mapping of the displayed window for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub plot: PlotRect,
    pub categories: CategoryScale,
    pub values: LinearScale,
}

impl ChartGeometry {
    pub fn new(
        controller: &ChartController,
        viewport: Viewport,
        layout: ChartLayout,
    ) -> ChartResult<Self> {
        let plot = layout.plot_rect(viewport)?;
        let categories = CategoryScale::new(controller.window().len(), (plot.left, plot.right))?;
        let (lower, upper) = controller.y_domain();
        let values = if upper > lower {
            LinearScale::new(lower, upper)?
        } else {
            LinearScale::new((lower - 1.0).max(0.0), upper + 1.0)?
        };
        Ok(Self {
            plot,
            categories,
            values,
        })
    }

    pub fn y_to_pixel(self, value: f64) -> ChartResult<f64> {
        self.values
            .domain_to_pixel(value, (self.plot.bottom, self.plot.top))
    }

    /// Index into the displayed window under the pointer, if the pointer is
    /// over the plot area.
    #[must_use]
    pub fn category_index_at(self, x: f64, y: f64) -> Option<usize> {
        if !self.plot.contains(x, y) {
            return None;
        }
        self.categories.index_at(x)
    }
}

/// Resolves a pointer position to the category label beneath it.
pub fn category_at(
    controller: &ChartController,
    viewport: Viewport,
    layout: ChartLayout,
    x: f64,
    y: f64,
) -> ChartResult<Option<String>> {
    let geometry = ChartGeometry::new(controller, viewport, layout)?;
    Ok(geometry
        .category_index_at(x, y)
        .and_then(|index| controller.window().get(index))
        .map(|point| point.label.clone()))
}

/// Builds the complete frame for the controller's current state.
pub fn build_frame(
    controller: &ChartController,
    viewport: Viewport,
    layout: ChartLayout,
) -> ChartResult<RenderFrame> {
    let style = controller.theme().render_style();
    let geometry = ChartGeometry::new(controller, viewport, layout)?;
    let mut frame = RenderFrame::new(viewport).with_background(style.background);

    append_grid_and_axes(&mut frame, &geometry, &style, layout)?;
    append_category_labels(&mut frame, controller, &geometry, &style);
    append_series(&mut frame, controller, &geometry, &style)?;
    append_zoom_overlay(&mut frame, controller, &geometry, &style);
    append_legend(&mut frame, controller, viewport, layout, &style);
    append_hover(&mut frame, controller, &geometry, &style)?;
    append_zoom_badge(&mut frame, controller, viewport, &style);

    Ok(frame)
}

fn append_grid_and_axes(
    frame: &mut RenderFrame,
    geometry: &ChartGeometry,
    style: &RenderStyle,
    layout: ChartLayout,
) -> ChartResult<()> {
    let plot = geometry.plot;
    for tick in geometry.values.ticks(layout.y_tick_count) {
        let y = geometry.y_to_pixel(tick)?;
        frame.lines.push(
            LinePrimitive::new(plot.left, y, plot.right, y, 1.0, style.grid_line_color)
                .with_stroke_style(LineStrokeStyle::Dashed),
        );
        frame.texts.push(TextPrimitive::new(
            format_axis_percent(tick),
            plot.left - AXIS_LABEL_GAP_PX,
            y - style.axis_font_size_px * 0.7,
            style.axis_font_size_px,
            style.axis_label_color,
            TextHAlign::Right,
        ));
    }

    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.bottom,
        plot.right,
        plot.bottom,
        1.0,
        style.axis_line_color,
    ));
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.top,
        plot.left,
        plot.bottom,
        1.0,
        style.axis_line_color,
    ));
    Ok(())
}

fn append_category_labels(
    frame: &mut RenderFrame,
    controller: &ChartController,
    geometry: &ChartGeometry,
    style: &RenderStyle,
) {
    for (index, point) in controller.window().iter().enumerate() {
        if point.label.is_empty() {
            continue;
        }
        let Some(x) = geometry.categories.position(index) else {
            continue;
        };
        frame.texts.push(TextPrimitive::new(
            point.label.clone(),
            x,
            geometry.plot.bottom + AXIS_LABEL_GAP_PX,
            style.axis_font_size_px,
            style.axis_label_color,
            TextHAlign::Center,
        ));
    }
}

fn append_series(
    frame: &mut RenderFrame,
    controller: &ChartController,
    geometry: &ChartGeometry,
    style: &RenderStyle,
) -> ChartResult<()> {
    let window = controller.window();
    for (series_index, variation) in controller.visible_variations().into_iter().enumerate() {
        let mut projected = Vec::with_capacity(window.len());
        for (index, point) in window.iter().enumerate() {
            let (Some(x), Some(value)) = (
                geometry.categories.position(index),
                point.value(&variation.stable_id),
            ) else {
                continue;
            };
            projected.push((x, geometry.y_to_pixel(value)?));
        }
        if projected.is_empty() {
            continue;
        }
        frame.polylines.push(PolylinePrimitive::new(
            controller.line_style().flatten(&projected),
            style.series_line_width,
            series_color(series_index),
        ));
    }
    Ok(())
}

fn append_zoom_overlay(
    frame: &mut RenderFrame,
    controller: &ChartController,
    geometry: &ChartGeometry,
    style: &RenderStyle,
) {
    let Some(range) = controller.zoom().range() else {
        return;
    };
    let window = controller.window();
    let find = |label: &str| window.iter().position(|point| point.label == label);
    let (Some(left), Some(right)) = (find(&range.left), find(&range.right)) else {
        return;
    };
    let (Some(x1), Some(x2)) = (
        geometry.categories.position(left.min(right)),
        geometry.categories.position(left.max(right)),
    ) else {
        return;
    };
    let half_band = geometry.categories.band_width() / 2.0;
    let plot = geometry.plot;
    frame.rects.push(
        RectPrimitive::new(
            x1 - half_band,
            plot.top,
            (x2 - x1) + half_band * 2.0,
            plot.height(),
            style.zoom_overlay_color,
        )
        .with_border(1.0, style.zoom_overlay_border_color),
    );
}

fn append_legend(
    frame: &mut RenderFrame,
    controller: &ChartController,
    viewport: Viewport,
    layout: ChartLayout,
    style: &RenderStyle,
) {
    let visible = controller.visible_variations();
    if visible.is_empty() {
        return;
    }
    let font = style.legend_font_size_px;
    let item_width = |name: &str| LEGEND_SWATCH_PX + 4.0 + estimate_text_width(name, font);
    let total: f64 = visible.iter().map(|v| item_width(&v.name)).sum::<f64>()
        + LEGEND_ITEM_GAP_PX * (visible.len() - 1) as f64;

    let row_top = f64::from(viewport.height) - layout.margin_bottom - layout.legend_height;
    let center_y = row_top + layout.legend_height / 2.0;
    let mut x = (f64::from(viewport.width) - total) / 2.0;
    for (index, variation) in visible.into_iter().enumerate() {
        let color = series_color(index);
        frame.rects.push(RectPrimitive::new(
            x,
            center_y - LEGEND_SWATCH_PX / 2.0,
            LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            color,
        ));
        if !variation.name.is_empty() {
            frame.texts.push(TextPrimitive::new(
                variation.name.clone(),
                x + LEGEND_SWATCH_PX + 4.0,
                center_y - font * 0.7,
                font,
                style.legend_text_color,
                TextHAlign::Left,
            ));
        }
        x += item_width(&variation.name) + LEGEND_ITEM_GAP_PX;
    }
}

fn append_hover(
    frame: &mut RenderFrame,
    controller: &ChartController,
    geometry: &ChartGeometry,
    style: &RenderStyle,
) -> ChartResult<()> {
    let Some((index, point)) = controller.hovered_point() else {
        return Ok(());
    };
    let Some(x) = geometry.categories.position(index) else {
        return Ok(());
    };
    let plot = geometry.plot;
    frame.lines.push(
        LinePrimitive::new(x, plot.top, x, plot.bottom, 1.0, style.axis_line_color)
            .with_stroke_style(LineStrokeStyle::Dashed),
    );

    let font = style.tooltip_font_size_px;
    let mut rows: Vec<(String, Option<Color>)> = vec![(format_tooltip_date(&point.label), None)];
    for (series_index, variation) in controller.visible_variations().into_iter().enumerate() {
        let color = series_color(series_index);
        let value = point.value(&variation.stable_id);
        if let Some(value) = value {
            let radius = style.hover_marker_radius;
            let y = geometry.y_to_pixel(value)?;
            frame.rects.push(
                RectPrimitive::new(x - radius, y - radius, radius * 2.0, radius * 2.0, color)
                    .with_corner_radius(radius)
                    .with_border(2.0, style.background),
            );
        }
        rows.push((
            format!(
                "{}: {}",
                variation.name,
                format_tooltip_value(value.unwrap_or(f64::NAN))
            ),
            Some(color),
        ));
    }

    let line_height = font * TOOLTIP_LINE_SPACING;
    let swatch_space = LEGEND_SWATCH_PX + 6.0;
    let content_width = rows
        .iter()
        .map(|(text, color)| {
            estimate_text_width(text, font) + if color.is_some() { swatch_space } else { 0.0 }
        })
        .fold(0.0, f64::max);
    let width = content_width + TOOLTIP_PADDING_PX * 2.0;
    let height = line_height * rows.len() as f64 + TOOLTIP_PADDING_PX * 2.0;

    let mut left = x + TOOLTIP_OFFSET_PX;
    if left + width > plot.right {
        left = (x - TOOLTIP_OFFSET_PX - width).max(0.0);
    }
    let top = plot.top + TOOLTIP_OFFSET_PX;

    frame.rects.push(
        RectPrimitive::new(left, top, width, height, style.tooltip_background)
            .with_border(1.0, style.tooltip_border_color)
            .with_corner_radius(4.0),
    );
    for (row, (text, color)) in rows.into_iter().enumerate() {
        let row_top = top + TOOLTIP_PADDING_PX + line_height * row as f64;
        let mut text_x = left + TOOLTIP_PADDING_PX;
        if let Some(color) = color {
            frame.rects.push(RectPrimitive::new(
                text_x,
                row_top + (font - LEGEND_SWATCH_PX) / 2.0 + 1.0,
                LEGEND_SWATCH_PX,
                LEGEND_SWATCH_PX,
                color,
            ));
            text_x += swatch_space;
        }
        frame.texts.push(TextPrimitive::new(
            text,
            text_x,
            row_top,
            font,
            style.tooltip_text_color,
            TextHAlign::Left,
        ));
    }
    Ok(())
}

fn append_zoom_badge(
    frame: &mut RenderFrame,
    controller: &ChartController,
    viewport: Viewport,
    style: &RenderStyle,
) {
    let zoom = controller.zoom();
    if !zoom.is_active() {
        return;
    }
    let font = style.legend_font_size_px;
    let mut rows = vec!["Zoom Mode Active".to_owned()];
    if let Some(range) = zoom.range() {
        rows.push(format!("Drag from {} to select area", range.left));
    }
    let width = rows
        .iter()
        .map(|row| estimate_text_width(row, font))
        .fold(0.0, f64::max)
        + BADGE_PADDING_PX * 2.0;
    let line_height = font * TOOLTIP_LINE_SPACING;
    let height = line_height * rows.len() as f64 + BADGE_PADDING_PX * 2.0;
    let left = f64::from(viewport.width) - BADGE_MARGIN_PX - width;

    frame.rects.push(
        RectPrimitive::new(left, BADGE_MARGIN_PX, width, height, style.badge_background)
            .with_corner_radius(4.0),
    );
    for (row, text) in rows.into_iter().enumerate() {
        frame.texts.push(TextPrimitive::new(
            text,
            left + BADGE_PADDING_PX,
            BADGE_MARGIN_PX + BADGE_PADDING_PX + line_height * row as f64,
            font,
            style.badge_text_color,
            TextHAlign::Left,
        ));
    }
}
