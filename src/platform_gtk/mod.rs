use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::{error, warn};

use crate::api::{
    ChartConfig, ChartController, ThemeMode, build_frame, category_at,
    export_png_logged, load_test_data,
};
use crate::core::{CurveType, TimeRange, Viewport};
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, CairoRenderer};

pub type UiController = Rc<RefCell<ChartController>>;

const APPLICATION_ID: &str = "rs.conversion-chart.desktop";

/// Binds a [`ChartController`] to a GTK `DrawingArea` and its toolbar.
pub struct GtkChartAdapter {
    controller: UiController,
    config: ChartConfig,
    renderer: RefCell<CairoRenderer>,
    drawing_area: gtk::DrawingArea,
    reset_button: gtk::Button,
    status: gtk::Label,
}

impl GtkChartAdapter {
    pub fn new(controller: ChartController, config: ChartConfig) -> ChartResult<Rc<Self>> {
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(config.viewport.width as i32);
        drawing_area.set_content_height(config.viewport.height as i32);
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        let reset_button = gtk::Button::with_label("⟲ Reset");
        reset_button.set_sensitive(false);
        let status = gtk::Label::new(None);
        status.set_xalign(0.0);

        let adapter = Rc::new(Self {
            controller: Rc::new(RefCell::new(controller)),
            config,
            renderer: RefCell::new(CairoRenderer::new(1, 1)?),
            drawing_area,
            reset_button,
            status,
        });
        adapter.install_draw_func();
        adapter.install_pointer_interaction();
        Ok(adapter)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn controller(&self) -> UiController {
        Rc::clone(&self.controller)
    }

    /// Applies `update` to the controller and redraws.
    pub fn update_controller<T>(&self, update: impl FnOnce(&mut ChartController) -> T) -> T {
        let result = update(&mut self.controller.borrow_mut());
        self.refresh();
        result
    }

    fn refresh(&self) {
        if let Ok(controller) = self.controller.try_borrow() {
            self.reset_button.set_sensitive(controller.can_reset_zoom());
        }
        self.drawing_area.queue_draw();
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.drawing_area.width().max(0) as u32,
            self.drawing_area.height().max(0) as u32,
        )
    }

    /// Current drawing area size, or the configured size before the first
    /// allocation.
    fn export_viewport(&self) -> Viewport {
        let viewport = self.viewport();
        if viewport.is_valid() {
            viewport
        } else {
            self.config.viewport
        }
    }

    fn label_at(&self, x: f64, y: f64) -> Option<String> {
        let controller = self.controller.try_borrow().ok()?;
        category_at(&controller, self.viewport(), self.config.layout, x, y)
            .ok()
            .flatten()
    }

    fn install_draw_func(self: &Rc<Self>) {
        let adapter = Rc::clone(self);
        self.drawing_area
            .set_draw_func(move |_, context, width, height| {
                let viewport = Viewport::new(width.max(0) as u32, height.max(0) as u32);
                let Ok(controller) = adapter.controller.try_borrow() else {
                    return;
                };
                let drawn = build_frame(&controller, viewport, adapter.config.layout).and_then(
                    |frame| {
                        adapter
                            .renderer
                            .borrow_mut()
                            .render_on_cairo_context(context, &frame)
                    },
                );
                if let Err(err) = drawn {
                    warn!(error = %err, width, height, "chart draw skipped");
                }
            });
    }

    fn install_pointer_interaction(self: &Rc<Self>) {
        let motion = gtk::EventControllerMotion::new();
        {
            let adapter = Rc::clone(self);
            motion.connect_motion(move |_, x, y| {
                let label = adapter.label_at(x, y);
                adapter.update_controller(|chart| chart.pointer_move(label.as_deref()));
            });
        }
        {
            let adapter = Rc::clone(self);
            motion.connect_leave(move |_| {
                adapter.update_controller(ChartController::pointer_leave);
            });
        }
        self.drawing_area.add_controller(motion);

        let drag = gtk::GestureDrag::new();
        {
            let adapter = Rc::clone(self);
            drag.connect_drag_begin(move |_, x, y| {
                let label = adapter.label_at(x, y);
                adapter.update_controller(|chart| chart.pointer_down(label.as_deref()));
            });
        }
        {
            let adapter = Rc::clone(self);
            drag.connect_drag_update(move |gesture, offset_x, offset_y| {
                let Some((start_x, start_y)) = gesture.start_point() else {
                    return;
                };
                let label = adapter.label_at(start_x + offset_x, start_y + offset_y);
                adapter.update_controller(|chart| chart.pointer_move(label.as_deref()));
            });
        }
        {
            let adapter = Rc::clone(self);
            drag.connect_drag_end(move |_, _, _| {
                adapter.update_controller(ChartController::pointer_up);
            });
        }
        self.drawing_area.add_controller(drag);
    }

    /// Toolbar with selection, granularity, line style, theme, zoom and export.
    pub fn build_toolbar(self: &Rc<Self>) -> gtk::Box {
        let toolbar = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        toolbar.append(&self.variation_picker());
        toolbar.append(&self.time_range_picker());
        toolbar.append(&self.line_style_picker());
        toolbar.append(&self.theme_switch());

        let zoom_button = gtk::Button::with_label("🔍 Zoom");
        {
            let adapter = Rc::clone(self);
            zoom_button.connect_clicked(move |_| {
                adapter.update_controller(ChartController::arm_zoom);
            });
        }
        toolbar.append(&zoom_button);

        {
            let adapter = Rc::clone(self);
            self.reset_button.connect_clicked(move |_| {
                adapter.update_controller(ChartController::reset_zoom);
            });
        }
        toolbar.append(&self.reset_button);

        let export_button = gtk::Button::with_label("📥 Export");
        {
            let adapter = Rc::clone(self);
            export_button.connect_clicked(move |_| {
                let today = chrono::Local::now().date_naive();
                let viewport = adapter.export_viewport();
                let exported = export_png_logged(
                    &adapter.controller.borrow(),
                    &adapter.config,
                    viewport,
                    today,
                );
                match exported {
                    Some(path) => adapter
                        .status
                        .set_text(&format!("exported {}", path.display())),
                    None => adapter.status.set_text("export failed"),
                }
            });
        }
        toolbar.append(&export_button);
        toolbar
    }

    fn variation_picker(self: &Rc<Self>) -> gtk::MenuButton {
        let list = gtk::Box::new(gtk::Orientation::Vertical, 4);
        let variations = self.controller.borrow().variations().to_vec();
        for variation in variations {
            let check = gtk::CheckButton::with_label(&variation.name);
            check.set_active(self.controller.borrow().is_selected(&variation.stable_id));
            let adapter = Rc::clone(self);
            let stable_id = variation.stable_id.clone();
            check.connect_toggled(move |check| {
                let selected = adapter.controller.borrow().is_selected(&stable_id);
                if check.is_active() == selected {
                    return;
                }
                let toggled = adapter.update_controller(|chart| chart.toggle_variation(&stable_id));
                if let Err(err) = toggled {
                    adapter.status.set_text(&err.to_string());
                    check.set_active(selected);
                }
            });
            list.append(&check);
        }

        let popover = gtk::Popover::new();
        popover.set_child(Some(&list));
        let button = gtk::MenuButton::new();
        button.set_label("Variations");
        button.set_popover(Some(&popover));
        button
    }

    fn time_range_picker(self: &Rc<Self>) -> gtk::DropDown {
        let labels: Vec<&str> = TimeRange::ALL.iter().map(|range| range.label()).collect();
        let dropdown = gtk::DropDown::from_strings(&labels);
        let current = self.controller.borrow().time_range();
        if let Some(index) = TimeRange::ALL.iter().position(|range| *range == current) {
            dropdown.set_selected(index as u32);
        }
        let adapter = Rc::clone(self);
        dropdown.connect_selected_notify(move |dropdown| {
            if let Some(range) = TimeRange::ALL.get(dropdown.selected() as usize).copied() {
                adapter.update_controller(|chart| chart.set_time_range(range));
            }
        });
        dropdown
    }

    fn line_style_picker(self: &Rc<Self>) -> gtk::DropDown {
        let labels: Vec<&str> = CurveType::ALL.iter().map(|curve| curve.label()).collect();
        let dropdown = gtk::DropDown::from_strings(&labels);
        let current = self.controller.borrow().line_style();
        if let Some(index) = CurveType::ALL.iter().position(|curve| *curve == current) {
            dropdown.set_selected(index as u32);
        }
        let adapter = Rc::clone(self);
        dropdown.connect_selected_notify(move |dropdown| {
            if let Some(curve) = CurveType::ALL.get(dropdown.selected() as usize).copied() {
                adapter.update_controller(|chart| chart.set_line_style(curve));
            }
        });
        dropdown
    }

    fn theme_switch(self: &Rc<Self>) -> gtk::Box {
        let switch = gtk::Switch::new();
        switch.set_active(self.controller.borrow().theme().is_dark());
        let adapter = Rc::clone(self);
        switch.connect_active_notify(move |switch| {
            let theme = if switch.is_active() {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            };
            adapter.update_controller(|chart| chart.set_theme(theme));
        });

        let row = gtk::Box::new(gtk::Orientation::Horizontal, 4);
        row.append(&gtk::Label::new(Some("☀️")));
        row.append(&switch);
        row.append(&gtk::Label::new(Some("🌙")));
        row
    }
}

/// Loads the dataset and runs the desktop chart until the window closes.
pub fn run(config: ChartConfig) -> gtk::glib::ExitCode {
    let app = gtk::Application::builder()
        .application_id(APPLICATION_ID)
        .build();

    app.connect_activate(move |app| {
        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("Conversion rates")
            .default_width(config.viewport.width as i32)
            .default_height(config.viewport.height as i32 + 48)
            .build();

        match build_chart_view(&config) {
            Ok(view) => window.set_child(Some(&view)),
            Err(err) => {
                error!(error = %err, "chart unavailable");
                let message = gtk::Label::new(Some(&format!("Error: {err}")));
                window.set_child(Some(&message));
            }
        }
        window.present();
    });

    // Command-line arguments are consumed by the binary, not by GTK.
    app.run_with_args::<&str>(&[])
}

fn build_chart_view(config: &ChartConfig) -> ChartResult<gtk::Box> {
    let data = load_test_data(&config.data_source)?;
    let controller = ChartController::from_config(data, config);
    let adapter = GtkChartAdapter::new(controller, config.clone())?;

    let layout = gtk::Box::new(gtk::Orientation::Vertical, 6);
    layout.append(&adapter.build_toolbar());
    layout.append(adapter.drawing_area());
    layout.append(&adapter.status);
    Ok(layout)
}
