use egui::{Color32, Context, RichText, Window};

use crate::app::PlannerApp;
use crate::ui::theme;

const DIALOG_WIDTH: f32 = 380.0;

fn field_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(RichText::new(label).color(theme::TEXT_SECONDARY));
    ui.add_sized(
        [220.0, 24.0],
        egui::TextEdit::singleline(value).hint_text(hint),
    );
    ui.end_row();
}

fn dialog_buttons(ui: &mut egui::Ui, confirm: &str) -> (bool, bool) {
    let mut confirmed = false;
    let mut cancelled = false;
    ui.horizontal(|ui| {
        let create_btn = egui::Button::new(RichText::new(confirm).color(Color32::WHITE))
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(4.0));
        if ui.add_sized([100.0, 28.0], create_btn).clicked() {
            confirmed = true;
        }
        if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
            cancelled = true;
        }
    });
    (confirmed, cancelled)
}

fn show_dialog_error(ui: &mut egui::Ui, error: &Option<String>) {
    if let Some(err) = error {
        ui.add_space(4.0);
        ui.label(RichText::new(err).color(theme::OVERLAP_WARNING).small());
    }
}

/// Render the "Add Task" dialog.
pub fn show_add_task_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add New Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    field_row(ui, "Task ID", &mut app.new_task_id, "1");
                    field_row(ui, "Task Title", &mut app.new_task_title, "Task title...");
                    field_row(ui, "Start (yyyyMMdd+HHmm)", &mut app.new_task_start, "20250101+0800");
                    field_row(ui, "End (yyyyMMdd+HHmm)", &mut app.new_task_end, "20250131+1700");
                    field_row(ui, "Dependencies", &mut app.new_task_deps, "1,2,3");
                });
            show_dialog_error(ui, &app.dialog_error);

            ui.add_space(6.0);
            ui.separator();
            let (confirmed, cancelled) = dialog_buttons(ui, "Add Task");
            if confirmed && app.create_task_from_dialog() {
                should_close = true;
            }
            should_close |= cancelled;
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_task = false;
        app.dialog_error = None;
    }
}

/// Render the "Add Resource" dialog.
pub fn show_add_resource_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add New Resource").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("add_resource_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    field_row(ui, "Resource Name", &mut app.new_resource_name, "Alice");
                    field_row(
                        ui,
                        "Allocations (task:percentage)",
                        &mut app.new_resource_allocations,
                        "1:50, 2:100, 3:25",
                    );
                });
            show_dialog_error(ui, &app.dialog_error);

            ui.add_space(6.0);
            ui.separator();
            let (confirmed, cancelled) = dialog_buttons(ui, "Add Resource");
            if confirmed && app.create_resource_from_dialog() {
                should_close = true;
            }
            should_close |= cancelled;
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_resource = false;
        app.dialog_error = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Project Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Tasks, resources and schedule analysis");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
