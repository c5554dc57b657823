use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icon;

use crate::app::{MainView, PlannerApp};
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_header()), |ui| {
            if ui.button(format!("{}  New Project", icon::FILE_PLUS)).clicked() {
                app.new_project();
                ui.close_menu();
            }
            if ui.button(format!("{}  Save          Ctrl+S", icon::FLOPPY_DISK)).clicked() {
                app.save_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Upload Tasks...", icon::FOLDER_OPEN)).clicked() {
                app.pick_tasks_file();
                ui.close_menu();
            }
            if ui.button(format!("{}  Upload Resources...", icon::FOLDER_OPEN)).clicked() {
                app.pick_resources_file();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Edit  ").font(theme::font_header()), |ui| {
            if ui.button(format!("{}  Add Task...", icon::PLUS)).clicked() {
                app.show_add_task = true;
                ui.close_menu();
            }
            if ui.button(format!("{}  Add Resource...", icon::USER_PLUS)).clicked() {
                app.show_add_resource = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_header()), |ui| {
            if ui
                .radio_value(&mut app.view, MainView::Table, format!("{}  Task Table", icon::TABLE))
                .clicked()
            {
                ui.close_menu();
            }
            if ui
                .radio_value(&mut app.view, MainView::Gantt, format!("{}  Gantt Chart", icon::CHART_BAR))
                .clicked()
            {
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Zoom In", icon::MAGNIFYING_GLASS_PLUS)).clicked() {
                app.viewport.zoom_in();
                ui.close_menu();
            }
            if ui.button(format!("{}  Zoom Out", icon::MAGNIFYING_GLASS_MINUS)).clicked() {
                app.viewport.zoom_out();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_header()), |ui| {
            if ui.button(format!("{}  About", icon::INFO)).clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();
        if ui.button("Analyze").clicked() {
            app.run_analysis();
        }
        if ui.button("Visualize").clicked() {
            if app.project.tasks().is_empty() {
                app.status_message =
                    "No tasks to visualize. Please upload tasks first.".to_string();
            } else {
                app.view = MainView::Gantt;
            }
        }

        // Right-aligned editable project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut app.project.name)
                    .desired_width(180.0)
                    .font(theme::font_sub()),
            );
            ui.label(RichText::new("Project:").size(11.0).weak());
        });
    });
}
