use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use project_planner::model::datetime::DISPLAY_FORMAT;
use project_planner::{Project, TaskId};

use crate::ui::theme;

/// Render the task table. Returns the id of a row the user clicked.
pub fn show_task_table(
    project: &Project,
    selected_task: Option<TaskId>,
    ui: &mut Ui,
) -> Option<TaskId> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({})", project.tasks().len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    if project.tasks().is_empty() {
        ui.label(RichText::new("No tasks loaded. Use File → Upload Tasks.").color(theme::TEXT_DIM));
        return None;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(40.0))
        .column(Column::initial(180.0).at_least(80.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::initial(110.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in ["Id", "Task", "Start", "End", "Dependencies", "Resources"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong().color(theme::TEXT_SECONDARY));
                });
            }
        })
        .body(|mut body| {
            for task in project.tasks().values() {
                let deps = task
                    .dependency_ids()
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let team = project
                    .team_for_task(task.id())
                    .into_iter()
                    .collect::<Vec<_>>()
                    .join(", ");

                body.row(20.0, |mut row| {
                    row.set_selected(selected_task == Some(task.id()));
                    row.col(|ui| {
                        ui.label(task.id().to_string());
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(task.title()).truncate());
                    });
                    row.col(|ui| {
                        ui.label(task.start().format(DISPLAY_FORMAT).to_string());
                    });
                    row.col(|ui| {
                        ui.label(task.end().format(DISPLAY_FORMAT).to_string());
                    });
                    row.col(|ui| {
                        ui.label(deps);
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(team).truncate());
                    });
                    if row.response().clicked() {
                        clicked = Some(task.id());
                    }
                });
            }
        });

    clicked
}
