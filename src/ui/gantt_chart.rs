use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveTime};
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use project_planner::model::datetime::DISPLAY_FORMAT;
use project_planner::model::TimelineViewport;
use project_planner::{Project, Task, TaskId};

use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_WIDTH;

/// Render the Gantt chart: one bar per task, ordered by start time.
pub fn show_gantt_chart(
    project: &Project,
    viewport: &mut TimelineViewport,
    selected_task: &mut Option<TaskId>,
    ui: &mut Ui,
) {
    let mut tasks: Vec<&Task> = project.tasks().values().collect();
    if tasks.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new("No tasks to display").color(theme::TEXT_DIM));
        });
        return;
    }
    tasks.sort_by_key(|t| (t.start(), t.id()));

    // Tasks that overlap a dependency, or are overlapped by a dependent.
    let flagged: BTreeSet<TaskId> = project
        .overlapping_pairs()
        .into_iter()
        .flat_map(|(task, dep)| [task, dep])
        .collect();

    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll > 0.0 {
            viewport.zoom_in();
        } else if scroll < 0.0 {
            viewport.zoom_out();
        }
    }

    let available = ui.available_size();
    let chart_width = (LABEL_WIDTH + viewport.total_width()).max(available.x);
    let chart_height = HEADER_HEIGHT + tasks.len() as f32 * (ROW_HEIGHT + ROW_PADDING) + 20.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;
            let timeline_origin = Pos2::new(origin.x + LABEL_WIDTH, origin.y);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_timeline_header(&painter, timeline_origin, viewport, response.rect.bottom());

            // Bar rects by task id, for dependency connectors.
            let mut bars: HashMap<TaskId, Rect> = HashMap::new();

            for (i, task) in tasks.iter().enumerate() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    row_bg,
                );

                let label_rect = Rect::from_min_size(
                    Pos2::new(origin.x, y),
                    Vec2::new(LABEL_WIDTH - 8.0, ROW_HEIGHT),
                );
                painter.with_clip_rect(label_rect).text(
                    Pos2::new(origin.x + 8.0, y + ROW_HEIGHT / 2.0),
                    Align2::LEFT_CENTER,
                    format!("{}  {}", task.id(), task.title()),
                    theme::font_bar(),
                    theme::TEXT_SECONDARY,
                );

                let is_selected = *selected_task == Some(task.id());
                let is_flagged = flagged.contains(&task.id());
                let bar_rect = draw_task_bar(
                    &painter,
                    timeline_origin,
                    viewport,
                    task,
                    y,
                    theme::task_color(i),
                    is_selected,
                    is_flagged,
                );
                bars.insert(task.id(), bar_rect);

                let bar_response = ui
                    .interact(
                        bar_rect,
                        ui.make_persistent_id(("task-bar", task.id())),
                        Sense::click(),
                    )
                    .on_hover_text(tooltip(project, task, is_flagged));
                if bar_response.clicked() {
                    *selected_task = Some(task.id());
                }
            }

            draw_dependencies(&painter, &tasks, &bars);
        });
}

fn tooltip(project: &Project, task: &Task, is_flagged: bool) -> String {
    let team = project
        .team_for_task(task.id())
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ");
    let mut text = format!(
        "{}\n{} → {}\n{} hours",
        task.title(),
        task.start().format(DISPLAY_FORMAT),
        task.end().format(DISPLAY_FORMAT),
        task.duration_hours()
    );
    if !team.is_empty() {
        text.push_str(&format!("\nTeam: {team}"));
    }
    if is_flagged {
        text.push_str("\nOverlaps a dependency");
    }
    text
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    bottom: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(
            Pos2::new(origin.x - LABEL_WIDTH, origin.y),
            Vec2::new(LABEL_WIDTH + viewport.total_width(), HEADER_HEIGHT),
        ),
        0.0,
        theme::BG_HEADER,
    );

    // Label every day when zoomed in, otherwise once a week.
    let step = if viewport.pixels_per_day >= 30.0 { 1 } else { 7 };
    let first = viewport.start.date().and_time(NaiveTime::MIN);
    for n in 0..=viewport.days() + 1 {
        let day = first + Duration::days(n);
        if day > viewport.end {
            break;
        }
        let x = origin.x + viewport.time_to_x(day);
        if x >= origin.x {
            painter.line_segment(
                [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, bottom)],
                Stroke::new(0.5, theme::GRID_LINE),
            );
            if n % step == 0 {
                painter.text(
                    Pos2::new(x + 3.0, origin.y + HEADER_HEIGHT / 2.0),
                    Align2::LEFT_CENTER,
                    day.format("%d %b").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    task: &Task,
    y: f32,
    color: Color32,
    is_selected: bool,
    is_flagged: bool,
) -> Rect {
    let x_start = origin.x + viewport.time_to_x(task.start());
    let x_end = origin.x + viewport.time_to_x(task.end());
    let bar_width = (x_end - x_start).max(4.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, color);

    if is_flagged {
        painter.rect_stroke(bar_rect.expand(1.0), rounding, Stroke::new(2.0, theme::OVERLAP_WARNING));
    }
    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(2.5),
            Rounding::same(theme::BAR_ROUNDING + 2.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if bar_width > 30.0 {
        let galley = painter.layout_no_wrap(
            task.title().to_string(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

/// Connect each resolved dependency's end to the dependent's start.
fn draw_dependencies(painter: &egui::Painter, tasks: &[&Task], bars: &HashMap<TaskId, Rect>) {
    let stroke = Stroke::new(1.0, theme::DEPENDENCY_LINE);
    for task in tasks {
        let Some(to) = bars.get(&task.id()) else {
            continue;
        };
        for dep in task.dependency_tasks() {
            let Some(from) = bars.get(dep) else {
                continue;
            };
            let start = from.right_center();
            let end = to.left_center();
            let elbow_x = start.x.max(end.x - 8.0);
            painter.line_segment([start, Pos2::new(elbow_x, start.y)], stroke);
            painter.line_segment([Pos2::new(elbow_x, start.y), Pos2::new(elbow_x, end.y)], stroke);
            painter.line_segment([Pos2::new(elbow_x, end.y), end], stroke);
            painter.circle_filled(end, 2.5, theme::DEPENDENCY_LINE);
        }
    }
}
