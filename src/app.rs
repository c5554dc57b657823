use std::path::{Path, PathBuf};

use project_planner::config::AppConfig;
use project_planner::model::TimelineViewport;
use project_planner::report::{self, AnalysisKind};
use project_planner::{PlanError, Project, TaskId};

use crate::ui;

/// Which view fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainView {
    Table,
    Gantt,
}

/// Main application state.
pub struct PlannerApp {
    pub project: Project,
    pub config: AppConfig,
    pub viewport: TimelineViewport,
    pub view: MainView,
    pub selected_task: Option<TaskId>,

    // Dialog state
    pub show_add_task: bool,
    pub show_add_resource: bool,
    pub show_about: bool,
    pub new_task_id: String,
    pub new_task_title: String,
    pub new_task_start: String,
    pub new_task_end: String,
    pub new_task_deps: String,
    pub new_resource_name: String,
    pub new_resource_allocations: String,
    pub dialog_error: Option<String>,

    // Analysis panel
    pub analysis_kind: AnalysisKind,
    pub analysis_text: String,

    pub status_message: String,
}

impl PlannerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        tasks: Option<PathBuf>,
        resources: Option<PathBuf>,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let now = chrono::Local::now().naive_local();
        let mut app = Self {
            project: Project::new("My Project"),
            config,
            viewport: TimelineViewport::around(now, now + chrono::Duration::days(30)),
            view: MainView::Table,
            selected_task: None,
            show_add_task: false,
            show_add_resource: false,
            show_about: false,
            new_task_id: String::new(),
            new_task_title: String::new(),
            new_task_start: String::new(),
            new_task_end: String::new(),
            new_task_deps: String::new(),
            new_resource_name: String::new(),
            new_resource_allocations: String::new(),
            dialog_error: None,
            analysis_kind: AnalysisKind::default(),
            analysis_text: String::new(),
            status_message: "Ready".to_string(),
        };
        app.reset_dialog_fields();

        let auto = app.config.auto_load;
        let tasks = tasks.or_else(|| auto.then(|| app.config.default_tasks_path()).flatten());
        let resources =
            resources.or_else(|| auto.then(|| app.config.default_resources_path()).flatten());
        if let Some(path) = tasks {
            app.load_tasks(&path);
        }
        if let Some(path) = resources {
            app.load_resources(&path);
        }
        app
    }

    // --- File operations ---

    pub fn new_project(&mut self) {
        self.project = Project::new("New Project");
        self.selected_task = None;
        self.analysis_text.clear();
        self.recalculate_viewport();
        tracing::info!("New project created");
        self.status_message = "New project created. All tasks and resources cleared.".to_string();
    }

    /// Saving has no file format; the action only reports that.
    pub fn save_project(&mut self) {
        if self.project.is_empty() {
            self.status_message = "Nothing to save".to_string();
            return;
        }
        tracing::warn!("Save requested but project saving is not supported");
        self.status_message = "Saving is not supported; reload from the input files".to_string();
    }

    pub fn pick_tasks_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Task files", &["txt", "csv"])
            .set_directory(".")
            .pick_file()
        {
            self.load_tasks(&path);
        }
    }

    pub fn pick_resources_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Resource files", &["txt", "csv"])
            .set_directory(".")
            .pick_file()
        {
            self.load_resources(&path);
        }
    }

    pub fn load_tasks(&mut self, path: &Path) {
        match self.project.load_tasks(path) {
            Ok(count) => {
                tracing::info!("Loaded {} tasks from {}", count, path.display());
                self.recalculate_viewport();
                self.refresh_analysis();
                self.status_message = format!("Tasks uploaded successfully ({count})");
            }
            Err(e) => self.report_error("Error uploading tasks", &e),
        }
    }

    pub fn load_resources(&mut self, path: &Path) {
        match self.project.load_resources(path) {
            Ok(count) => {
                tracing::info!("Loaded {} resources from {}", count, path.display());
                self.refresh_analysis();
                self.status_message = format!("Resources uploaded successfully ({count})");
            }
            Err(e) => self.report_error("Error uploading resources", &e),
        }
    }

    // --- Interactive inserts ---

    /// Returns true when the task was added and the dialog may close.
    pub fn create_task_from_dialog(&mut self) -> bool {
        let result = self.project.add_task_from_form(
            &self.new_task_id,
            &self.new_task_title,
            &self.new_task_start,
            &self.new_task_end,
            &self.new_task_deps,
        );
        match result {
            Ok(()) => {
                tracing::info!("Added task {}", self.new_task_id.trim());
                self.status_message = "Task added successfully".to_string();
                self.reset_dialog_fields();
                self.recalculate_viewport();
                self.refresh_analysis();
                true
            }
            Err(e) => {
                self.report_error("Error adding task", &e);
                self.dialog_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn create_resource_from_dialog(&mut self) -> bool {
        let result = self
            .project
            .add_resource_from_form(&self.new_resource_name, &self.new_resource_allocations);
        match result {
            Ok(()) => {
                tracing::info!("Added resource {}", self.new_resource_name.trim());
                self.status_message = "Resource added successfully".to_string();
                self.reset_dialog_fields();
                self.refresh_analysis();
                true
            }
            Err(e) => {
                self.report_error("Error adding resource", &e);
                self.dialog_error = Some(e.to_string());
                false
            }
        }
    }

    // --- Analysis ---

    pub fn run_analysis(&mut self) {
        tracing::debug!("Running analysis {:?}", self.analysis_kind);
        self.analysis_text = report::render(&self.project, self.analysis_kind);
    }

    fn refresh_analysis(&mut self) {
        if !self.analysis_text.is_empty() {
            self.run_analysis();
        }
    }

    fn report_error(&mut self, what: &str, e: &PlanError) {
        let detail = std::iter::successors(Some(e as &dyn std::error::Error), |e| e.source())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ");
        tracing::warn!("{}: {}", what, detail);
        self.status_message = format!("{what}: {detail}");
    }

    fn reset_dialog_fields(&mut self) {
        let next_id = self.project.next_task_id();
        self.new_task_id = next_id.to_string();
        self.new_task_title.clear();
        self.new_task_start = "20250101+0800".to_string();
        self.new_task_end = "20250131+1700".to_string();
        self.new_task_deps.clear();
        self.new_resource_name.clear();
        self.new_resource_allocations.clear();
        self.dialog_error = None;
    }

    fn recalculate_viewport(&mut self) {
        if let (Some(start), Some(end)) = (self.project.start_time(), self.project.completion_time())
        {
            let ppd = self.viewport.pixels_per_day;
            self.viewport = TimelineViewport::around(start, end);
            self.viewport.pixels_per_day = ppd;
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_project();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Resources: {} · Allocations: {}",
                                self.project.tasks().len(),
                                self.project.resources().len(),
                                self.project.allocations().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Right panel: analysis
        egui::SidePanel::right("analysis_panel")
            .default_width(420.0)
            .min_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui::analysis::show_analysis_panel(self, ui);
            });

        // Central panel: task table or Gantt chart
        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            MainView::Table => {
                if let Some(id) = ui::task_table::show_task_table(&self.project, self.selected_task, ui)
                {
                    self.selected_task = Some(id);
                }
            }
            MainView::Gantt => {
                ui::gantt_chart::show_gantt_chart(
                    &self.project,
                    &mut self.viewport,
                    &mut self.selected_task,
                    ui,
                );
            }
        });

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_add_resource {
            ui::dialogs::show_add_resource_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
