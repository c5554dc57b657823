#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand, ValueEnum};
use project_planner::config::AppConfig;
use project_planner::report::{self, AnalysisKind};
use project_planner::Project;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan project tasks and resources, and analyse the schedule")]
struct Cli {
    /// Task file to load on startup
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Resource file to load on startup
    #[arg(long, global = true)]
    resources: Option<PathBuf>,

    /// Settings file to use instead of the one in the config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the analysis report to stdout instead of opening a window
    Report {
        /// Only print one analysis
        #[arg(long, value_enum)]
        kind: Option<ReportKind>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Completion,
    Overlaps,
    Teams,
    Effort,
}

impl From<ReportKind> for AnalysisKind {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Completion => AnalysisKind::Completion,
            ReportKind::Overlaps => AnalysisKind::Overlaps,
            ReportKind::Teams => AnalysisKind::Teams,
            ReportKind::Effort => AnalysisKind::Effort,
        }
    }
}

/// Initialize tracing on stderr so report output on stdout stays clean.
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}; using defaults");
            AppConfig::default()
        }
    };
    init_tracing(&config);

    match cli.command {
        Some(Commands::Report { kind }) => run_report(&config, cli.tasks, cli.resources, kind),
        None => run_gui(config, cli.tasks, cli.resources),
    }
}

fn run_report(
    config: &AppConfig,
    tasks: Option<PathBuf>,
    resources: Option<PathBuf>,
    kind: Option<ReportKind>,
) -> anyhow::Result<()> {
    let Some(tasks) = tasks.or_else(|| config.default_tasks_path()) else {
        bail!("Could not find {} file", config.tasks_file);
    };
    let Some(resources) = resources.or_else(|| config.default_resources_path()) else {
        bail!("Could not find {} file", config.resources_file);
    };

    let mut project = Project::default();
    tracing::info!("Loading tasks from {}", tasks.display());
    let count = project
        .load_tasks(&tasks)
        .with_context(|| format!("Error loading tasks from {}", tasks.display()))?;
    tracing::info!("Loaded {} tasks", count);

    tracing::info!("Loading resources from {}", resources.display());
    let count = project
        .load_resources(&resources)
        .with_context(|| format!("Error loading resources from {}", resources.display()))?;
    tracing::info!("Loaded {} resources", count);

    let text = match kind {
        Some(kind) => report::render(&project, kind.into()),
        None => report::render_all(&project),
    };
    print!("{text}");
    Ok(())
}

fn run_gui(
    config: AppConfig,
    tasks: Option<PathBuf>,
    resources: Option<PathBuf>,
) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Project Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Project Planner",
        options,
        Box::new(move |cc| Ok(Box::new(app::PlannerApp::new(cc, config, tasks, resources)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
