//! Canned analysis reports rendered as plain text, shared by the desktop
//! analysis panel and the `report` command.

use std::fmt::Write as _;

use crate::model::datetime::DISPLAY_FORMAT;
use crate::model::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisKind {
    #[default]
    Completion,
    Overlaps,
    Teams,
    Effort,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Completion,
        AnalysisKind::Overlaps,
        AnalysisKind::Teams,
        AnalysisKind::Effort,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::Completion => "Project completion time and duration",
            AnalysisKind::Overlaps => "Overlapping tasks",
            AnalysisKind::Teams => "Resources and teams",
            AnalysisKind::Effort => "Effort breakdown: Resource-wise",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            AnalysisKind::Completion => "PROJECT COMPLETION ANALYSIS",
            AnalysisKind::Overlaps => "OVERLAPPING TASKS ANALYSIS",
            AnalysisKind::Teams => "RESOURCES AND TEAMS ANALYSIS",
            AnalysisKind::Effort => "EFFORT BREAKDOWN ANALYSIS",
        }
    }
}

/// Render one analysis section.
pub fn render(project: &Project, kind: AnalysisKind) -> String {
    let mut out = String::new();
    let heading = kind.heading();
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "=".repeat(heading.len()));
    out.push('\n');

    match kind {
        AnalysisKind::Completion => completion(project, &mut out),
        AnalysisKind::Overlaps => overlaps(project, &mut out),
        AnalysisKind::Teams => teams(project, &mut out),
        AnalysisKind::Effort => effort(project, &mut out),
    }
    out
}

/// All four sections followed by load counts.
pub fn render_all(project: &Project) -> String {
    let mut out = String::new();
    for kind in AnalysisKind::ALL {
        out.push_str(&render(project, kind));
        out.push('\n');
    }
    let _ = writeln!(out, "Total tasks loaded: {}", project.tasks().len());
    let _ = writeln!(out, "Total resources loaded: {}", project.resources().len());
    out
}

fn completion(project: &Project, out: &mut String) {
    let completion = project
        .completion_time()
        .map_or_else(|| "n/a".to_string(), |t| t.format(DISPLAY_FORMAT).to_string());
    let hours = project.duration_hours() as f64;
    let _ = writeln!(out, "Project Completion Time: {completion}");
    let _ = writeln!(
        out,
        "Project Duration: {:.2} hours ({:.2} days)",
        hours,
        hours / 24.0
    );
}

fn overlaps(project: &Project, out: &mut String) {
    let mut entries = project.find_overlapping_tasks();
    if entries.is_empty() {
        out.push_str("No overlapping tasks found.\n");
        return;
    }
    entries.sort();
    out.push_str("Overlapping task pairs:\n");
    for entry in entries {
        let _ = writeln!(out, "  • {entry}");
    }
}

fn teams(project: &Project, out: &mut String) {
    out.push_str("Task Teams:\n");
    for &id in project.tasks().keys() {
        let team = project.team_for_task(id);
        let names = if team.is_empty() {
            "No team assigned".to_string()
        } else {
            team.into_iter().collect::<Vec<_>>().join(", ")
        };
        let _ = writeln!(out, "  Task {id}: {names}");
    }
}

fn effort(project: &Project, out: &mut String) {
    out.push_str("Resource Effort (in hours):\n");
    for (name, hours) in project.resource_effort() {
        let _ = writeln!(out, "  {name:<10}: {hours:6.2} hours");
    }
}
