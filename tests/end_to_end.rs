//! Whole-file loads through the public API.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use project_planner::model::datetime::parse_datetime;
use project_planner::{PlanError, Project};
use tempfile::TempDir;

const TASKS: &str = "\
1,Design,20250101+0800,20250103+1700
2,Build,20250103+0800,20250110+1700,1
";

const RESOURCES: &str = "Alice,1:100,2:50\n";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn loaded(dir: &TempDir) -> Project {
    let mut project = Project::default();
    project.load_tasks(write(dir, "tasks.txt", TASKS)).unwrap();
    project
        .load_resources(write(dir, "resources.txt", RESOURCES))
        .unwrap();
    project
}

#[test]
fn design_and_build_scenario() {
    let dir = TempDir::new().unwrap();
    let project = loaded(&dir);

    let build = project.task(2).unwrap();
    assert_eq!(project.completion_time(), Some(build.end()));

    assert_eq!(
        project.team_for_task(1),
        BTreeSet::from(["Alice".to_string()])
    );

    let design = project.task(1).unwrap();
    let expected = design.duration_hours() as f64 * 1.0 + build.duration_hours() as f64 * 0.5;
    assert_eq!(project.resource_effort()["Alice"], expected);

    assert_eq!(
        project.find_overlapping_tasks(),
        vec!["Task 2 ('Build') overlaps with dependency Task 1 ('Design')".to_string()]
    );
}

#[test]
fn malformed_task_line_leaves_project_empty() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "tasks.txt",
        "1,Design,20250101+0800,20250103+1700\n\n3,Broken,20250101 0800,20250103+1700\n",
    );

    let mut project = Project::default();
    let err = project.load_tasks(&path).unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.line(), Some(3));
    assert!(project.tasks().is_empty());
}

#[test]
fn malformed_resource_line_leaves_resources_untouched() {
    let dir = TempDir::new().unwrap();
    let mut project = loaded(&dir);
    let path = write(&dir, "more.txt", "Bob,1:50\nCarol,2:lots\n");

    let err = project.load_resources(&path).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert_eq!(project.resources().len(), 1);
    assert_eq!(project.allocations().len(), 2);
}

#[test]
fn unknown_references_are_silently_dropped() {
    let dir = TempDir::new().unwrap();
    let mut project = Project::default();
    project
        .load_tasks(write(
            &dir,
            "tasks.txt",
            "1,Solo,20250101+0800,20250101+1800,99\n",
        ))
        .unwrap();
    project
        .load_resources(write(&dir, "resources.txt", "Zed,1:50,42:100\n"))
        .unwrap();

    assert!(project.task(1).unwrap().dependency_tasks().is_empty());
    assert_eq!(project.allocations().len(), 1);
    assert_eq!(project.resource_effort()["Zed"], 5.0);
    assert!(project.team_for_task(42).is_empty());
}

#[test]
fn reloading_resources_is_additive() {
    let dir = TempDir::new().unwrap();
    let mut project = loaded(&dir);
    let before = project.resource_effort()["Alice"];

    project
        .load_resources(dir.path().join("resources.txt"))
        .unwrap();
    assert_eq!(project.allocations().len(), 4);
    assert_eq!(project.resource_effort()["Alice"], before);

    project
        .load_resources(write(&dir, "later.txt", "Alice,2:100\n"))
        .unwrap();
    assert_eq!(project.allocations().len(), 5);
    assert_eq!(
        project.team_for_task(1),
        BTreeSet::from(["Alice".to_string()])
    );
}

#[test]
fn resources_loaded_before_tasks_create_no_allocations() {
    let dir = TempDir::new().unwrap();
    let mut project = Project::default();
    project
        .load_resources(write(&dir, "resources.txt", RESOURCES))
        .unwrap();
    project.load_tasks(write(&dir, "tasks.txt", TASKS)).unwrap();

    assert!(project.allocations().is_empty());
    assert!(project.team_for_task(1).is_empty());
    // Effort reads the resource's own map, so it still sees the tasks.
    assert!(project.resource_effort()["Alice"] > 0.0);
}

#[test]
fn task_reload_replaces_by_id() {
    let dir = TempDir::new().unwrap();
    let mut project = loaded(&dir);
    project
        .load_tasks(write(
            &dir,
            "update.txt",
            "2,Build v2,20250104+0800,20250105+0800,1\n",
        ))
        .unwrap();

    let build = project.task(2).unwrap();
    assert_eq!(build.title(), "Build v2");
    assert_eq!(build.start(), parse_datetime("20250104+0800").unwrap());
    assert!(build.dependency_tasks().contains(&1));
    assert_eq!(project.tasks().len(), 2);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let mut project = Project::default();
    let err = project.load_tasks(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, PlanError::Io { .. }));
}
