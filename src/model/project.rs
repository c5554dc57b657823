use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDateTime;

use super::datetime::{self, parse_datetime};
use super::resource::{Allocation, Resource};
use super::task::{Task, TaskId};
use crate::error::{FieldError, PlanError, Result};
use crate::io;

/// A planning project: tasks, resources and the allocations linking them.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    tasks: BTreeMap<TaskId, Task>,
    resources: BTreeMap<String, Resource>,
    allocations: Vec<Allocation>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            tasks: BTreeMap::new(),
            resources: BTreeMap::new(),
            allocations: Vec::new(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    // --- Read access ---

    pub fn tasks(&self) -> &BTreeMap<TaskId, Task> {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.resources.is_empty()
    }

    // --- Loading ---

    /// Load a task file. Every line is parsed before anything is inserted,
    /// so a failure leaves the project unchanged. Returns the number of
    /// tasks read.
    pub fn load_tasks(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let content = io::read_file(path.as_ref())?;
        let parsed = io::task_file::parse_tasks(&content)?;
        Ok(self.insert_tasks(parsed))
    }

    /// Load a resource file with the same all-or-nothing policy as
    /// [`Project::load_tasks`]. Returns the number of resources read.
    pub fn load_resources(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let content = io::read_file(path.as_ref())?;
        let parsed = io::resource_file::parse_resources(&content)?;
        Ok(self.insert_resources(parsed))
    }

    /// Insert already-parsed tasks, replacing any with the same id, then
    /// relink dependencies across the whole project.
    pub fn insert_tasks(&mut self, tasks: Vec<Task>) -> usize {
        let count = tasks.len();
        for task in tasks {
            self.tasks.insert(task.id(), task);
        }
        self.link_dependencies();
        count
    }

    /// Insert already-parsed resources and derive their allocations.
    pub fn insert_resources(&mut self, resources: Vec<Resource>) -> usize {
        let count = resources.len();
        for resource in resources {
            self.insert_resource(resource);
        }
        count
    }

    /// Resolve declared dependency ids into links. Dangling ids are dropped.
    fn link_dependencies(&mut self) {
        let known: BTreeSet<TaskId> = self.tasks.keys().copied().collect();
        for task in self.tasks.values_mut() {
            let resolved: Vec<TaskId> = task
                .dependency_ids()
                .iter()
                .copied()
                .filter(|id| known.contains(id))
                .collect();
            for id in resolved {
                task.add_dependency_task(id);
            }
        }
    }

    /// Allocations are append-only: a reloaded resource keeps its earlier
    /// entries. Entries for unknown task ids produce no allocation.
    fn insert_resource(&mut self, resource: Resource) {
        let name = resource.name().to_string();
        for (&task_id, &pct) in resource.allocations() {
            if self.tasks.contains_key(&task_id) {
                self.allocations.push(Allocation::new(&name, task_id, pct));
            }
        }
        self.resources.insert(name, resource);
    }

    // --- Interactive inserts ---

    /// Add a single task. Rejects an empty title, a duplicate id and an
    /// end before the start. Links dependencies the same way a load does.
    pub fn add_task(
        &mut self,
        id: TaskId,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        dependency_ids: Vec<TaskId>,
    ) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PlanError::Validation("Task title cannot be empty".into()));
        }
        if self.tasks.contains_key(&id) {
            return Err(PlanError::Validation(format!("Task {id} already exists")));
        }
        if start > end {
            return Err(PlanError::Validation(format!(
                "Task {id} ends before it starts"
            )));
        }
        self.insert_tasks(vec![Task::new(id, title, start, end, dependency_ids)]);
        Ok(())
    }

    /// [`Project::add_task`] from raw form text.
    pub fn add_task_from_form(
        &mut self,
        id: &str,
        title: &str,
        start: &str,
        end: &str,
        dependencies: &str,
    ) -> Result<()> {
        let id = parse_int(id)?;
        if title.trim().is_empty() {
            return Err(PlanError::Validation("Task title cannot be empty".into()));
        }
        let start = parse_datetime(start.trim())?;
        let end = parse_datetime(end.trim())?;
        let deps = dependencies
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_int)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.add_task(id, title, start, end, deps)
    }

    /// Add (or replace) a resource and derive its allocations.
    pub fn add_resource(&mut self, name: &str, allocations: &[(TaskId, i32)]) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::Validation(
                "Resource name cannot be empty".into(),
            ));
        }
        let mut resource = Resource::new(name);
        for &(task_id, pct) in allocations {
            resource.add_allocation(task_id, pct);
        }
        self.insert_resource(resource);
        Ok(())
    }

    /// [`Project::add_resource`] from form text like `1:50, 2:100`.
    pub fn add_resource_from_form(&mut self, name: &str, allocations: &str) -> Result<()> {
        let mut pairs = Vec::new();
        for entry in allocations.split(',').map(str::trim) {
            if let Some(pair) = io::resource_file::parse_allocation(entry)? {
                pairs.push(pair);
            }
        }
        self.add_resource(name, &pairs)
    }

    /// Suggested id for the next interactive task. Stays at `TaskId::MAX`
    /// once that id is taken.
    pub fn next_task_id(&self) -> TaskId {
        self.tasks
            .keys()
            .next_back()
            .map_or(1, |id| id.saturating_add(1))
    }

    // --- Analysis ---

    /// Latest end time across all tasks.
    pub fn completion_time(&self) -> Option<NaiveDateTime> {
        self.tasks.values().map(Task::end).max()
    }

    /// Earliest start time across all tasks.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.tasks.values().map(Task::start).min()
    }

    /// Whole hours from the earliest start to the latest end; 0 when empty.
    pub fn duration_hours(&self) -> i64 {
        match (self.start_time(), self.completion_time()) {
            (Some(start), Some(end)) => datetime::hours_between(start, end),
            _ => 0,
        }
    }

    /// (task, dependency) pairs whose intervals overlap. Unrelated tasks
    /// are never compared.
    pub fn overlapping_pairs(&self) -> Vec<(TaskId, TaskId)> {
        let mut pairs = Vec::new();
        for task in self.tasks.values() {
            for dep in task.dependency_tasks().iter().filter_map(|id| self.tasks.get(id)) {
                if task.overlaps_with(dep) {
                    pairs.push((task.id(), dep.id()));
                }
            }
        }
        pairs
    }

    /// Human readable overlap entries. Callers must not rely on the order.
    pub fn find_overlapping_tasks(&self) -> Vec<String> {
        self.overlapping_pairs()
            .into_iter()
            .filter_map(|(t, d)| Some((self.tasks.get(&t)?, self.tasks.get(&d)?)))
            .map(|(task, dep)| {
                format!(
                    "Task {} ('{}') overlaps with dependency Task {} ('{}')",
                    task.id(),
                    task.title(),
                    dep.id(),
                    dep.title()
                )
            })
            .collect()
    }

    /// Names of resources allocated to the task.
    pub fn team_for_task(&self, task_id: TaskId) -> BTreeSet<String> {
        self.allocations
            .iter()
            .filter(|a| a.task_id() == task_id)
            .map(|a| a.resource().to_string())
            .collect()
    }

    /// Effort hours per resource; every resource has an entry.
    pub fn resource_effort(&self) -> BTreeMap<String, f64> {
        self.resources
            .values()
            .map(|r| (r.name().to_string(), r.total_effort(&self.tasks)))
            .collect()
    }
}

fn parse_int(s: &str) -> std::result::Result<i32, FieldError> {
    let s = s.trim();
    s.parse()
        .map_err(|_| FieldError::InvalidInteger(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(token: &str) -> NaiveDateTime {
        parse_datetime(token).unwrap()
    }

    fn sample() -> Project {
        let mut p = Project::new("Sample");
        p.insert_tasks(vec![
            Task::new(1, "Design", dt("20250101+0800"), dt("20250103+1700"), vec![]),
            Task::new(2, "Build", dt("20250103+0800"), dt("20250110+1700"), vec![1]),
            Task::new(3, "Ship", dt("20250110+1700"), dt("20250111+1700"), vec![2, 42]),
        ]);
        p.add_resource("Alice", &[(1, 100), (2, 50)]).unwrap();
        p.add_resource("Bob", &[(3, 100), (77, 100)]).unwrap();
        p
    }

    #[test]
    fn empty_project_queries() {
        let p = Project::default();
        assert_eq!(p.completion_time(), None);
        assert_eq!(p.duration_hours(), 0);
        assert!(p.find_overlapping_tasks().is_empty());
        assert!(p.team_for_task(1).is_empty());
        assert!(p.resource_effort().is_empty());
    }

    #[test]
    fn completion_and_duration_span_all_tasks() {
        let p = sample();
        assert_eq!(p.completion_time(), Some(dt("20250111+1700")));
        assert_eq!(p.duration_hours(), 10 * 24 + 9);
    }

    #[test]
    fn dangling_dependencies_are_dropped() {
        let p = sample();
        let ship = p.task(3).unwrap();
        assert_eq!(ship.dependency_ids(), &[2, 42]);
        assert_eq!(ship.dependency_tasks().iter().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn only_dependency_overlaps_are_reported() {
        let p = sample();
        // Task 3 starts exactly when task 2 ends: adjacency, not overlap.
        assert_eq!(
            p.find_overlapping_tasks(),
            vec!["Task 2 ('Build') overlaps with dependency Task 1 ('Design')".to_string()]
        );
    }

    #[test]
    fn unrelated_overlapping_tasks_are_ignored() {
        let mut p = Project::default();
        p.insert_tasks(vec![
            Task::new(1, "A", dt("20250101+0800"), dt("20250105+0800"), vec![]),
            Task::new(2, "B", dt("20250102+0800"), dt("20250103+0800"), vec![]),
        ]);
        assert!(p.overlapping_pairs().is_empty());
    }

    #[test]
    fn teams_and_unknown_allocations() {
        let p = sample();
        assert_eq!(p.team_for_task(1), BTreeSet::from(["Alice".to_string()]));
        assert_eq!(p.team_for_task(3), BTreeSet::from(["Bob".to_string()]));
        assert!(p.team_for_task(77).is_empty());
        assert_eq!(p.allocations().len(), 3);
    }

    #[test]
    fn resource_effort_weights_task_hours() {
        let p = sample();
        let effort = p.resource_effort();
        let design = p.task(1).unwrap().duration_hours() as f64;
        let build = p.task(2).unwrap().duration_hours() as f64;
        assert_eq!(effort["Alice"], design + build * 0.5);
        assert_eq!(effort["Bob"], 24.0);
    }

    #[test]
    fn resource_without_allocations_has_zero_effort() {
        let mut p = sample();
        p.add_resource("Idle", &[]).unwrap();
        assert_eq!(p.resource_effort()["Idle"], 0.0);
    }

    #[test]
    fn re_adding_a_resource_appends_allocations() {
        let mut p = sample();
        assert_eq!(p.allocations().len(), 3);

        p.add_resource("Alice", &[(3, 100)]).unwrap();
        assert_eq!(p.allocations().len(), 4);
        // Stale entries from the first add are kept.
        assert_eq!(p.team_for_task(1), BTreeSet::from(["Alice".to_string()]));
        assert_eq!(
            p.team_for_task(3),
            BTreeSet::from(["Alice".to_string(), "Bob".to_string()])
        );
        // Effort follows the latest resource record only.
        assert_eq!(p.resource_effort()["Alice"], 24.0);
    }

    #[test]
    fn next_task_id_follows_highest_id() {
        assert_eq!(Project::default().next_task_id(), 1);
        assert_eq!(sample().next_task_id(), 4);

        let mut p = sample();
        p.add_task(TaskId::MAX, "Last", dt("20250101+0800"), dt("20250101+0900"), vec![])
            .unwrap();
        assert_eq!(p.next_task_id(), TaskId::MAX);
    }

    #[test]
    fn add_task_links_both_directions() {
        let mut p = Project::default();
        p.insert_tasks(vec![Task::new(
            2,
            "Build",
            dt("20250103+0800"),
            dt("20250110+1700"),
            vec![1],
        )]);
        assert!(p.task(2).unwrap().dependency_tasks().is_empty());

        p.add_task(1, "Design", dt("20250101+0800"), dt("20250103+1700"), vec![])
            .unwrap();
        assert!(p.task(2).unwrap().dependency_tasks().contains(&1));
    }

    #[test]
    fn add_task_validation() {
        let mut p = sample();
        let before = p.tasks().len();

        let err = p
            .add_task(9, "  ", dt("20250101+0800"), dt("20250102+0800"), vec![])
            .unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));

        let err = p
            .add_task(1, "Dup", dt("20250101+0800"), dt("20250102+0800"), vec![])
            .unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));

        let err = p
            .add_task(9, "Backwards", dt("20250102+0800"), dt("20250101+0800"), vec![])
            .unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));

        assert_eq!(p.tasks().len(), before);
    }

    #[test]
    fn add_task_from_form_parses_fields() {
        let mut p = sample();
        p.add_task_from_form(" 4 ", "Review", "20250112+0900", "20250112+1700", "3, 2 ,")
            .unwrap();
        let t = p.task(4).unwrap();
        assert_eq!(t.title(), "Review");
        assert_eq!(t.dependency_ids(), &[3, 2]);
        assert_eq!(t.dependency_tasks().len(), 2);
    }

    #[test]
    fn add_task_from_form_reports_bad_date_as_format_error() {
        let mut p = sample();
        let err = p
            .add_task_from_form("4", "Review", "2025-01-12", "20250112+1700", "")
            .unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.line(), None);
        assert!(p.task(4).is_none());
    }

    #[test]
    fn add_resource_from_form() {
        let mut p = sample();
        p.add_resource_from_form("Dana", "1:25, 3:50, junk, 1:2:3").unwrap();
        assert_eq!(p.resources()["Dana"].allocations().len(), 2);
        assert!(p.team_for_task(1).contains("Dana"));

        let err = p.add_resource_from_form("", "1:25").unwrap_err();
        assert!(matches!(err, PlanError::Validation(_)));

        let err = p.add_resource_from_form("Eve", "x:25").unwrap_err();
        assert!(err.is_format_error());
        assert!(!p.resources().contains_key("Eve"));
    }
}
