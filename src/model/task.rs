use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;

use super::datetime::{self, DISPLAY_FORMAT};

/// Integer key of a task within a project.
pub type TaskId = i32;

/// A single activity with a time span and declared dependencies.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    title: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    /// Dependency ids exactly as declared, possibly dangling.
    dependency_ids: Vec<TaskId>,
    /// Ids of dependencies that resolved against the project.
    dependency_tasks: BTreeSet<TaskId>,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        dependency_ids: Vec<TaskId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            start,
            end,
            dependency_ids,
            dependency_tasks: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn dependency_ids(&self) -> &[TaskId] {
        &self.dependency_ids
    }

    /// Resolved dependency links, keyed by task id.
    pub fn dependency_tasks(&self) -> &BTreeSet<TaskId> {
        &self.dependency_tasks
    }

    /// Attach a resolved dependency. Returns false if it was already linked.
    pub fn add_dependency_task(&mut self, id: TaskId) -> bool {
        self.dependency_tasks.insert(id)
    }

    /// Wall-clock hours from start to end, truncated.
    pub fn duration_hours(&self) -> i64 {
        datetime::hours_between(self.start, self.end)
    }

    /// Open-interval overlap: touching at a boundary does not count.
    pub fn overlaps_with(&self, other: &Task) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task {}: {} ({} to {})",
            self.id,
            self.title,
            self.start.format(DISPLAY_FORMAT),
            self.end.format(DISPLAY_FORMAT)
        )
    }
}
