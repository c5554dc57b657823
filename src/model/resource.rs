use std::collections::BTreeMap;
use std::fmt;

use super::task::{Task, TaskId};

/// A named actor with a workload share per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    /// Task id -> load percentage. Not range-checked.
    allocations: BTreeMap<TaskId, i32>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allocations: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allocations(&self) -> &BTreeMap<TaskId, i32> {
        &self.allocations
    }

    /// Last write wins for a repeated task id.
    pub fn add_allocation(&mut self, task_id: TaskId, load_percentage: i32) {
        self.allocations.insert(task_id, load_percentage);
    }

    /// Sum of `duration * pct / 100` over allocations; unknown tasks add 0.
    pub fn total_effort(&self, tasks: &BTreeMap<TaskId, Task>) -> f64 {
        self.allocations
            .iter()
            .filter_map(|(id, pct)| tasks.get(id).map(|t| effort_hours(t, *pct)))
            .sum()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource: {}", self.name)
    }
}

/// Link between a resource and a task, derived when resources are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    resource: String,
    task_id: TaskId,
    load_percentage: i32,
}

impl Allocation {
    pub fn new(resource: impl Into<String>, task_id: TaskId, load_percentage: i32) -> Self {
        Self {
            resource: resource.into(),
            task_id,
            load_percentage,
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn load_percentage(&self) -> i32 {
        self.load_percentage
    }

    pub fn effort_hours(&self, task: &Task) -> f64 {
        effort_hours(task, self.load_percentage)
    }
}

fn effort_hours(task: &Task, load_percentage: i32) -> f64 {
    task.duration_hours() as f64 * (f64::from(load_percentage) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datetime::parse_datetime;

    fn tasks() -> BTreeMap<TaskId, Task> {
        let mk = |id, start, end| {
            Task::new(
                id,
                format!("T{id}"),
                parse_datetime(start).unwrap(),
                parse_datetime(end).unwrap(),
                Vec::new(),
            )
        };
        [
            mk(1, "20250101+0800", "20250101+1800"),
            mk(2, "20250102+0800", "20250102+1200"),
        ]
        .into_iter()
        .map(|t| (t.id(), t))
        .collect()
    }

    #[test]
    fn effort_weights_duration_by_percentage() {
        let mut r = Resource::new("Alice");
        r.add_allocation(1, 50);
        r.add_allocation(2, 100);
        assert_eq!(r.total_effort(&tasks()), 9.0);
    }

    #[test]
    fn unknown_tasks_contribute_nothing() {
        let mut r = Resource::new("Bob");
        r.add_allocation(99, 100);
        assert_eq!(r.total_effort(&tasks()), 0.0);
    }

    #[test]
    fn reallocation_overwrites_percentage() {
        let mut r = Resource::new("Carol");
        r.add_allocation(1, 20);
        r.add_allocation(1, 80);
        assert_eq!(r.allocations().len(), 1);
        assert_eq!(r.allocations()[&1], 80);
    }

    #[test]
    fn allocation_effort_uses_its_own_share() {
        let all = tasks();
        let a = Allocation::new("Alice", 1, 25);
        assert_eq!(a.effort_hours(&all[&1]), 2.5);
        assert_eq!(a.resource(), "Alice");
    }
}
