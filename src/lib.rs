//! Project planning core: tasks, resources and allocations loaded from
//! flat text files, plus the schedule and effort analyses built on them.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod report;

pub use error::{FieldError, PlanError, Result};
pub use model::{Allocation, Project, Resource, Task, TaskId};
