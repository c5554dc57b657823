pub mod datetime;
pub mod project;
pub mod resource;
pub mod task;
pub mod timeline;

pub use project::Project;
pub use resource::{Allocation, Resource};
pub use task::{Task, TaskId};
pub use timeline::TimelineViewport;
