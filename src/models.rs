pub mod calendar;
pub mod project;
pub mod store;
pub mod task;

pub use calendar::{CalendarEvent, CalendarEventKind};
pub use project::{NewProject, Project, ProjectId, ProjectPatch, ProjectStatus};
pub use store::Store;
pub use task::{NewTask, Task, TaskId, TaskPatch, TaskStatus};

/// Error returned when a status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} status '{value}' (expected one of: {expected})")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
