use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::{project::ProjectId, task::TaskId};

/// Where a calendar date comes from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarEventKind {
    ProjectStart,
    ProjectDue,
    TaskDue,
}

/// Read-only projection of a date found on a project or one of its tasks.
/// Rebuilt on demand, never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub kind: CalendarEventKind,
    pub project_id: ProjectId,
    pub project_title: String,
    pub date: Timestamp,
    pub task_id: Option<TaskId>,
}
