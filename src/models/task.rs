use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ParseStatusError, project::ProjectId};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Fresh random id, `task-<uuid>`.
    pub fn generate() -> Self {
        Self(format!("task-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Complete,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Complete => "complete",
        }
    }

    /// The other state; tasks flip freely between the two.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Complete,
            TaskStatus::Complete => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "complete" => Ok(TaskStatus::Complete),
            _ => Err(ParseStatusError {
                kind: "task",
                value: s.to_string(),
                expected: "pending, complete",
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier of the task
    pub id: TaskId,
    /// The project owning this task
    pub project_id: ProjectId,
    /// Display name, never empty
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields accepted when adding a task. Id, owning project and timestamps are
/// assigned by the store.
#[derive(Debug, Default, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
}

#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<Timestamp>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_is_identity() {
        for status in [TaskStatus::Pending, TaskStatus::Complete] {
            assert_eq!(status.toggled().toggled(), status);
            assert_ne!(status.toggled(), status);
        }
    }

    #[test]
    fn test_parse_task_status() {
        assert_eq!("Complete".parse::<TaskStatus>(), Ok(TaskStatus::Complete));
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_patch_clears_due_date() {
        let mut task = Task {
            id: TaskId::from("t"),
            project_id: ProjectId::from("p"),
            title: String::from("Write docs"),
            description: None,
            status: TaskStatus::Pending,
            due_date: Some(Timestamp::UNIX_EPOCH),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        }
        .apply(&mut task);

        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Write docs");
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: TaskId::from("task-1"),
            project_id: ProjectId::from("project-1"),
            title: String::from("Design homepage layout"),
            description: None,
            status: TaskStatus::Complete,
            due_date: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["projectId"], "project-1");
        assert_eq!(value["status"], "complete");
        assert!(value.get("dueDate").is_some());
    }
}
