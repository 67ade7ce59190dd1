use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ParseStatusError, task::Task};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Fresh random id, `project-<uuid>`.
    pub fn generate() -> Self {
        Self(format!("project-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    /// Dashboard tab order.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::InProgress,
        ProjectStatus::NotStarted,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "not-started",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "not-started" => Ok(ProjectStatus::NotStarted),
            "in-progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "on-hold" => Ok(ProjectStatus::OnHold),
            _ => Err(ParseStatusError {
                kind: "project",
                value: s.to_string(),
                expected: "not-started, in-progress, completed, on-hold",
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier of the project
    pub id: ProjectId,
    /// Display name, never empty
    pub title: String,
    /// Free text description
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub github_url: Option<String>,
    pub deployment_url: Option<String>,
    /// Technologies used, in the order they were added
    pub tech_stack: Vec<String>,
    /// Tasks owned by this project, in insertion order
    pub tasks: Vec<Task>,
    pub start_date: Option<Timestamp>,
    pub target_completion_date: Option<Timestamp>,
    pub created_at: Timestamp,
    /// Refreshed on every change to the project or one of its tasks
    pub updated_at: Timestamp,
}

impl Project {
    pub fn get_task(&self, task_id: &crate::models::TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == task_id)
    }

    pub fn get_task_mut(&mut self, task_id: &crate::models::TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == task_id)
    }
}

/// Fields accepted when creating a project. Id, timestamps and tasks are
/// assigned by the store.
#[derive(Debug, Default, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub github_url: Option<String>,
    pub deployment_url: Option<String>,
    pub tech_stack: Vec<String>,
    pub start_date: Option<Timestamp>,
    pub target_completion_date: Option<Timestamp>,
}

/// Shallow partial update of a project.
///
/// `None` leaves a field untouched. Nullable fields take `Some(None)` to clear
/// them.
#[derive(Debug, Default, Clone)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub github_url: Option<Option<String>>,
    pub deployment_url: Option<Option<String>>,
    pub tech_stack: Option<Vec<String>>,
    pub start_date: Option<Option<Timestamp>>,
    pub target_completion_date: Option<Option<Timestamp>>,
}

impl ProjectPatch {
    pub(crate) fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(github_url) = self.github_url {
            project.github_url = github_url;
        }
        if let Some(deployment_url) = self.deployment_url {
            project.deployment_url = deployment_url;
        }
        if let Some(tech_stack) = self.tech_stack {
            project.tech_stack = tech_stack;
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(target) = self.target_completion_date {
            project.target_completion_date = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>(), Ok(status));
        }
        assert_eq!("ON_HOLD".parse::<ProjectStatus>(), Ok(ProjectStatus::OnHold));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "archived".parse::<ProjectStatus>().unwrap_err();
        assert_eq!(err.value, "archived");
        assert!(err.to_string().contains("not-started"));
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ProjectStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not-started\"");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("project-"));
    }

    #[test]
    fn test_patch_leaves_omitted_fields_alone() {
        let now = Timestamp::UNIX_EPOCH;
        let mut project = Project {
            id: ProjectId::from("p"),
            title: String::from("Old"),
            description: Some(String::from("keep me")),
            status: ProjectStatus::NotStarted,
            github_url: Some(String::from("https://github.com/x/y")),
            deployment_url: None,
            tech_stack: vec![String::from("Rust")],
            tasks: vec![],
            start_date: Some(now),
            target_completion_date: None,
            created_at: now,
            updated_at: now,
        };

        ProjectPatch {
            title: Some(String::from("New")),
            github_url: Some(None),
            ..ProjectPatch::default()
        }
        .apply(&mut project);

        assert_eq!(project.title, "New");
        assert_eq!(project.github_url, None);
        assert_eq!(project.description.as_deref(), Some("keep me"));
        assert_eq!(project.start_date, Some(now));
        assert_eq!(project.tech_stack, vec![String::from("Rust")]);
    }
}
