//! The in-memory authority for every project and task.
//!
//! # Invariants
//! - Each operation applies its whole change before returning; callers never
//!   observe a half-applied mutation.
//! - `updated_at` strictly increases on every mutation of a project or one of
//!   its tasks, and a project's `updated_at` is never older than any of its
//!   tasks'.
//! - "Not found" is reported through [`StoreError`]; nothing here panics on a
//!   missing id.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

use crate::{
    clock::{Clock, SystemClock},
    events::{Observers, StoreEvent, SubscriptionId},
    models::{
        CalendarEvent, NewProject, NewTask, Project, ProjectId, ProjectPatch, Store, Task, TaskId,
        TaskPatch,
    },
    sample_data,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(ProjectId),

    #[error("Task '{task_id}' not found in project '{project_id}'")]
    TaskNotFound {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl StoreError {
    /// Every store error is a flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ProjectNotFound(_) | StoreError::TaskNotFound { .. }
        )
    }
}

pub struct ProjectStore {
    store: Store,
    observers: Observers,
    clock: Box<dyn Clock>,
    revision: u64,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Self {
        Self::with_clock(projects, SystemClock)
    }

    pub fn with_clock(projects: Vec<Project>, clock: impl Clock + 'static) -> Self {
        Self {
            store: Store::new(projects),
            observers: Observers::new(),
            clock: Box::new(clock),
            revision: 0,
        }
    }

    /// Store seeded with the hand-authored sample projects.
    pub fn from_sample_data() -> Self {
        Self::new(sample_data::sample_projects())
    }

    pub fn projects(&self) -> &[Project] {
        &self.store.projects
    }

    /// Number of successful mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        let project = self.store.get_project(id);
        if project.is_none() {
            tracing::debug!(project_id = %id, "project lookup missed");
        }
        project
    }

    pub fn get_task(&self, project_id: &ProjectId, task_id: &TaskId) -> Option<&Task> {
        self.store.get_task(project_id, task_id)
    }

    pub fn create(&mut self, fields: NewProject) -> Project {
        let now = self.clock.now();
        let project = Project {
            id: ProjectId::generate(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            github_url: fields.github_url,
            deployment_url: fields.deployment_url,
            tech_stack: fields.tech_stack,
            tasks: vec![],
            start_date: fields.start_date,
            target_completion_date: fields.target_completion_date,
            created_at: now,
            updated_at: now,
        };

        self.store.add_project(project.clone());
        self.commit(StoreEvent::ProjectCreated {
            project_id: project.id.clone(),
            title: project.title.clone(),
        });

        project
    }

    pub fn update(&mut self, id: &ProjectId, patch: ProjectPatch) -> Result<Project, StoreError> {
        let now = self.clock.now();
        let project = self
            .store
            .get_project_mut(id)
            .ok_or_else(|| not_found_project(id))?;

        patch.apply(project);
        project.updated_at = next_stamp(now, project.updated_at);
        let updated = project.clone();

        self.commit(StoreEvent::ProjectUpdated {
            project_id: id.clone(),
        });
        Ok(updated)
    }

    /// Removes the project together with its tasks. Deleting an unknown id is
    /// a no-op and returns `None`.
    pub fn delete(&mut self, id: &ProjectId) -> Option<Project> {
        let Some(removed) = self.store.remove_project(id) else {
            tracing::debug!(project_id = %id, "delete of unknown project ignored");
            return None;
        };

        self.commit(StoreEvent::ProjectDeleted {
            project_id: removed.id.clone(),
            title: removed.title.clone(),
            removed_tasks: removed.tasks.len(),
        });
        Some(removed)
    }

    pub fn add_task(
        &mut self,
        project_id: &ProjectId,
        fields: NewTask,
    ) -> Result<Task, StoreError> {
        let now = self.clock.now();
        let project = self
            .store
            .get_project_mut(project_id)
            .ok_or_else(|| not_found_project(project_id))?;

        let stamp = next_stamp(now, project.updated_at);
        let task = Task {
            id: TaskId::generate(),
            project_id: project_id.clone(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            due_date: fields.due_date,
            created_at: stamp,
            updated_at: stamp,
        };

        project.tasks.push(task.clone());
        project.updated_at = stamp;

        self.commit(StoreEvent::TaskAdded {
            project_id: project_id.clone(),
            task_id: task.id.clone(),
            title: task.title.clone(),
        });
        Ok(task)
    }

    pub fn update_task(
        &mut self,
        project_id: &ProjectId,
        task_id: &TaskId,
        patch: TaskPatch,
    ) -> Result<Task, StoreError> {
        let now = self.clock.now();
        let project = self
            .store
            .get_project_mut(project_id)
            .ok_or_else(|| not_found_project(project_id))?;

        let stamp = next_stamp(now, project.updated_at);
        let task = project.get_task_mut(task_id).ok_or_else(|| {
            tracing::warn!(project_id = %project_id, task_id = %task_id, "task not found");
            StoreError::TaskNotFound {
                project_id: project_id.clone(),
                task_id: task_id.clone(),
            }
        })?;

        patch.apply(task);
        task.updated_at = stamp;
        let updated = task.clone();
        project.updated_at = stamp;

        self.commit(StoreEvent::TaskUpdated {
            project_id: project_id.clone(),
            task_id: task_id.clone(),
        });
        Ok(updated)
    }

    /// Removes a task from its project. Unknown project or task ids are a
    /// no-op and return `None`.
    pub fn delete_task(&mut self, project_id: &ProjectId, task_id: &TaskId) -> Option<Task> {
        let now = self.clock.now();
        let project = self.store.get_project_mut(project_id)?;
        let index = project.tasks.iter().position(|t| &t.id == task_id);

        let Some(index) = index else {
            tracing::debug!(
                project_id = %project_id,
                task_id = %task_id,
                "delete of unknown task ignored"
            );
            return None;
        };

        let removed = project.tasks.remove(index);
        project.updated_at = next_stamp(now, project.updated_at);

        self.commit(StoreEvent::TaskDeleted {
            project_id: project_id.clone(),
            task_id: task_id.clone(),
        });
        Some(removed)
    }

    pub fn tasks_for_project(&self, project_id: &ProjectId) -> Vec<Task> {
        sample_data::tasks_for_project(&self.store.projects, project_id)
    }

    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        sample_data::calendar_events(&self.store.projects)
    }

    fn commit(&mut self, event: StoreEvent) {
        self.revision += 1;
        self.observers.emit(&event);
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.store.projects.len())
            .field("revision", &self.revision)
            .field("observers", &self.observers)
            .finish()
    }
}

fn not_found_project(id: &ProjectId) -> StoreError {
    tracing::warn!(project_id = %id, "project not found");
    StoreError::ProjectNotFound(id.clone())
}

/// `now`, unless the clock has not moved past `previous`, in which case the
/// smallest timestamp after `previous`.
fn next_stamp(now: Timestamp, previous: Timestamp) -> Timestamp {
    if now > previous {
        return now;
    }
    previous
        .checked_add(SignedDuration::from_nanos(1))
        .unwrap_or(Timestamp::MAX)
}
